//! Core value types shared by the pipeline and the UI.

use std::fmt;
use std::str::FromStr;

use colored::Color;

/// Target instruction set for a disassembly request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchType {
    /// AArch64 (ARM64)
    Arm64,
    /// x86 64-bit long mode
    X86_64,
}

impl ArchType {
    /// All selectable architectures, in display order
    pub const ALL: [ArchType; 2] = [ArchType::Arm64, ArchType::X86_64];

    /// Short label used in the prompt and listings
    pub fn label(&self) -> &'static str {
        match self {
            ArchType::Arm64 => "arm64",
            ArchType::X86_64 => "x86_64",
        }
    }
}

impl fmt::Display for ArchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ArchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arm64" | "aarch64" => Ok(ArchType::Arm64),
            "x86_64" | "x86-64" | "x64" | "amd64" => Ok(ArchType::X86_64),
            other => Err(format!("unknown architecture '{}'", other)),
        }
    }
}

/// Coarse semantic category of an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionCategory {
    Branch,
    Memory,
    Math,
    Return,
    Other,
}

impl InstructionCategory {
    /// Single-character marker shown next to the mnemonic
    pub fn glyph(&self) -> &'static str {
        match self {
            InstructionCategory::Branch => "↯",
            InstructionCategory::Memory => "▤",
            InstructionCategory::Math => "ƒ",
            InstructionCategory::Return => "⏎",
            InstructionCategory::Other => "·",
        }
    }

    /// Terminal color hint for listings
    pub fn color(&self) -> Color {
        match self {
            InstructionCategory::Branch => Color::Yellow,
            InstructionCategory::Memory => Color::Blue,
            InstructionCategory::Math => Color::Green,
            InstructionCategory::Return => Color::Red,
            InstructionCategory::Other => Color::BrightBlack,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InstructionCategory::Branch => "branch",
            InstructionCategory::Memory => "memory",
            InstructionCategory::Math => "math",
            InstructionCategory::Return => "return",
            InstructionCategory::Other => "other",
        }
    }
}

/// One decoded and classified instruction, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Address formatted as "0x" + uppercase hex, no zero-padding
    pub address: String,
    /// Mnemonic with the decoder's original casing
    pub mnemonic: String,
    /// Operand text as produced by the decoder
    pub operands: String,
    /// Raw bytes as space-separated uppercase pairs, e.g. "C0 03 5F D6"
    pub bytes: String,
    pub category: InstructionCategory,
}

/// Outcome of one disassembly request.
///
/// A tagged union rather than separate list/error fields, so a listing
/// and an error message can never be observed together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineResult {
    Instructions(Vec<Instruction>),
    Failed(String),
}

impl Default for PipelineResult {
    fn default() -> Self {
        PipelineResult::Instructions(Vec::new())
    }
}
