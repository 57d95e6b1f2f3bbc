//! CLI - reedline-based REPL interface
//!
//! Reads hex input and commands, drives the disassembly session, and
//! renders the published listing or error with category color hints.

use std::borrow::Cow;

use anyhow::Result;
use colored::Colorize;
use reedline::{
    Prompt, PromptHistorySearch, PromptHistorySearchStatus, Reedline, Signal,
};

use crate::disasm::{ArchType, DisasmSession, Instruction};

/// A named byte pattern selectable from the REPL
pub struct Preset {
    pub name: &'static str,
    pub desc: &'static str,
    pub hex: &'static str,
    pub arch: ArchType,
}

/// Pattern library: common snippets for quick experiments
pub const PRESETS: &[Preset] = &[
    Preset {
        name: "ret-arm64",
        desc: "Return (RET)",
        hex: "C0 03 5F D6",
        arch: ArchType::Arm64,
    },
    Preset {
        name: "loop-arm64",
        desc: "Infinite loop (B .)",
        hex: "00 00 00 14",
        arch: ArchType::Arm64,
    },
    Preset {
        name: "mov-arm64",
        desc: "MOV X0, #1",
        hex: "20 00 80 D2",
        arch: ArchType::Arm64,
    },
    Preset {
        name: "nop-arm64",
        desc: "NOP sled",
        hex: "1F 20 03 D5 1F 20 03 D5",
        arch: ArchType::Arm64,
    },
    Preset {
        name: "ret-x64",
        desc: "Return (RET)",
        hex: "C3",
        arch: ArchType::X86_64,
    },
    Preset {
        name: "nop-x64",
        desc: "NOP sled",
        hex: "90 90 90 90",
        arch: ArchType::X86_64,
    },
    Preset {
        name: "int3-x64",
        desc: "INT 3 (breakpoint)",
        hex: "CC",
        arch: ArchType::X86_64,
    },
];

/// Custom prompt showing the currently selected architecture
pub struct HexdasmPrompt {
    arch: ArchType,
}

impl HexdasmPrompt {
    pub fn new(arch: ArchType) -> Self {
        Self { arch }
    }

    pub fn set_arch(&mut self, arch: ArchType) {
        self.arch = arch;
    }
}

impl Prompt for HexdasmPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Owned(format!("[{}]", self.arch))
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _prompt_mode: reedline::PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("> ")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "(failed) ",
        };
        Cow::Owned(format!("(search: {}{}) ", prefix, history_search.term))
    }
}

/// Command parsing result
#[derive(Debug, PartialEq)]
pub enum ParsedCommand {
    /// Disassemble hex text: d <hex>, or bare hex input
    Disasm(String),
    /// Switch architecture: arch <arm64|x86_64>
    SetArch(ArchType),
    /// List the pattern library: presets
    ListPresets,
    /// Disassemble a preset: p <name>
    LoadPreset(String),
    /// Help: ? or help
    Help,
    /// Quit: q or exit
    Quit,
    /// Unknown command
    Unknown(String),
}

/// Parse a command string into a structured command.
///
/// Anything that is not a known command word is treated as hex input, so
/// pasting bytes straight into the prompt works.
pub fn parse_command(input: &str) -> ParsedCommand {
    let input = input.trim();
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts.first().unwrap_or(&"");
    let arg = parts.get(1).map(|s| s.trim());

    match *cmd {
        "d" | "dis" | "disasm" => {
            if let Some(hex_text) = arg {
                return ParsedCommand::Disasm(hex_text.to_string());
            }
            ParsedCommand::Unknown("d requires hex bytes".into())
        }
        "arch" | "a" => {
            if let Some(name) = arg {
                match name.parse::<ArchType>() {
                    Ok(arch) => ParsedCommand::SetArch(arch),
                    Err(e) => ParsedCommand::Unknown(e),
                }
            } else {
                ParsedCommand::Unknown("arch requires arm64 or x86_64".into())
            }
        }
        "presets" | "pl" => ParsedCommand::ListPresets,
        "p" | "preset" => {
            if let Some(name) = arg {
                return ParsedCommand::LoadPreset(name.to_string());
            }
            ParsedCommand::Unknown("p requires a preset name".into())
        }
        "?" | "help" => ParsedCommand::Help,
        "q" | "quit" | "exit" => ParsedCommand::Quit,
        _ => ParsedCommand::Disasm(input.to_string()),
    }
}

/// Print one instruction row with its category glyph and color
fn print_instruction(insn: &Instruction) {
    let tag = format!("{} {}", insn.category.glyph(), insn.category.label());
    println!(
        "  {}  {}  {} {} {}",
        insn.address.cyan(),
        format!("{:<24}", insn.bytes).dimmed(),
        format!("{:<8}", insn.mnemonic).bold(),
        insn.operands,
        format!("[{}]", tag).color(insn.category.color()),
    );
}

/// Render the session's published state (listing or error)
pub fn render_result(session: &DisasmSession) {
    if let Some(error) = session.error() {
        println!("{} {}", "[!]".red(), error.red());
        return;
    }

    let insns = session.instructions();
    if insns.is_empty() {
        println!("{}", "[*] No instructions decoded".dimmed());
        return;
    }

    for insn in insns {
        print_instruction(insn);
    }
}

/// Print the help message
fn print_help() {
    println!("{}", "Hexdasm CLI Commands".bold().cyan());
    println!("{}", "═".repeat(50).cyan());

    println!("\n{}", "Disassembly:".bold().yellow());
    println!("  {}      Disassemble hex bytes", "d <hex>".green());
    println!("  {}        Bare hex input works too", "<hex>".green());

    println!("\n{}", "Architecture:".bold().yellow());
    println!("  {}  Switch architecture", "arch <name>".green());
    println!("               (arm64, x86_64)");

    println!("\n{}", "Patterns:".bold().yellow());
    println!("  {}      List the pattern library", "presets".green());
    println!("  {}     Disassemble a preset", "p <name>".green());

    println!("\n{}", "Other:".bold().yellow());
    println!("  {}            Show this help", "?".green());
    println!("  {}            Quit", "q".green());
}

/// Print the pattern library grouped by architecture
fn print_presets() {
    for arch in ArchType::ALL {
        println!("{}", format!("{} patterns:", arch).bold().yellow());
        for preset in PRESETS.iter().filter(|p| p.arch == arch) {
            println!(
                "  {:<12} {:<22} {}",
                preset.name.green(),
                preset.desc,
                preset.hex.dimmed()
            );
        }
    }
}

/// Execute a parsed command; returns false when the REPL should exit
fn execute_command(
    cmd: ParsedCommand,
    session: &mut DisasmSession,
    prompt: &mut HexdasmPrompt,
    arch: &mut ArchType,
) -> bool {
    match cmd {
        ParsedCommand::Disasm(hex_text) => {
            session.disassemble(&hex_text, *arch);
            render_result(session);
        }
        ParsedCommand::SetArch(new_arch) => {
            *arch = new_arch;
            prompt.set_arch(new_arch);
            println!("[*] Architecture set to {}", new_arch);
        }
        ParsedCommand::ListPresets => {
            print_presets();
        }
        ParsedCommand::LoadPreset(name) => {
            match PRESETS.iter().find(|p| p.name == name) {
                Some(preset) => {
                    *arch = preset.arch;
                    prompt.set_arch(preset.arch);
                    println!("[*] {} ({}): {}", preset.name, preset.arch, preset.hex);
                    session.disassemble(preset.hex, preset.arch);
                    render_result(session);
                }
                None => {
                    println!(
                        "{} Unknown preset: '{}' (try 'presets')",
                        "[!]".red(),
                        name
                    );
                }
            }
        }
        ParsedCommand::Help => {
            print_help();
        }
        ParsedCommand::Quit => {
            println!("[*] Shutting down...");
            return false;
        }
        ParsedCommand::Unknown(input) => {
            println!("{} {}", "[!]".red(), input);
            println!("    Type '?' for help");
        }
    }
    true
}

/// Run the CLI REPL
pub fn run_cli(initial_arch: ArchType) -> Result<()> {
    let mut line_editor = Reedline::create();
    let mut prompt = HexdasmPrompt::new(initial_arch);
    let mut session = DisasmSession::new();
    let mut arch = initial_arch;

    println!(
        "{}",
        "╔══════════════════════════════════════════════════════════════╗".cyan()
    );
    println!(
        "{}",
        "║  Hexdasm CLI - Type '?' for help, 'q' to quit                ║".cyan()
    );
    println!(
        "{}",
        "╚══════════════════════════════════════════════════════════════╝".cyan()
    );

    loop {
        let sig = line_editor.read_line(&prompt)?;
        match sig {
            Signal::Success(buffer) => {
                let input = buffer.trim();
                if input.is_empty() {
                    continue;
                }

                let cmd = parse_command(input);
                if !execute_command(cmd, &mut session, &mut prompt, &mut arch) {
                    break;
                }
            }
            Signal::CtrlD | Signal::CtrlC => {
                println!("\n[*] Interrupted");
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hex_parses_as_disasm() {
        assert_eq!(
            parse_command("C0 03 5F D6"),
            ParsedCommand::Disasm("C0 03 5F D6".into())
        );
    }

    #[test]
    fn explicit_disasm_command() {
        assert_eq!(parse_command("d C3"), ParsedCommand::Disasm("C3".into()));
    }

    #[test]
    fn arch_switch_accepts_aliases() {
        assert_eq!(
            parse_command("arch aarch64"),
            ParsedCommand::SetArch(ArchType::Arm64)
        );
        assert_eq!(
            parse_command("a x64"),
            ParsedCommand::SetArch(ArchType::X86_64)
        );
    }

    #[test]
    fn every_preset_has_valid_hex() {
        for preset in PRESETS {
            assert!(
                crate::disasm::hex::decode(preset.hex).is_ok(),
                "bad preset hex: {}",
                preset.name
            );
        }
    }
}
