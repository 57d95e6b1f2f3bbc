//! Decode pipeline - Capstone backend
//!
//! Turns free-form hex text into a classified instruction listing. The
//! Capstone engine is built fresh for every request and dropped with it.

use capstone::prelude::*;

use super::classify::classify;
use super::hex;
use super::types::{ArchType, Instruction, PipelineResult};

/// Virtual address assigned to the first decoded byte
pub const BASE_ADDRESS: u64 = 0x1000;

/// User-visible message for any hex parsing failure
const INVALID_HEX_MSG: &str = "Invalid Hex String";

/// Build a Capstone instance for the selected architecture.
///
/// Exactly two fixed configurations; detail mode is enabled so operand
/// decomposition is available.
fn build_engine(arch: ArchType) -> Result<Capstone, capstone::Error> {
    match arch {
        ArchType::Arm64 => Capstone::new()
            .arm64()
            .mode(capstone::arch::arm64::ArchMode::Arm)
            .detail(true)
            .build(),
        ArchType::X86_64 => Capstone::new()
            .x86()
            .mode(capstone::arch::x86::ArchMode::Mode64)
            .detail(true)
            .build(),
    }
}

/// Decode a byte buffer into classified instruction records
fn decode_bytes(bytes: &[u8], arch: ArchType) -> Result<Vec<Instruction>, capstone::Error> {
    let cs = build_engine(arch)?;
    let insns = cs.disasm_all(bytes, BASE_ADDRESS)?;

    let mut listing = Vec::with_capacity(insns.len());
    for insn in insns.iter() {
        let byte_str = insn
            .bytes()
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ");
        let mnemonic = insn.mnemonic().unwrap_or("").to_string();
        // classification works on lowercase; display keeps decoder casing
        let category = classify(&mnemonic.to_lowercase());

        listing.push(Instruction {
            address: format!("0x{:X}", insn.address()),
            mnemonic,
            operands: insn.op_str().unwrap_or("").to_string(),
            bytes: byte_str,
            category,
        });
    }

    Ok(listing)
}

/// Run one full request: clean + decode hex, disassemble, classify
fn run(hex_text: &str, arch: ArchType) -> PipelineResult {
    let bytes = match hex::decode(hex_text) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("hex decode rejected input: {}", e);
            return PipelineResult::Failed(INVALID_HEX_MSG.to_string());
        }
    };

    log::debug!("decoding {} bytes as {}", bytes.len(), arch);
    match decode_bytes(&bytes, arch) {
        Ok(listing) => {
            log::info!("decoded {} instruction(s)", listing.len());
            PipelineResult::Instructions(listing)
        }
        Err(e) => {
            log::warn!("capstone failure: {}", e);
            PipelineResult::Failed(format!("Error: {}", e))
        }
    }
}

/// Disassembly session holding the published result of the latest request.
///
/// Each `disassemble` call fully supersedes the previous outcome; the
/// session keeps no other state between calls.
#[derive(Debug, Default)]
pub struct DisasmSession {
    result: PipelineResult,
}

impl DisasmSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode and classify `hex_text` for `arch`, replacing the published
    /// result. Results are read back via `instructions()` / `error()`.
    pub fn disassemble(&mut self, hex_text: &str, arch: ArchType) {
        self.result = run(hex_text, arch);
    }

    /// Instruction listing of the latest request; empty after a failure
    pub fn instructions(&self) -> &[Instruction] {
        match &self.result {
            PipelineResult::Instructions(listing) => listing,
            PipelineResult::Failed(_) => &[],
        }
    }

    /// Error message of the latest request, if it failed
    pub fn error(&self) -> Option<&str> {
        match &self.result {
            PipelineResult::Instructions(_) => None,
            PipelineResult::Failed(msg) => Some(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disasm::types::InstructionCategory;

    #[test]
    fn invalid_hex_never_reaches_the_decoder() {
        let mut session = DisasmSession::new();
        session.disassemble("C0 03 5F D6", ArchType::Arm64);
        assert_eq!(session.instructions().len(), 1);

        session.disassemble("ZZ", ArchType::Arm64);
        assert_eq!(session.error(), Some("Invalid Hex String"));
        // previous listing is cleared, not left dangling next to the error
        assert!(session.instructions().is_empty());
    }

    #[test]
    fn arm64_ret_decodes_and_classifies() {
        let mut session = DisasmSession::new();
        session.disassemble("C0 03 5F D6", ArchType::Arm64);

        assert_eq!(session.error(), None);
        let insns = session.instructions();
        assert_eq!(insns.len(), 1);
        assert_eq!(insns[0].address, "0x1000");
        assert_eq!(insns[0].mnemonic.to_lowercase(), "ret");
        assert_eq!(insns[0].bytes, "C0 03 5F D6");
        assert_eq!(insns[0].category, InstructionCategory::Return);
    }

    #[test]
    fn x86_64_ret_decodes_and_classifies() {
        let mut session = DisasmSession::new();
        session.disassemble("C3", ArchType::X86_64);

        assert_eq!(session.error(), None);
        let insns = session.instructions();
        assert_eq!(insns.len(), 1);
        assert_eq!(insns[0].mnemonic.to_lowercase(), "ret");
        assert_eq!(insns[0].category, InstructionCategory::Return);
    }

    #[test]
    fn addresses_start_at_base_and_ascend() {
        let mut session = DisasmSession::new();
        // two arm64 nops
        session.disassemble("1F 20 03 D5 1F 20 03 D5", ArchType::Arm64);

        let insns = session.instructions();
        assert_eq!(insns.len(), 2);
        assert_eq!(insns[0].address, "0x1000");
        assert_eq!(insns[1].address, "0x1004");
    }

    #[test]
    fn same_request_twice_is_identical() {
        let mut a = DisasmSession::new();
        let mut b = DisasmSession::new();
        a.disassemble("55 48 89 E5 C3", ArchType::X86_64);
        b.disassemble("55 48 89 E5 C3", ArchType::X86_64);
        assert_eq!(a.instructions(), b.instructions());
    }
}
