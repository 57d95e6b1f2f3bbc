//! Disassembly module - hex decoding, Capstone decoding, classification
//!
//! The pipeline is: clean hex text -> byte buffer -> Capstone -> classified
//! instruction records, published on a `DisasmSession`.

pub mod classify;
pub mod engine;
pub mod hex;
pub mod types;

pub use engine::{DisasmSession, BASE_ADDRESS};
pub use types::{ArchType, Instruction, InstructionCategory, PipelineResult};
