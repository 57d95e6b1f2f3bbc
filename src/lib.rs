//! Hexdasm - Interactive hex-to-assembly disassembler
//!
//! Decodes user-supplied hex bytes with Capstone and classifies each
//! instruction into a coarse semantic category for display.

pub mod disasm;
pub mod ui;
