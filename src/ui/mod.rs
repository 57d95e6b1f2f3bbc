//! UI module - Command Line Interface
//!
//! Provides the reedline-based REPL and the listing renderer shared with
//! one-shot mode.

pub mod cli;
