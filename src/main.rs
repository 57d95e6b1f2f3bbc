//! Hexdasm - Interactive hex-to-assembly disassembler
//!
//! Entry point that handles CLI argument parsing and mode switching
//! between one-shot decoding and the interactive REPL.

use clap::Parser;

use hexdasm::disasm::{ArchType, DisasmSession};
use hexdasm::ui::cli::{render_result, run_cli};

/// Hexdasm: disassemble hex bytes and classify each instruction
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Hex bytes to disassemble (one-shot mode, skips the REPL)
    #[arg(short = 'x', long)]
    hex: Option<String>,

    /// Target architecture (arm64, x86_64)
    #[arg(short, long, default_value = "arm64")]
    arch: ArchType,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(
        match args.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        },
    ))
    .init();

    log::info!("Hexdasm Core Initialized");
    log::debug!("Arch: {}", args.arch);

    if let Some(hex_text) = args.hex {
        // One-shot mode: decode, print, exit
        let mut session = DisasmSession::new();
        session.disassemble(&hex_text, args.arch);
        render_result(&session);
        if session.error().is_some() {
            std::process::exit(1);
        }
    } else {
        println!("[*] Hexdasm v{}", env!("CARGO_PKG_VERSION"));
        run_cli(args.arch)?;
    }

    Ok(())
}
