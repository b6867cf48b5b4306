//! `rvas` -- assembles RV32I/M assembly text into a flat machine-code
//! binary, written to `./out.bin` as big-endian 32-bit words.

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use rvcc::assembler::assemble;

/// A two-pass assembler for RV32I/M assembly text.
#[derive(Parser, Debug)]
#[command(name = "rvas")]
#[command(about = "Assembles RV32I/M assembly text into a flat binary", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the assembly source file.
    input: String,
}

const OUTPUT_PATH: &str = "out.bin";

fn main() -> ExitCode {
    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("rvas: cannot read {}: {e}", cli.input);
            return ExitCode::FAILURE;
        }
    };

    let words = match assemble(&source) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("rvas: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut bytes = Vec::with_capacity(words.len() * 4);
    for word in words {
        bytes.extend_from_slice(&word.to_be_bytes());
    }

    if let Err(e) = fs::write(OUTPUT_PATH, &bytes) {
        eprintln!("rvas: cannot write {OUTPUT_PATH}: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
