//! `rvcc` -- compiles a small C-like source file into RV32I assembly text.

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use rvcc::compile;

/// A tiny C-like compiler targeting RV32I assembly.
#[derive(Parser, Debug)]
#[command(name = "rvcc")]
#[command(about = "Compiles a small C-like source file into RV32I assembly", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the source file.
    input: String,

    /// Path to write the generated assembly to.
    output: String,

    /// Print the generated assembly to stdout as well.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("rvcc: cannot read {}: {e}", cli.input);
            return ExitCode::FAILURE;
        }
    };

    let asm = match compile(&source) {
        Ok(asm) => asm,
        Err(e) => {
            eprintln!("rvcc: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.verbose {
        println!("{asm}");
    }

    if let Err(e) = fs::write(&cli.output, &asm) {
        eprintln!("rvcc: cannot write {}: {e}", cli.output);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
