use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pmem-tool")]
#[command(about = "SDR settings mirror inspector and generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every stored field of a settings mirror, raw and unhealed
    Dump {
        /// Settings mirror file path
        input: PathBuf,
    },
    /// Check the mirror's check value and structure version
    Verify {
        /// Settings mirror file path
        input: PathBuf,
    },
    /// Write a factory-default settings mirror
    Init {
        /// Output file path
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Dump { input } => pmem_tool::dump(&input).map(|report| {
            print!("{report}");
            ExitCode::SUCCESS
        }),
        Commands::Verify { input } => pmem_tool::verify(&input).map(|verification| {
            println!(
                "check value: stored 0x{:08X}, computed 0x{:08X}",
                verification.stored_check_value, verification.computed_check_value
            );
            println!("structure version: 0x{:08X}", verification.structure_version);
            if verification.restorable() {
                println!("slot is valid and restorable");
                ExitCode::SUCCESS
            } else if verification.valid {
                println!("slot is valid but carries a foreign structure version");
                ExitCode::FAILURE
            } else {
                println!("slot is NOT valid");
                ExitCode::FAILURE
            }
        }),
        Commands::Init { output } => pmem_tool::write_defaults(&output).map(|()| {
            println!("wrote factory-default mirror: {}", output.display());
            ExitCode::SUCCESS
        }),
    };

    match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
