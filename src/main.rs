use anyhow::Result;
use clap::Parser;
use std::process;

use whisper_transcriber::cli::{self, Cli, Commands};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Transcribe(args) => cli::transcribe::run(args),
        Commands::Models(args) => cli::models::run(args),
    }
}
