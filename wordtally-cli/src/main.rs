//! Command-line entry point for wordtally

use clap::Parser;
use wordtally_cli::commands::Cli;
use wordtally_cli::exit_code;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = cli.execute() {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_code(&err));
    }
}
