//! Receta CLI — project convention recipes.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "receta",
    version,
    about = "Rust-native project convention recipes — declarative plugins, identity, and dependency pinning"
)]
struct Cli {
    #[command(subcommand)]
    command: receta::cli::Commands,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = receta::cli::dispatch(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
