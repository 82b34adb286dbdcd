use clap::Parser;
use tidemark::cli::commands::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = tidemark::cli::run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
