mod cli;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    // Initialize logger
    env_logger::init();

    if args.version {
        print!("{}", cli::version_text());
        return ExitCode::SUCCESS;
    }

    match cli::handle_args(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{:?}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
