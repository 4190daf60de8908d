//! Folio command-line shell.

use clap::Parser;
use folio_app::CliArgs;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting Folio");

    let args = CliArgs::parse();
    match folio_app::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("folio: {e}");
            ExitCode::FAILURE
        }
    }
}
