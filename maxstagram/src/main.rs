use clap::{CommandFactory, Parser};
use maxstagram::cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.images.is_empty() {
        _ = Cli::command().print_help();
        return ExitCode::FAILURE;
    }

    maxstagram::init_logger(cli.verbose);
    log::debug!("start...");

    match maxstagram::run(&cli) {
        Ok(report) => {
            log::info!("open {} to browse the results", report.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e:?}");
            ExitCode::FAILURE
        }
    }
}
