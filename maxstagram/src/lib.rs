//! Random photo filter generator.
//!
//! Samples ImageMagick filter recipes, applies each one to a batch of photos
//! through the `convert` command and collects the results in an HTML gallery.
//!
//! # Architecture
//! - [`cli`]: command line flags
//! - [`config`]: TOML configuration merged with the flags
//! - [`generate`]: the run itself, from tool check to finished report

#[macro_use]
extern crate derivative;

pub mod cli;
pub mod config;
pub mod generate;

use anyhow::{Context, Result, bail};
use cli::Cli;
use config::Config;
use generate::Pipeline;
use image_processor::ProcessRunner;
use std::path::PathBuf;

/// Initializes the logger.
///
/// Lines look like `[12:30:05 INFO generate.rs 88] message`. The level is
/// `info` unless `RUST_LOG` says otherwise; `verbose` forces `debug`.
pub fn init_logger(verbose: bool) {
    use std::io::Write;

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }

    builder
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = cutil::time::local_now("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

/// Runs every trial against `cli.images` and returns the report path.
pub fn run(cli: &Cli) -> Result<PathBuf> {
    if cli.images.is_empty() {
        bail!("no input images");
    }

    let config = Config::load(cli.config.as_deref()).merge_cli(cli);
    log::debug!("{config:?}");

    let mut pipeline =
        Pipeline::new(&config, ProcessRunner::new()).with_context(|| "invalid configuration")?;

    pipeline
        .run(&cli.images)
        .with_context(|| format!("generate filters for {} images failed", cli.images.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_rejects_empty_image_list() {
        let err = run(&Cli::default()).unwrap_err();
        assert_eq!(err.to_string(), "no input images");
    }
}
