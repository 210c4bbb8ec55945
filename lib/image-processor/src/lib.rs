//! Drives an ImageMagick-compatible command-line tool.
//!
//! - [`command`]: argument lists for the external tool
//! - [`runner`]: executes a command, reporting only its exit code and wall time
//! - [`timer`]: the wall-clock accumulator threaded through every run
//! - [`processor`]: normalizes sources and applies recipe + blend to them

pub mod command;
pub mod processor;
pub mod runner;
pub mod timer;

pub use command::ImCommand;
pub use processor::{ImageProcessor, ProcessorConfig};
pub use runner::{CommandRunner, ProcessRunner};
pub use timer::WallTimer;

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, ProcessError>;

/// A failed external invocation. The tool's own diagnostics are in the
/// runner's capture files.
#[derive(thiserror::Error, Debug)]
pub enum ProcessError {
    #[error("Normalize `{}` failed with exit code {code}", .input.display())]
    Normalize { input: PathBuf, code: i32 },

    #[error("Effect layer for `{}` failed with exit code {code}", .image.display())]
    EffectLayer { image: PathBuf, code: i32 },

    #[error("Composite for `{}` failed with exit code {code}", .image.display())]
    Composite { image: PathBuf, code: i32 },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
