//! # CUtil - Common Utilities Library
//!
//! A collection of utility modules shared by the workspace crates.
//!
//! ## Features
//!
//! - `fs`: File system utilities (output directory preparation, file name helpers)
//! - `time`: Time formatting utilities

#[cfg(feature = "fs")]
pub mod fs;

#[cfg(feature = "time")]
pub mod time;
