//! HTML gallery of filter trials.
//!
//! `start` -> `append_row`* -> `finish`, each step opening and closing the
//! file on its own. A run that dies half way leaves a page that still renders
//! every completed row.

mod row;
mod writer;

pub use row::{ReportRow, Thumbnail};
pub use writer::{OpenReport, ReportWriter};

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Escapes the five HTML special characters.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
