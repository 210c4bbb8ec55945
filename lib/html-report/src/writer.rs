use crate::{Result, escape_html, row::ReportRow};
use derivative::Derivative;
use derive_setters::Setters;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

const STYLE: &str = r#"
  <style type="text/css">
  body {
    font-family: Verdana, Arial;
  }
  table {
    border: solid 1px black;
    font-size: 10px;
  }
  td {
    border: dashed 1px gray;
  }
  td.missing {
    background: #eee;
  }
  img {
    width: {thumb}px;
    height: {thumb}px;
  }
  </style>"#;

// Hovering a thumbnail swaps in the normalized source for comparison.
const HOVER_SCRIPT: &str = r#"
  <script>
    document.addEventListener('DOMContentLoaded', function () {
      document.querySelectorAll('img[data-orig]').forEach(function (img) {
        var filtered = img.getAttribute('src');
        img.addEventListener('mouseenter', function () { img.src = img.dataset.orig; });
        img.addEventListener('mouseleave', function () { img.src = filtered; });
      });
    });
  </script>"#;

const FOOTER: &str = r#"
</table>
</body>
</html>
"#;

/// Report settings. [`ReportWriter::start`] creates the file.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ReportWriter {
    #[derivative(Default(value = "\"Maxstagram Randomly Generated Filter Preview\".to_string()"))]
    pub title: String,

    /// Thumbnail edge in CSS pixels.
    #[derivative(Default(value = "320"))]
    pub thumb_size: u32,
}

impl ReportWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Truncates or creates `path` and writes the page header.
    pub fn start(&self, path: impl AsRef<Path>) -> Result<OpenReport> {
        let path = path.as_ref().to_path_buf();
        let title = escape_html(&self.title);
        let style = STYLE.replace("{thumb}", &self.thumb_size.to_string());

        let header = format!(
            r#"
<!doctype html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>{style}{HOVER_SCRIPT}
</head>
<body>
<h1>{title}</h1>
<table>
  <tr>
    <td>#</td>
    <td>Parameters</td>
    <td>Images</td>
  </tr>
"#
        );

        fs::write(&path, header)?;
        log::debug!("report started: {}", path.display());

        Ok(OpenReport { path, rows: 0 })
    }
}

/// A started report. Rows can be appended until [`OpenReport::finish`]
/// consumes it.
#[derive(Debug)]
pub struct OpenReport {
    path: PathBuf,
    rows: usize,
}

impl OpenReport {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn append_row(&mut self, row: &ReportRow) -> Result<()> {
        self.append(&row.to_html())?;
        self.rows += 1;
        Ok(())
    }

    /// Writes the footer and returns the report path.
    pub fn finish(self) -> Result<PathBuf> {
        self.append(FOOTER)?;
        log::debug!("report finished: {} ({} rows)", self.path.display(), self.rows);
        Ok(self.path)
    }

    fn append(&self, text: &str) -> Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(text.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_start_truncates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "stale content").unwrap();

        let report = ReportWriter::new().with_thumb_size(200).start(&path).unwrap();
        let text = fs::read_to_string(report.path()).unwrap();

        assert!(!text.contains("stale content"));
        assert!(text.contains("<title>Maxstagram Randomly Generated Filter Preview</title>"));
        assert!(text.contains("width: 200px;"));
        assert_eq!(report.rows(), 0);
    }

    #[test]
    fn test_append_requires_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.html");
        let mut report = ReportWriter::new().start(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(report.append_row(&ReportRow::new(0)).is_err());
        assert_eq!(report.rows(), 0);
    }
}
