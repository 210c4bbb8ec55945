use crate::escape_html;
use cutil::fs::file_name;
use derivative::Derivative;
use derive_setters::Setters;
use std::path::{Path, PathBuf};

/// One image cell of a row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Thumbnail {
    /// `None` when the image failed to process.
    pub output: Option<PathBuf>,
    /// The normalized source shown on hover.
    pub original: Option<PathBuf>,
}

impl Thumbnail {
    pub fn new(output: impl Into<PathBuf>, original: impl Into<PathBuf>) -> Self {
        Self {
            output: Some(output.into()),
            original: Some(original.into()),
        }
    }

    pub fn missing() -> Self {
        Self::default()
    }

    /// Image sources are written relative to the report directory.
    pub(crate) fn to_cell(&self) -> String {
        let Some(output) = &self.output else {
            return r#"<td class="missing"></td>"#.to_string();
        };

        let src = relative_src(output);
        match &self.original {
            Some(original) => format!(
                r#"<td><a href="{src}"><img src="{src}" data-orig="{}"></a></td>"#,
                relative_src(original)
            ),
            None => format!(r#"<td><a href="{src}"><img src="{src}"></a></td>"#),
        }
    }
}

fn relative_src(path: &Path) -> String {
    escape_html(&file_name(path))
}

/// Summary of one trial.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ReportRow {
    pub index: usize,

    /// Recipe fragment.
    #[derivative(Default(value = "String::new()"))]
    pub filter: String,

    /// Blend fragment.
    #[derivative(Default(value = "String::new()"))]
    pub blend: String,

    /// Average seconds per image.
    #[derivative(Default(value = "0.0"))]
    pub avg_secs: f64,

    pub thumbnails: Vec<Thumbnail>,
}

impl ReportRow {
    pub fn new(index: usize) -> Self {
        Self::default().with_index(index)
    }

    pub(crate) fn to_html(&self) -> String {
        let cells = self
            .thumbnails
            .iter()
            .map(Thumbnail::to_cell)
            .collect::<Vec<_>>()
            .join("\n    ");

        format!(
            r#"
  <tr>
    <td style="font-size: 24px">{index}</td>
    <td style="width:320px">
      <div style="font-weight: bold">Filter:</div>
      {filter}
      <div style="font-weight: bold">Blend:</div>
      {blend}
      <div style="font-weight: bold">Avg. walltime:</div>
      {avg_secs} seconds/image
    </td>
    {cells}
  </tr>
"#,
            index = self.index,
            filter = escape_html(&self.filter),
            blend = escape_html(&self.blend),
            avg_secs = self.avg_secs,
        )
    }
}
