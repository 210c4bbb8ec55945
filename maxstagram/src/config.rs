use crate::cli::Cli;
use filter_recipe::Variant;
use html_report::ReportWriter;
use image_processor::ProcessorConfig;
use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Config {
    #[derivative(Default(value = "PathBuf::from(\"output\")"))]
    pub output_dir: PathBuf,

    #[derivative(Default(value = "400"))]
    pub trials: usize,

    pub variant: Variant,

    pub seed: Option<u64>,

    pub image: Image,

    pub report: Report,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Image {
    #[derivative(Default(value = "\"convert\".to_string()"))]
    pub tool: String,

    #[derivative(Default(value = "640"))]
    pub size: u32,

    #[derivative(Default(value = "75"))]
    pub quality: u32,

    #[derivative(Default(value = "640"))]
    pub source_size: u32,

    #[derivative(Default(value = "98"))]
    pub source_quality: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Report {
    #[derivative(Default(value = "\"Maxstagram Randomly Generated Filter Preview\".to_string()"))]
    pub title: String,

    #[derivative(Default(value = "320"))]
    pub thumb_size: u32,
}

impl Config {
    /// Reads `path`, falling back to the defaults when the file is missing
    /// or malformed.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match fs::read_to_string(path) {
            Ok(text) => match toml::from_str::<Config>(&text) {
                Ok(c) => {
                    debug!("{c:?}");
                    c
                }
                Err(e) => {
                    log::error!("parse {} failed, using defaults. {e}", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::error!("read {} failed, using defaults. {e}", path.display());
                Self::default()
            }
        }
    }

    /// Command line flags win over file values.
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(trials) = cli.trials {
            self.trials = trials;
        }
        if let Some(variant) = cli.variant {
            self.variant = variant;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if let Some(tool) = &cli.tool {
            self.image.tool = tool.clone();
        }
        if let Some(size) = cli.size {
            self.image.size = size;
        }
        if let Some(quality) = cli.quality {
            self.image.quality = quality;
        }
        self
    }

    pub fn processor_config(&self) -> ProcessorConfig {
        ProcessorConfig::default()
            .with_tool(self.image.tool.clone())
            .with_output_dir(self.output_dir.clone())
            .with_out_dim(self.image.size)
            .with_quality(self.image.quality)
            .with_source_dim(self.image.source_size)
            .with_source_quality(self.image.source_quality)
    }

    pub fn report_writer(&self) -> ReportWriter {
        ReportWriter::new()
            .with_title(self.report.title.clone())
            .with_thumb_size(self.report.thumb_size)
    }
}
