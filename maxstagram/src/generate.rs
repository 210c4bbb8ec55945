//! One run: check the tool, prepare the output directory, normalize the
//! sources, then try `trials` random filters and record each in the report.

use crate::config::Config;
use cutil::{fs::prepare_empty_dir, time::round_secs};
use filter_recipe::{RecipeError, RecipeGenerator};
use html_report::{ReportError, ReportRow, ReportWriter, Thumbnail};
use image_processor::{CommandRunner, ImageProcessor, ProcessError, WallTimer};
use rand::rngs::StdRng;
use std::{io, path::PathBuf};

pub const REPORT_FILE: &str = "index.html";

pub type Result<T> = std::result::Result<T, GenerateError>;

#[derive(thiserror::Error, Debug)]
pub enum GenerateError {
    #[error("`{tool}` is not available. Install ImageMagick, e.g. `sudo apt install imagemagick`")]
    ToolMissing { tool: String },

    #[error("Prepare output directory `{}` failed: {err}", .dir.display())]
    OutputDir { dir: PathBuf, err: io::Error },

    #[error("{err}. See {diagnostics} for details")]
    Process { err: ProcessError, diagnostics: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Report(#[from] ReportError),
}

impl From<RecipeError> for GenerateError {
    fn from(e: RecipeError) -> Self {
        GenerateError::InvalidConfig(e.to_string())
    }
}

pub struct Pipeline<R: CommandRunner> {
    processor: ImageProcessor<R>,
    recipes: RecipeGenerator<StdRng>,
    report: ReportWriter,
    trials: usize,
}

impl<R: CommandRunner> Pipeline<R> {
    pub fn new(config: &Config, runner: R) -> Result<Self> {
        let processor = ImageProcessor::new(config.processor_config(), runner)
            .map_err(|e| GenerateError::InvalidConfig(e.to_string()))?;
        let recipes = RecipeGenerator::from_seed(config.variant, config.seed)?;

        Ok(Self {
            processor,
            recipes,
            report: config.report_writer(),
            trials: config.trials,
        })
    }

    pub fn processor(&self) -> &ImageProcessor<R> {
        &self.processor
    }

    /// Returns the path of the finished report.
    pub fn run(&mut self, images: &[PathBuf]) -> Result<PathBuf> {
        if !self.processor.tool_available() {
            return Err(GenerateError::ToolMissing {
                tool: self.processor.config().tool.clone(),
            });
        }

        let out_dir = self.processor.config().output_dir.clone();
        prepare_empty_dir(&out_dir).map_err(|err| GenerateError::OutputDir {
            dir: out_dir.clone(),
            err,
        })?;

        let sources = self.normalize_all(images)?;

        let mut report = self.report.start(out_dir.join(REPORT_FILE))?;
        let mut timer = WallTimer::new();
        for trial in 0..self.trials {
            let row = self.run_trial(trial, &sources, &mut timer)?;
            log::info!(
                "trial {}/{}: {} seconds/image",
                trial + 1,
                self.trials,
                row.avg_secs
            );
            report.append_row(&row)?;
        }

        Ok(report.finish()?)
    }

    fn normalize_all(&self, images: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut timer = WallTimer::new();
        let sources = images
            .iter()
            .map(|image| {
                self.processor
                    .normalize(image, &mut timer)
                    .map_err(|e| self.process_failed(e))
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "normalized {} images in {} seconds",
            sources.len(),
            round_secs(timer.elapsed().as_secs_f64(), 2)
        );
        Ok(sources)
    }

    fn run_trial(
        &mut self,
        trial: usize,
        sources: &[PathBuf],
        timer: &mut WallTimer,
    ) -> Result<ReportRow> {
        let recipe = self.recipes.generate_recipe();
        let blend = self.recipes.generate_blend();
        log::info!("[{trial}] filter: {recipe}");
        log::info!("[{trial}] blend: {blend}");

        timer.reset();
        let mut thumbnails = Vec::with_capacity(sources.len());
        for source in sources {
            let output = self
                .processor
                .process(source, &recipe, &blend, trial, timer)
                .map_err(|e| self.process_failed(e))?;
            thumbnails.push(Thumbnail::new(output, source.as_path()));
        }

        Ok(ReportRow::new(trial)
            .with_filter(recipe.to_string())
            .with_blend(blend.to_string())
            .with_avg_secs(timer.average_secs(sources.len()))
            .with_thumbnails(thumbnails))
    }

    fn process_failed(&self, err: ProcessError) -> GenerateError {
        GenerateError::Process {
            err,
            diagnostics: describe(&self.processor.runner().diagnostics()),
        }
    }
}

fn describe(files: &[PathBuf]) -> String {
    if files.is_empty() {
        return "the tool's output".to_string();
    }

    files
        .iter()
        .map(|f| f.display().to_string())
        .collect::<Vec<_>>()
        .join(" and ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(describe(&[]), "the tool's output");
        assert_eq!(
            describe(&[PathBuf::from("/tmp/IM.out"), PathBuf::from("/tmp/IM.err")]),
            "/tmp/IM.out and /tmp/IM.err"
        );
    }

    #[test]
    fn test_process_error_message() {
        let err = GenerateError::Process {
            err: ProcessError::Composite {
                image: PathBuf::from("output/orig-cat.jpg.jpg"),
                code: 1,
            },
            diagnostics: describe(&[PathBuf::from("/tmp/IM.err")]),
        };
        assert_eq!(
            err.to_string(),
            "Composite for `output/orig-cat.jpg.jpg` failed with exit code 1. See /tmp/IM.err for details"
        );
    }
}
