use crate::{
    ProcessError, Result, command::ImCommand, runner::CommandRunner, timer::WallTimer,
};
use cutil::fs::{file_name, file_name_without_image_ext, join_file_name};
use derivative::Derivative;
use derive_setters::Setters;
use filter_recipe::{BlendSpec, FilterRecipe};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Tool name, output location and encoding settings.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ProcessorConfig {
    /// External tool, `convert` or `magick`.
    #[derivative(Default(value = "\"convert\".to_string()"))]
    pub tool: String,

    #[derivative(Default(value = "PathBuf::from(\"output\")"))]
    pub output_dir: PathBuf,

    /// Side of the square output image.
    #[derivative(Default(value = "640"))]
    pub out_dim: u32,

    /// JPEG quality of the final output.
    #[derivative(Default(value = "75"))]
    pub quality: u32,

    /// Side of the square normalized source.
    #[derivative(Default(value = "640"))]
    pub source_dim: u32,

    #[derivative(Default(value = "98"))]
    pub source_quality: u32,
}

impl ProcessorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tool.trim().is_empty() {
            return Err(ProcessError::InvalidParameter("empty tool name".to_string()));
        }

        if self.out_dim == 0 || self.source_dim == 0 {
            return Err(ProcessError::InvalidParameter(format!(
                "dimensions must be positive, got {} and {}",
                self.out_dim, self.source_dim
            )));
        }

        if !(1..=100).contains(&self.quality) || !(1..=100).contains(&self.source_quality) {
            return Err(ProcessError::InvalidParameter(format!(
                "quality must be within 1..=100, got {} and {}",
                self.quality, self.source_quality
            )));
        }

        Ok(())
    }
}

/// Applies recipes to images through a [`CommandRunner`].
#[derive(Debug)]
pub struct ImageProcessor<R: CommandRunner> {
    config: ProcessorConfig,
    runner: R,
}

impl<R: CommandRunner> ImageProcessor<R> {
    pub fn new(config: ProcessorConfig, runner: R) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, runner })
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Whether `<tool> -version` exits cleanly.
    pub fn tool_available(&self) -> bool {
        let cmd = ImCommand::new(&self.config.tool).arg("-version");
        self.runner.run(&cmd, &mut WallTimer::new()) == 0
    }

    /// `orig-<file name>.jpg`, spaces replaced by underscores.
    pub fn normalized_path(&self, input: &Path) -> PathBuf {
        let name = file_name(input).replace(' ', "_");
        join_file_name(&self.config.output_dir, &["orig-", &name, ".jpg"])
    }

    /// `fx-<trial>-<base>.png`
    pub fn effect_layer_path(&self, trial: usize, image: &Path) -> PathBuf {
        let base = file_name_without_image_ext(image);
        join_file_name(
            &self.config.output_dir,
            &["fx-", &trial.to_string(), "-", &base, ".png"],
        )
    }

    /// `img-<trial>-<base>.jpg`
    pub fn output_path(&self, trial: usize, image: &Path) -> PathBuf {
        let base = file_name_without_image_ext(image);
        join_file_name(
            &self.config.output_dir,
            &["img-", &trial.to_string(), "-", &base, ".jpg"],
        )
    }

    /// Crops `input` to a centered square thumbnail in the output directory.
    pub fn normalize(&self, input: &Path, timer: &mut WallTimer) -> Result<PathBuf> {
        let out_file = self.normalized_path(input);
        let dim = self.config.source_dim;

        let cmd = ImCommand::new(&self.config.tool)
            .arg_path(input)
            .fragment("-auto-level -auto-orient")
            .arg("-thumbnail")
            .arg(format!("{dim}x{dim}^"))
            .fragment("-gravity center")
            .arg("-extent")
            .arg(format!("{dim}x{dim}"))
            .arg("-quality")
            .arg(self.config.source_quality.to_string())
            .arg_path(&out_file);

        match self.runner.run(&cmd, timer) {
            0 => Ok(out_file),
            code => {
                log::error!("normalize failed ({code}): {cmd}");
                Err(ProcessError::Normalize {
                    input: input.to_path_buf(),
                    code,
                })
            }
        }
    }

    /// Builds the effect layer from `recipe`, composites it onto `image` with
    /// `blend`, then resizes and encodes the result.
    ///
    /// The effect layer is removed on success only.
    pub fn process(
        &self,
        image: &Path,
        recipe: &FilterRecipe,
        blend: &BlendSpec,
        trial: usize,
        timer: &mut WallTimer,
    ) -> Result<PathBuf> {
        let fx_file = self.effect_layer_path(trial, image);
        let out_file = self.output_path(trial, image);

        let fx_cmd = ImCommand::new(&self.config.tool)
            .arg_path(image)
            .fragment(recipe.to_string())
            .arg_path(&fx_file);

        let code = self.runner.run(&fx_cmd, timer);
        if code != 0 {
            log::error!("effect layer failed ({code}): {fx_cmd}");
            return Err(ProcessError::EffectLayer {
                image: image.to_path_buf(),
                code,
            });
        }

        let dim = self.config.out_dim;
        let mut composite_cmd = ImCommand::new(&self.config.tool)
            .arg_path(&fx_file)
            .arg_path(image);
        for token in blend.to_tokens() {
            composite_cmd = composite_cmd.arg(token);
        }
        let composite_cmd = composite_cmd
            .arg("-resize")
            .arg(format!("{dim}x{dim}"))
            .arg("-normalize")
            .arg("-quality")
            .arg(self.config.quality.to_string())
            .arg_path(&out_file);

        let code = self.runner.run(&composite_cmd, timer);
        if code != 0 {
            log::error!("composite failed ({code}): {composite_cmd}");
            return Err(ProcessError::Composite {
                image: image.to_path_buf(),
                code,
            });
        }

        if let Err(e) = fs::remove_file(&fx_file) {
            log::warn!("remove {} failed: {e}", fx_file.display());
        }

        Ok(out_file)
    }
}
