use clap::Parser;
use filter_recipe::Variant;
use std::path::PathBuf;

#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "maxstagram",
    author,
    version,
    about = "Apply randomly generated ImageMagick filters to photos and preview them in an HTML gallery"
)]
pub struct Cli {
    /// Source images (jpg/png)
    pub images: Vec<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output directory, emptied before every run [default: output]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Number of filters to try [default: 400]
    #[arg(short = 'n', long)]
    pub trials: Option<usize>,

    /// Catalog flavour: basic or extended [default: basic]
    #[arg(long)]
    pub variant: Option<Variant>,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// ImageMagick executable [default: convert]
    #[arg(long)]
    pub tool: Option<String>,

    /// Side of the square output images [default: 640]
    #[arg(long)]
    pub size: Option<u32>,

    /// JPEG quality of the output images [default: 75]
    #[arg(long)]
    pub quality: Option<u32>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::try_parse_from([
            "maxstagram",
            "--variant",
            "extended",
            "-n",
            "5",
            "--seed",
            "42",
            "-o",
            "gallery",
            "a.jpg",
            "b.png",
        ])
        .unwrap();

        assert_eq!(cli.images, vec![PathBuf::from("a.jpg"), PathBuf::from("b.png")]);
        assert_eq!(cli.variant, Some(Variant::Extended));
        assert_eq!(cli.trials, Some(5));
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.output_dir, Some(PathBuf::from("gallery")));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_no_images_parses_empty() {
        let cli = Cli::try_parse_from(["maxstagram", "-v"]).unwrap();
        assert!(cli.images.is_empty());
        assert!(cli.verbose);
    }

    #[test]
    fn test_unknown_variant_rejected() {
        assert!(Cli::try_parse_from(["maxstagram", "--variant", "fancy", "a.jpg"]).is_err());
    }
}
