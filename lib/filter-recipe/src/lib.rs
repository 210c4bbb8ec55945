//! Random ImageMagick filter recipes.
//!
//! A recipe is an ordered chain of operators (`-blur 0x2.5`, `-colorspace Lab`,
//! ...) sampled from a static catalog of templates, plus a blend fragment
//! telling `convert` how to composite the resulting effect layer back onto the
//! original image.
//!
//! ```
//! use filter_recipe::{RecipeGenerator, Variant};
//!
//! let mut generator = RecipeGenerator::from_seed(Variant::Basic, Some(7)).unwrap();
//! let recipe = generator.generate_recipe();
//! let blend = generator.generate_blend();
//! println!("convert in.jpg {recipe} fx.png");
//! println!("convert fx.png in.jpg {blend} out.jpg");
//! ```

pub mod blend;
pub mod catalog;
pub mod generator;
pub mod operator;
pub mod param;

pub use blend::{BlendSpec, ComposeMethod};
pub use catalog::{Catalog, Variant};
pub use generator::RecipeGenerator;
pub use operator::{FilterRecipe, OperatorTemplate, SampledOperator, Token};
pub use param::{ParamSlot, ParamValue};

pub type Result<T> = std::result::Result<T, RecipeError>;

#[derive(thiserror::Error, Debug)]
pub enum RecipeError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Empty catalog: {0}")]
    EmptyCatalog(String),
}
