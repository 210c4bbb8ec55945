use crate::{
    RecipeError, Result,
    blend::ComposeMethod,
    operator::{OPERATORS, OperatorTemplate},
};
use derivative::Derivative;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

const BASIC_COMPOSE_METHODS: &[ComposeMethod] = &[
    ComposeMethod::Blend,
    ComposeMethod::Dissolve,
    ComposeMethod::Modulate,
    ComposeMethod::Displace,
    ComposeMethod::ChangeMask,
];

const EXTENDED_COMPOSE_METHODS: &[ComposeMethod] = &[
    ComposeMethod::Blend,
    ComposeMethod::Dissolve,
    ComposeMethod::Modulate,
    ComposeMethod::Displace,
    ComposeMethod::ChangeMask,
    ComposeMethod::Lighten,
    ComposeMethod::LightenIntensity,
    ComposeMethod::Darken,
    ComposeMethod::Difference,
    ComposeMethod::Multiply,
];

/// Named catalog flavour.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Five compose methods, one or two operators per recipe.
    #[default]
    Basic,
    /// Ten compose methods, milder displacement, two to seven operators.
    Extended,
}

/// Everything the generator samples from.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct Catalog {
    #[derivative(Default(value = "OPERATORS"))]
    operators: &'static [OperatorTemplate],

    #[derivative(Default(value = "BASIC_COMPOSE_METHODS"))]
    compose_methods: &'static [ComposeMethod],

    /// Upper bound (exclusive) of both `Displace` percentages.
    #[derivative(Default(value = "100"))]
    displace_scale: i64,

    /// `(lo, hi)` fed to `int(uniform(lo, hi))` for the operator count.
    #[derivative(Default(value = "(1, 3)"))]
    layer_range: (i64, i64),
}

impl Catalog {
    pub fn new(variant: Variant) -> Self {
        match variant {
            Variant::Basic => Self::default(),
            Variant::Extended => Self::default()
                .with_compose_methods(EXTENDED_COMPOSE_METHODS)
                .with_displace_scale(30)
                .with_layer_range((2, 8)),
        }
    }

    pub fn operators(&self) -> &'static [OperatorTemplate] {
        self.operators
    }

    pub fn compose_methods(&self) -> &'static [ComposeMethod] {
        self.compose_methods
    }

    pub fn displace_scale(&self) -> i64 {
        self.displace_scale
    }

    pub fn layer_range(&self) -> (i64, i64) {
        self.layer_range
    }

    pub fn validate(&self) -> Result<()> {
        if self.operators.is_empty() {
            return Err(RecipeError::EmptyCatalog("no operator templates".to_string()));
        }

        if self.compose_methods.is_empty() {
            return Err(RecipeError::EmptyCatalog("no compose methods".to_string()));
        }

        let (lo, hi) = self.layer_range;
        if lo < 1 || hi < lo {
            return Err(RecipeError::InvalidParameter(format!(
                "layer range ({lo}, {hi}) must satisfy 1 <= lo <= hi"
            )));
        }

        if self.displace_scale < 0 {
            return Err(RecipeError::InvalidParameter(format!(
                "displace scale {} is negative",
                self.displace_scale
            )));
        }

        Ok(())
    }
}

impl From<Variant> for Catalog {
    fn from(variant: Variant) -> Self {
        Self::new(variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_variant_names() {
        assert_eq!(Variant::from_str("extended").unwrap(), Variant::Extended);
        assert_eq!(Variant::Basic.to_string(), "basic");
        assert!(Variant::from_str("fancy").is_err());
    }

    #[test]
    fn test_basic_and_extended_share_operators() {
        let basic = Catalog::new(Variant::Basic);
        let extended = Catalog::new(Variant::Extended);

        assert_eq!(basic.operators().len(), extended.operators().len());
        assert_eq!(basic.compose_methods().len(), 5);
        assert_eq!(extended.compose_methods().len(), 10);
        assert_eq!(basic.displace_scale(), 100);
        assert_eq!(extended.displace_scale(), 30);
        assert!(basic.validate().is_ok());
        assert!(extended.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_layer_range() {
        let catalog = Catalog::default().with_layer_range((0, 3));
        assert!(matches!(
            catalog.validate(),
            Err(RecipeError::InvalidParameter(_))
        ));

        let catalog = Catalog::default().with_compose_methods(&[]);
        assert!(matches!(catalog.validate(), Err(RecipeError::EmptyCatalog(_))));
    }
}
