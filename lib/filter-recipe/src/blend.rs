use crate::param::sample_truncated;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// ImageMagick `-compose` methods the generator knows how to parameterise.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
pub enum ComposeMethod {
    Blend,
    Dissolve,
    Modulate,
    Displace,
    ChangeMask,
    Lighten,
    #[strum(to_string = "Lighten_Intensity")]
    #[serde(rename = "Lighten_Intensity")]
    LightenIntensity,
    Darken,
    Difference,
    Multiply,
}

impl ComposeMethod {
    /// Samples the `compose:args` value for this method.
    ///
    /// `Blend` and `Dissolve` take a source percentage, `Modulate` a
    /// brightness and saturation percentage, `Displace` an X and Y scale
    /// percentage bounded by `displace_scale`. The others take none.
    pub fn sample_args<R: Rng>(&self, rng: &mut R, displace_scale: i64) -> String {
        match self {
            ComposeMethod::Blend | ComposeMethod::Dissolve => {
                sample_truncated(rng, 0, 200).to_string()
            }
            ComposeMethod::Modulate => format!(
                "{}x{}",
                sample_truncated(rng, 0, 200),
                sample_truncated(rng, 0, 200)
            ),
            ComposeMethod::Displace => format!(
                "{}x{}%",
                sample_truncated(rng, 0, displace_scale),
                sample_truncated(rng, 0, displace_scale)
            ),
            _ => String::new(),
        }
    }
}

/// How the effect layer is recombined with the original image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlendSpec {
    method: ComposeMethod,
    args: String,
    fuzz: Option<u32>,
}

impl BlendSpec {
    /// A blend with explicit compose arguments and no fuzz factor.
    pub fn new(method: ComposeMethod, args: impl Into<String>) -> Self {
        Self {
            method,
            args: args.into(),
            fuzz: None,
        }
    }

    pub fn sample<R: Rng>(method: ComposeMethod, rng: &mut R, displace_scale: i64) -> Self {
        let args = method.sample_args(rng, displace_scale);

        // ChangeMask needs its fuzz factor set before -composite runs.
        let fuzz = if method == ComposeMethod::ChangeMask {
            Some(sample_truncated(rng, 0, 100) as u32)
        } else {
            None
        };

        Self { method, args, fuzz }
    }

    pub fn method(&self) -> ComposeMethod {
        self.method
    }

    pub fn args(&self) -> &str {
        &self.args
    }

    pub fn fuzz(&self) -> Option<u32> {
        self.fuzz
    }

    /// `-compose <method> [-fuzz N%] -define compose:args=<args> -composite -auto-level`
    pub fn to_tokens(&self) -> Vec<String> {
        let mut tokens = vec!["-compose".to_string(), self.method.to_string()];

        if let Some(fuzz) = self.fuzz {
            tokens.push("-fuzz".to_string());
            tokens.push(format!("{fuzz}%"));
        }

        tokens.extend([
            "-define".to_string(),
            format!("compose:args={}", self.args),
            "-composite".to_string(),
            "-auto-level".to_string(),
        ]);

        tokens
    }
}

impl fmt::Display for BlendSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_tokens().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_method_names() {
        assert_eq!(ComposeMethod::LightenIntensity.to_string(), "Lighten_Intensity");
        assert_eq!(
            ComposeMethod::from_str("Lighten_Intensity").unwrap(),
            ComposeMethod::LightenIntensity
        );
        assert_eq!(ComposeMethod::ChangeMask.as_ref(), "ChangeMask");
        assert_eq!(ComposeMethod::iter().count(), 10);
    }

    #[test]
    fn test_fixed_blend_fragment() {
        let blend = BlendSpec::new(ComposeMethod::Blend, "50");
        assert_eq!(
            blend.to_string(),
            "-compose Blend -define compose:args=50 -composite -auto-level"
        );
    }

    #[test]
    fn test_change_mask_has_fuzz() {
        let mut rng = StdRng::seed_from_u64(9);
        let blend = BlendSpec::sample(ComposeMethod::ChangeMask, &mut rng, 100);
        let fuzz = blend.fuzz().unwrap();

        assert!(fuzz < 100);
        assert_eq!(blend.args(), "");
        assert!(
            blend
                .to_string()
                .starts_with(&format!("-compose ChangeMask -fuzz {fuzz}% -define compose:args= "))
        );
    }

    #[test]
    fn test_displace_respects_scale() {
        let mut rng = StdRng::seed_from_u64(10);
        for _ in 0..200 {
            let args = ComposeMethod::Displace.sample_args(&mut rng, 30);
            let (x, y) = args.strip_suffix('%').unwrap().split_once('x').unwrap();
            assert!((0..30).contains(&x.parse::<i64>().unwrap()));
            assert!((0..30).contains(&y.parse::<i64>().unwrap()));
        }
    }

    #[test]
    fn test_argumentless_methods() {
        let mut rng = StdRng::seed_from_u64(11);
        for method in [
            ComposeMethod::Lighten,
            ComposeMethod::LightenIntensity,
            ComposeMethod::Darken,
            ComposeMethod::Difference,
            ComposeMethod::Multiply,
        ] {
            let blend = BlendSpec::sample(method, &mut rng, 30);
            assert_eq!(blend.args(), "");
            assert_eq!(blend.fuzz(), None);
        }
    }
}
