use crate::param::{ParamSlot, ParamValue};
use rand::Rng;
use std::fmt;

const NOISE_TYPES: &[&str] = &["Gaussian", "Laplacian", "Multiplicative", "Poisson", "Impulse"];

const COLOR_SPACES: &[&str] = &[
    "XYZ", "Gray", "HWB", "Log", "YUV", "HSB", "Rec709Luma", "YIQ", "Lab", "YCC", "HSL", "CMYK",
    "OHTA", "YCbCr", "CMY",
];

const STATISTICS: &[&str] = &["Maximum", "Median", "Mean", "Mode", "Gradient", "Nonpeak"];

const COLORS: &[&str] = &[
    "RoyalBlue1",
    "darkcyan",
    "goldenrod",
    "firebrick",
    "DarkOrange",
    "Navy",
    "DarkGreen",
    "DodgerBlue",
    "Gold",
];

/// One element of an operator template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Lit(&'static str),
    Slot(ParamSlot),
}

const fn lit(s: &'static str) -> Token {
    Token::Lit(s)
}

const fn choice(labels: &'static [&'static str]) -> Token {
    Token::Slot(ParamSlot::StringChoice(labels))
}

const fn float(lo: f64, hi: f64) -> Token {
    Token::Slot(ParamSlot::FloatRange(lo, hi))
}

const fn int(lo: i64, hi: i64) -> Token {
    Token::Slot(ParamSlot::IntRange(lo, hi))
}

/// An immutable operator shape: literal tokens interleaved with parameter slots.
#[derive(Debug, PartialEq)]
pub struct OperatorTemplate {
    tokens: &'static [Token],
}

impl OperatorTemplate {
    const fn new(tokens: &'static [Token]) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &'static [Token] {
        self.tokens
    }

    /// The leading ImageMagick flag, e.g. `-blur`.
    pub fn flag(&self) -> &'static str {
        match self.tokens.first() {
            Some(Token::Lit(flag)) => *flag,
            _ => "",
        }
    }

    pub fn sample<R: Rng>(&'static self, rng: &mut R) -> SampledOperator {
        let mut values = Vec::with_capacity(self.tokens.len());
        for token in self.tokens {
            values.push(match *token {
                Token::Lit(s) => ParamValue::Text(s),
                Token::Slot(slot) => slot.sample(rng),
            });
        }

        SampledOperator {
            template: self,
            values,
        }
    }
}

/// An operator template with every slot resolved.
///
/// `values` is aligned with the template tokens; literals resolve to themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledOperator {
    template: &'static OperatorTemplate,
    values: Vec<ParamValue>,
}

impl SampledOperator {
    pub fn template(&self) -> &'static OperatorTemplate {
        self.template
    }

    pub fn values(&self) -> &[ParamValue] {
        &self.values
    }

    /// The command-line fragment, tokens concatenated in order.
    pub fn to_fragment(&self) -> String {
        self.values.iter().map(|v| v.to_string()).collect()
    }
}

impl fmt::Display for SampledOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fragment())
    }
}

/// An ordered chain of sampled operators, applied in sequence to build the
/// effect layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterRecipe {
    operators: Vec<SampledOperator>,
}

impl FilterRecipe {
    pub fn new(operators: Vec<SampledOperator>) -> Self {
        Self { operators }
    }

    pub fn operators(&self) -> &[SampledOperator] {
        &self.operators
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl fmt::Display for FilterRecipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.operators.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

// Ranges are tuned for looks versus CPU cost; some combinations are still slow.
pub static OPERATORS: &[OperatorTemplate] = &[
    OperatorTemplate::new(&[lit("-adaptive-blur"), lit(" "), float(1.5, 5.0)]),
    OperatorTemplate::new(&[lit("-adaptive-sharpen"), lit(" "), float(1.5, 5.0)]),
    OperatorTemplate::new(&[lit("-auto-gamma")]),
    OperatorTemplate::new(&[lit("-auto-level")]),
    OperatorTemplate::new(&[lit("-blue-shift"), lit(" "), float(1.5, 5.0)]),
    OperatorTemplate::new(&[lit("-blur"), lit(" "), lit("0x"), float(1.0, 5.0)]),
    OperatorTemplate::new(&[
        lit("-blur"),
        lit(" "),
        lit("0x"),
        float(1.0, 5.0),
        lit(" -paint "),
        int(1, 5),
    ]),
    OperatorTemplate::new(&[
        lit("-blur"),
        lit(" "),
        lit("0x3 -negate"),
        lit(" -edge "),
        int(1, 5),
        lit(" -negate"),
    ]),
    OperatorTemplate::new(&[
        lit("-brightness-contrast"),
        lit(" "),
        int(-50, 50),
        lit("x"),
        int(-50, 50),
        lit("%"),
    ]),
    OperatorTemplate::new(&[lit("-charcoal"), lit(" "), int(1, 10)]),
    OperatorTemplate::new(&[lit("-colorspace"), lit(" "), choice(COLOR_SPACES)]),
    OperatorTemplate::new(&[lit("-colorize"), lit(" "), int(0, 100)]),
    OperatorTemplate::new(&[
        lit("-colorize"),
        lit(" "),
        int(0, 100),
        lit(","),
        int(0, 100),
        lit(","),
        int(0, 100),
    ]),
    OperatorTemplate::new(&[lit("-colors"), lit(" "), int(2, 50)]),
    OperatorTemplate::new(&[lit("-contrast")]),
    OperatorTemplate::new(&[
        lit("-contrast-stretch"),
        lit(" "),
        float(0.0, 0.5),
        lit("x"),
        float(0.0, 0.5),
        lit("%"),
    ]),
    OperatorTemplate::new(&[lit("-deskew"), lit(" "), int(0, 40)]),
    OperatorTemplate::new(&[lit("-despeckle")]),
    OperatorTemplate::new(&[lit("+dither")]),
    OperatorTemplate::new(&[lit("-edge"), lit(" "), int(1, 10)]),
    OperatorTemplate::new(&[lit("-emboss"), lit(" "), int(1, 5)]),
    OperatorTemplate::new(&[lit("-enhance")]),
    OperatorTemplate::new(&[lit("-equalize")]),
    OperatorTemplate::new(&[lit("-fill"), lit(" "), choice(COLORS), lit(" -tint "), int(0, 100)]),
    OperatorTemplate::new(&[lit("-gamma"), lit(" "), float(0.8, 2.3)]),
    OperatorTemplate::new(&[
        lit("-gamma"),
        lit(" "),
        float(0.8, 2.3),
        lit(","),
        float(0.8, 2.3),
        lit(","),
        float(0.8, 2.3),
    ]),
    OperatorTemplate::new(&[
        lit("-modulate"),
        lit(" "),
        int(0, 200),
        lit(","),
        int(0, 200),
        lit(","),
        int(0, 180),
    ]),
    OperatorTemplate::new(&[lit("-monochrome")]),
    OperatorTemplate::new(&[lit("-negate")]),
    OperatorTemplate::new(&[
        lit("+noise"),
        lit(" "),
        choice(NOISE_TYPES),
        lit(" -attenuate "),
        float(0.0, 0.7),
    ]),
    OperatorTemplate::new(&[lit("-normalize")]),
    OperatorTemplate::new(&[lit("-posterize"), lit(" "), int(1, 4)]),
    OperatorTemplate::new(&[lit("-quantize"), lit(" "), choice(COLOR_SPACES)]),
    OperatorTemplate::new(&[lit("-radial-blur"), lit(" "), float(0.0, 180.0)]),
    OperatorTemplate::new(&[lit("-raise"), lit(" "), int(0, 5)]),
    OperatorTemplate::new(&[lit("-sepia-tone"), lit(" "), float(50.0, 99.9)]),
    OperatorTemplate::new(&[
        lit("-sigmoidal-contrast"),
        lit(" "),
        float(0.5, 10.0),
        lit(","),
        int(30, 70),
        lit("%"),
    ]),
    OperatorTemplate::new(&[
        lit("+sigmoidal-contrast"),
        lit(" "),
        float(0.5, 10.0),
        lit(","),
        int(30, 70),
        lit("%"),
    ]),
    OperatorTemplate::new(&[lit("-sharpen"), lit(" "), int(0, 5)]),
    OperatorTemplate::new(&[lit("-sketch"), lit(" "), int(1, 5), lit("x"), int(1, 5)]),
    OperatorTemplate::new(&[
        lit("-statistic"),
        lit(" "),
        choice(STATISTICS),
        lit(" "),
        int(0, 5),
    ]),
    OperatorTemplate::new(&[lit("-swirl"), lit(" "), int(0, 180)]),
    OperatorTemplate::new(&[lit("-threshold"), lit(" "), int(0, 100), lit("%")]),
    OperatorTemplate::new(&[lit("-vignette"), lit(" 0x"), int(0, 50)]),
];

/// Looks up the first template whose leading flag is `flag`.
pub fn find_template(flag: &str) -> Option<&'static OperatorTemplate> {
    OPERATORS.iter().find(|t| t.flag() == flag)
}
