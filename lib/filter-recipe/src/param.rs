use rand::{Rng, seq::IndexedRandom};
use std::fmt;

/// A parameter slot inside an operator template.
///
/// The slot kind is fixed when the catalog is defined and carries its own
/// sampling rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamSlot {
    /// Uniform choice among a fixed set of labels.
    StringChoice(&'static [&'static str]),
    /// Uniform over `[lo, hi]`, rounded to 2 decimal places.
    FloatRange(f64, f64),
    /// Uniform over the real interval `[lo, hi)`, truncated toward zero.
    /// The upper bound is never produced.
    IntRange(i64, i64),
}

/// A resolved slot value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Text(&'static str),
    Float(f64),
    Int(i64),
}

impl ParamSlot {
    pub fn sample<R: Rng>(&self, rng: &mut R) -> ParamValue {
        match *self {
            ParamSlot::StringChoice(labels) => {
                ParamValue::Text(labels.choose(rng).copied().unwrap_or_default())
            }
            ParamSlot::FloatRange(lo, hi) => ParamValue::Float(sample_float(rng, lo, hi)),
            ParamSlot::IntRange(lo, hi) => ParamValue::Int(sample_truncated(rng, lo, hi)),
        }
    }

    /// Whether `value` could have been produced by this slot.
    pub fn contains(&self, value: &ParamValue) -> bool {
        match (*self, *value) {
            (ParamSlot::StringChoice(labels), ParamValue::Text(v)) => labels.contains(&v),
            (ParamSlot::FloatRange(lo, hi), ParamValue::Float(v)) => {
                v >= lo && v <= hi && round2(v) == v
            }
            (ParamSlot::IntRange(lo, hi), ParamValue::Int(v)) => {
                if lo < hi {
                    v >= lo && v < hi
                } else {
                    v == lo
                }
            }
            _ => false,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Int(v) => write!(f, "{v}"),
        }
    }
}

/// `int(uniform(lo, hi))`: uniform over the real interval, truncated toward zero.
pub fn sample_truncated<R: Rng>(rng: &mut R, lo: i64, hi: i64) -> i64 {
    if lo >= hi {
        return lo;
    }

    rng.random_range(lo as f64..hi as f64).trunc() as i64
}

fn sample_float<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if lo >= hi {
        return round2(lo);
    }

    round2(rng.random_range(lo..=hi)).clamp(lo, hi)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
