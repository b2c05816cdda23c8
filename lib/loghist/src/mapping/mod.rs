//! Index mappings.

use std::{fmt, ops::Range, str::FromStr};

use crate::error::{QuantizerError, UnknownScheme};

mod hybrid;
pub use self::hybrid::HybridMapping;

mod logarithmic;
pub use self::logarithmic::LogarithmicMapping;

/// A bucketing scheme.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Scheme {
    /// Logarithmic across decades, linear within each decade.
    Hybrid,

    /// Uniform spacing in log-space.
    Logarithmic,
}

impl Scheme {
    /// Returns the name used for this scheme in bucketing descriptors.
    pub fn descriptor_name(&self) -> &'static str {
        match self {
            Self::Hybrid => "logRegular",
            Self::Logarithmic => "log",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor_name())
    }
}

impl FromStr for Scheme {
    type Err = QuantizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "log" => Ok(Self::Logarithmic),
            // `logQuantile` is the deprecated name of `logRegular`.
            "logRegular" | "logQuantile" => Ok(Self::Hybrid),
            _ => UnknownScheme { name: s }.fail(),
        }
    }
}

/// Maps positive values to bucket indices and bucket indices back to values.
///
/// Implementations are stateless: every method is a pure function of its argument and the mapping's configuration.
pub trait IndexMapping: Send + Sync {
    /// Returns the scheme this mapping implements.
    fn scheme(&self) -> Scheme;

    /// Returns the index of the bucket holding `value`.
    ///
    /// # Errors
    ///
    /// If `value` is not finite and greater than zero, or its index is negative while negative indices are disabled,
    /// an error is returned.
    fn index(&self, value: f64) -> Result<i64, QuantizerError>;

    /// Returns the lower bound of the bucket at `index`.
    ///
    /// # Errors
    ///
    /// If `index` is negative while negative indices are disabled, or the bound is not representable as a positive,
    /// finite float, an error is returned.
    fn lower_bound(&self, index: i64) -> Result<f64, QuantizerError>;

    /// Returns the lower bound of the bucket holding `value`.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`index`][Self::index] and [`lower_bound`][Self::lower_bound].
    fn lower_bound_of(&self, value: f64) -> Result<f64, QuantizerError> {
        self.lower_bound(self.index(value)?)
    }

    /// Returns the range of values covered by the bucket holding `value`.
    ///
    /// The range runs from the bucket's lower bound up to, but excluding, the lower bound of the next bucket. Rounding
    /// can leave `value` a hair outside of the computed bounds, in which case the offending end is moved so that the
    /// range still contains `value`.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`lower_bound_of`][Self::lower_bound_of], and additionally if the next
    /// bucket's bound cannot be computed.
    fn bucket_bounds(&self, value: f64) -> Result<Range<f64>, QuantizerError> {
        let index = self.index(value)?;
        let next = index.checked_add(1).ok_or(QuantizerError::NumericDegeneracy {
            operation: "index",
            input: value,
        })?;

        let mut start = self.lower_bound(index)?;
        let mut end = self.lower_bound(next)?;
        if start > value {
            start = value;
        }
        if end <= value {
            end = next_up(value);
        }

        Ok(start..end)
    }
}

/// Smallest float strictly greater than a finite, positive `value`.
fn next_up(value: f64) -> f64 {
    f64::from_bits(value.to_bits() + 1)
}
