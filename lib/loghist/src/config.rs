//! Quantizer configuration.

use std::num::NonZeroU32;

use snafu::ensure;

use crate::error::{InvalidConfiguration, QuantizerError};

const DEFAULT_SCALE: f64 = 0.1;
const DEFAULT_SUBDIVISIONS: NonZeroU32 = match NonZeroU32::new(5) {
    Some(n) => n,
    None => unreachable!(),
};
const DEFAULT_BASE: f64 = 10.0;

/// Parameters shared by both bucketing schemes.
///
/// A configuration can only be constructed through [`QuantizerConfig::new`] (or deserialized, which goes through the
/// same validation), so holding one means its parameters are known to be valid:
///
/// - `scale` is finite and a normal float (at least [`f64::MIN_POSITIVE`])
/// - `subdivisions` is at least one
/// - `base` is finite and greater than one
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawQuantizerConfig"))]
pub struct QuantizerConfig {
    scale: f64,
    subdivisions: NonZeroU32,
    base: f64,
    allow_negative_indices: bool,
}

impl QuantizerConfig {
    /// Creates a new `QuantizerConfig`.
    ///
    /// Negative indices, which represent values below `scale`, are allowed by default. See
    /// [`with_negative_indices`][Self::with_negative_indices].
    ///
    /// # Errors
    ///
    /// If any parameter violates its constraint, an error is returned naming the parameter.
    pub fn new(scale: f64, subdivisions: u32, base: f64) -> Result<Self, QuantizerError> {
        ensure!(
            scale.is_finite() && scale >= f64::MIN_POSITIVE,
            InvalidConfiguration {
                parameter: "scale",
                reason: "must be finite and no smaller than the smallest normal float",
            }
        );
        ensure!(
            base.is_finite() && base > 1.0,
            InvalidConfiguration {
                parameter: "base",
                reason: "must be finite and greater than 1",
            }
        );
        let subdivisions = NonZeroU32::new(subdivisions).ok_or(QuantizerError::InvalidConfiguration {
            parameter: "subdivisions",
            reason: "must be at least 1",
        })?;

        Ok(Self {
            scale,
            subdivisions,
            base,
            allow_negative_indices: true,
        })
    }

    /// Sets whether negative bucket indices are allowed.
    ///
    /// When disallowed, computing the bound of a negative index fails, and so does computing the index of any value
    /// below `scale`.
    pub fn with_negative_indices(mut self, allow: bool) -> Self {
        self.allow_negative_indices = allow;
        self
    }

    /// Returns the value at index zero.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the number of bucket indices per decade.
    pub fn subdivisions(&self) -> u32 {
        self.subdivisions.get()
    }

    /// Returns the growth factor of a decade.
    pub fn base(&self) -> f64 {
        self.base
    }

    /// Returns `true` if negative bucket indices are allowed.
    pub fn allows_negative_indices(&self) -> bool {
        self.allow_negative_indices
    }

    /// Returns `true` if the hybrid scheme's index and bound functions are inverses under this configuration.
    ///
    /// The hybrid scheme splits each decade linearly into `subdivisions` steps of `base / subdivisions` times the
    /// decade's start. When `subdivisions >= base`, the first steps land below the start of the decade, so some
    /// indices are never produced and bounds no longer map back to their own index.
    pub fn is_hybrid_invertible(&self) -> bool {
        f64::from(self.subdivisions.get()) < self.base
    }
}

impl Default for QuantizerConfig {
    /// Creates a configuration with a scale of 0.1, five subdivisions, and a base of 10.
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            subdivisions: DEFAULT_SUBDIVISIONS,
            base: DEFAULT_BASE,
            allow_negative_indices: true,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawQuantizerConfig {
    #[serde(default = "default_scale")]
    scale: f64,

    #[serde(default = "default_subdivisions")]
    subdivisions: u32,

    #[serde(default = "default_base")]
    base: f64,

    #[serde(default = "default_allow_negative_indices")]
    allow_negative_indices: bool,
}

#[cfg(feature = "serde")]
const fn default_scale() -> f64 {
    DEFAULT_SCALE
}

#[cfg(feature = "serde")]
const fn default_subdivisions() -> u32 {
    DEFAULT_SUBDIVISIONS.get()
}

#[cfg(feature = "serde")]
const fn default_base() -> f64 {
    DEFAULT_BASE
}

#[cfg(feature = "serde")]
const fn default_allow_negative_indices() -> bool {
    true
}

#[cfg(feature = "serde")]
impl TryFrom<RawQuantizerConfig> for QuantizerConfig {
    type Error = QuantizerError;

    fn try_from(raw: RawQuantizerConfig) -> Result<Self, Self::Error> {
        Ok(Self::new(raw.scale, raw.subdivisions, raw.base)?.with_negative_indices(raw.allow_negative_indices))
    }
}
