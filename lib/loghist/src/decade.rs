//! Decade/fraction decomposition shared by both bucketing schemes.

use snafu::ensure;

use crate::{
    config::QuantizerConfig,
    error::{InvalidValue, NegativeIndex, NumericDegeneracy, QuantizerError},
};

/// Upward nudge applied to the logarithm of `value / scale` before it is split.
///
/// Values sitting exactly on a bucket boundary, such as `scale * base^k`, can come out of the logarithm a hair below the
/// integer they should land on. This pushes them back over. The nudge is applied in natural-log space for bases above
/// `e`, and in base-log space otherwise, so a lower bound never overstates its value by more than a factor of
/// `e^EPSILON`. That must stay well below `1e-9`, the relative error the lower bound is allowed to overstate a value by.
const EPSILON: f64 = 1.0e-10;

const LARGEST_FRACTION: f64 = 1.0 - f64::EPSILON;

/// A value's position on the logarithmic axis, split into a whole decade and the fractional part within it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DecadePosition {
    /// The integer decade number, negative for values below `scale`.
    pub decade: i64,

    /// Position within the decade, in `[0, 1)`.
    pub fraction: f64,
}

/// The logarithmic axis defined by a configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DecadeScale {
    config: QuantizerConfig,

    // Cached so every logarithm is a single `ln` and a division.
    base_ln: f64,

    // `EPSILON` expressed in base-log units.
    nudge: f64,
}

impl DecadeScale {
    pub fn new(config: QuantizerConfig) -> Self {
        let base_ln = config.base().ln();
        Self {
            base_ln,
            nudge: EPSILON / base_ln.max(1.0),
            config,
        }
    }

    pub fn config(&self) -> &QuantizerConfig {
        &self.config
    }

    pub fn subdivisions(&self) -> i64 {
        i64::from(self.config.subdivisions())
    }

    pub fn base(&self) -> f64 {
        self.config.base()
    }

    /// Logarithm of `value` to the configured base.
    pub fn log(&self, value: f64) -> f64 {
        value.ln() / self.base_ln
    }

    /// Locates `value` on the axis.
    ///
    /// # Errors
    ///
    /// If `value` is not finite and positive, or its position cannot be represented, an error is returned.
    pub fn position(&self, value: f64) -> Result<DecadePosition, QuantizerError> {
        ensure!(value.is_finite() && value > 0.0, InvalidValue { value });

        let position = self.log(value / self.config.scale()) + self.nudge;
        ensure!(
            position.is_finite(),
            NumericDegeneracy {
                operation: "logarithm",
                input: value,
            }
        );

        let decade = position.floor();
        let fraction = (position - decade).clamp(0.0, LARGEST_FRACTION);

        Ok(DecadePosition {
            decade: to_index(decade, "decade", value)?,
            fraction,
        })
    }

    /// Joins a decade with an intra-decade offset into a bucket index, enforcing the negative index setting.
    pub fn join(&self, decade: i64, offset: i64, value: f64) -> Result<i64, QuantizerError> {
        let index = decade
            .checked_mul(self.subdivisions())
            .and_then(|whole| whole.checked_add(offset))
            .ok_or(QuantizerError::NumericDegeneracy {
                operation: "index",
                input: value,
            })?;
        self.check_index(index)
    }

    /// Splits a bucket index into its decade and its offset within that decade.
    ///
    /// The offset is always in `[0, subdivisions)`, including for negative indices.
    pub fn split(&self, index: i64) -> Result<(i64, i64), QuantizerError> {
        let index = self.check_index(index)?;
        let subdivisions = self.subdivisions();
        Ok((index.div_euclid(subdivisions), index.rem_euclid(subdivisions)))
    }

    /// Computes `scale * base^(decade + exponent)`.
    ///
    /// # Errors
    ///
    /// If the result overflows to infinity or underflows to zero, an error is returned.
    pub fn compose(&self, decade: i64, exponent: f64, index: i64) -> Result<f64, QuantizerError> {
        let bound = self.config.scale() * self.base().powf(decade as f64 + exponent);
        ensure!(
            bound.is_finite() && bound > 0.0,
            NumericDegeneracy {
                operation: "bound",
                input: index as f64,
            }
        );
        Ok(bound)
    }

    fn check_index(&self, index: i64) -> Result<i64, QuantizerError> {
        ensure!(index >= 0 || self.config.allows_negative_indices(), NegativeIndex { index });
        Ok(index)
    }
}

/// Converts an already-floored float into an index, failing if it does not fit.
pub(crate) fn to_index(floored: f64, operation: &'static str, input: f64) -> Result<i64, QuantizerError> {
    // `i64::MAX as f64` rounds up to 2^63, which is itself out of range, hence the strict upper comparison.
    ensure!(
        floored >= i64::MIN as f64 && floored < i64::MAX as f64,
        NumericDegeneracy { operation, input }
    );
    Ok(floored as i64)
}
