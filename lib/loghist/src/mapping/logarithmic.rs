//! Pure logarithmic index mapping.

use super::{IndexMapping, Scheme};
use crate::{
    config::QuantizerConfig,
    decade::{to_index, DecadeScale},
    error::QuantizerError,
};

/// Index mapping with buckets evenly spaced in log-space.
///
/// Maps values to indices using `index = floor(subdivisions * log_base(value / scale))`, and back using
/// `lower_bound = scale * base^(index / subdivisions)`. Adjacent bucket bounds are always a factor of
/// `base^(1 / subdivisions)` apart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogarithmicMapping {
    scale: DecadeScale,
}

impl LogarithmicMapping {
    /// Creates a new `LogarithmicMapping` with the given configuration.
    pub fn new(config: QuantizerConfig) -> Self {
        Self {
            scale: DecadeScale::new(config),
        }
    }

    /// Returns the configuration of this mapping.
    pub fn config(&self) -> &QuantizerConfig {
        self.scale.config()
    }
}

impl IndexMapping for LogarithmicMapping {
    fn scheme(&self) -> Scheme {
        Scheme::Logarithmic
    }

    fn index(&self, value: f64) -> Result<i64, QuantizerError> {
        // floor(n * (d + f)) == n * d + floor(n * f) for an integer decade `d`.
        let position = self.scale.position(value)?;
        let offset = (self.scale.subdivisions() as f64 * position.fraction).floor();
        let offset = to_index(offset, "index", value)?;

        self.scale.join(position.decade, offset, value)
    }

    fn lower_bound(&self, index: i64) -> Result<f64, QuantizerError> {
        let (decade, offset) = self.scale.split(index)?;
        let exponent = offset as f64 / self.scale.subdivisions() as f64;

        self.scale.compose(decade, exponent, index)
    }
}
