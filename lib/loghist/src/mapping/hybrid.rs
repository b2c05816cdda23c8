//! Hybrid decade/linear index mapping.

use super::{IndexMapping, Scheme};
use crate::{
    config::QuantizerConfig,
    decade::{to_index, DecadeScale},
    error::QuantizerError,
};

/// Index mapping that is logarithmic across decades and linear within them.
///
/// Each decade `[scale * base^d, scale * base^(d+1))` is divided into `subdivisions` buckets. The first bucket starts at
/// the decade's start, and bucket `r > 0` starts at `r * base / subdivisions` times the decade's start. With the default
/// configuration (scale 0.1, five subdivisions, base 10), the decade starting at 1 has buckets starting at 1, 2, 4, 6,
/// and 8.
///
/// Compared to [`LogarithmicMapping`][super::LogarithmicMapping], bucket widths within a decade are close to equal in
/// absolute terms, rather than crowding towards the top of the decade.
///
/// Bucket bounds only map back to their own index when `subdivisions < base`. See
/// [`QuantizerConfig::is_hybrid_invertible`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HybridMapping {
    scale: DecadeScale,
}

impl HybridMapping {
    /// Creates a new `HybridMapping` with the given configuration.
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

impl IndexMapping for HybridMapping {
    fn scheme(&self) -> Scheme {
        Scheme::Hybrid
    }

    fn index(&self, value: f64) -> Result<i64, QuantizerError> {
        let position = self.scale.position(value)?;

        // Re-exponentiate the fraction and spread the decade linearly over the subdivisions.
        let base = self.scale.base();
        let linear = self.scale.subdivisions() as f64 * base.powf(position.fraction) / base;
        let offset = to_index(linear.floor(), "index", value)?;

        self.scale.join(position.decade, offset, value)
    }

    fn lower_bound(&self, index: i64) -> Result<f64, QuantizerError> {
        let (decade, offset) = self.scale.split(index)?;
        let exponent = if offset == 0 {
            0.0
        } else {
            1.0 + self.scale.log(offset as f64 / self.scale.subdivisions() as f64)
        };

        self.scale.compose(decade, exponent, index)
    }
}
