use tracing::{debug, warn};

use crate::{
    config::QuantizerConfig,
    error::QuantizerError,
    mapping::{HybridMapping, IndexMapping, LogarithmicMapping, Scheme},
};

/// Converts between positive values and histogram bucket indices.
///
/// A `Quantizer` offers two bucketing schemes over the same configuration:
///
/// - the hybrid scheme ([`index`][Self::index], [`bound`][Self::bound], [`lower_bound`][Self::lower_bound]), which is
///   logarithmic across decades and linear within them
/// - the pure logarithmic scheme ([`index_log`][Self::index_log], [`bound_log`][Self::bound_log],
///   [`lower_bound_log`][Self::lower_bound_log]), which spaces buckets evenly in log-space
///
/// In both schemes, the bound of a bucket is the smallest value that maps to it, so `bound(index(x)) <= x`, and
/// increasing an index by `subdivisions` multiplies its bound by `base`. Decade boundaries are shared between the two
/// schemes.
///
/// Quantizers hold no mutable state and are cheap to copy.
///
/// # Example
///
/// ```
/// use loghist::Quantizer;
///
/// let quantizer = Quantizer::default();
///
/// assert_eq!(quantizer.index_log(1.0).unwrap(), 5);
/// assert_eq!(quantizer.index(1.0).unwrap(), 5);
/// assert!(quantizer.lower_bound_log(5.0).unwrap() <= 5.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quantizer {
    hybrid: HybridMapping,
    logarithmic: LogarithmicMapping,
}

impl Quantizer {
    /// Creates a new `Quantizer` with the given configuration.
    pub fn new(config: QuantizerConfig) -> Self {
        debug!(
            scale = config.scale(),
            subdivisions = config.subdivisions(),
            base = config.base(),
            allow_negative_indices = config.allows_negative_indices(),
            "Created quantizer."
        );
        if !config.is_hybrid_invertible() {
            warn!(
                subdivisions = config.subdivisions(),
                base = config.base(),
                "Hybrid bucket bounds will not map back to their own index unless subdivisions is less than base."
            );
        }

        Self {
            hybrid: HybridMapping::new(config),
            logarithmic: LogarithmicMapping::new(config),
        }
    }

    /// Returns the configuration of this quantizer.
    pub fn config(&self) -> &QuantizerConfig {
        self.hybrid.config()
    }

    /// Returns the hybrid mapping.
    pub fn hybrid(&self) -> &HybridMapping {
        &self.hybrid
    }

    /// Returns the pure logarithmic mapping.
    pub fn logarithmic(&self) -> &LogarithmicMapping {
        &self.logarithmic
    }

    /// Returns the mapping for the given scheme.
    pub fn mapping(&self, scheme: Scheme) -> &dyn IndexMapping {
        match scheme {
            Scheme::Hybrid => &self.hybrid,
            Scheme::Logarithmic => &self.logarithmic,
        }
    }

    /// Returns the hybrid bucket index of `value`.
    ///
    /// # Errors
    ///
    /// If `value` is not finite and greater than zero, an error is returned. See [`IndexMapping::index`].
    pub fn index(&self, value: f64) -> Result<i64, QuantizerError> {
        self.hybrid.index(value)
    }

    /// Returns the lower bound of the hybrid bucket at `index`.
    ///
    /// # Errors
    ///
    /// See [`IndexMapping::lower_bound`].
    pub fn bound(&self, index: i64) -> Result<f64, QuantizerError> {
        self.hybrid.lower_bound(index)
    }

    /// Returns the lower bound of the hybrid bucket holding `value`.
    ///
    /// # Errors
    ///
    /// See [`IndexMapping::lower_bound_of`].
    pub fn lower_bound(&self, value: f64) -> Result<f64, QuantizerError> {
        self.hybrid.lower_bound_of(value)
    }

    /// Returns the logarithmic bucket index of `value`.
    ///
    /// # Errors
    ///
    /// If `value` is not finite and greater than zero, an error is returned. See [`IndexMapping::index`].
    pub fn index_log(&self, value: f64) -> Result<i64, QuantizerError> {
        self.logarithmic.index(value)
    }

    /// Returns the lower bound of the logarithmic bucket at `index`.
    ///
    /// # Errors
    ///
    /// See [`IndexMapping::lower_bound`].
    pub fn bound_log(&self, index: i64) -> Result<f64, QuantizerError> {
        self.logarithmic.lower_bound(index)
    }

    /// Returns the lower bound of the logarithmic bucket holding `value`.
    ///
    /// # Errors
    ///
    /// See [`IndexMapping::lower_bound_of`].
    pub fn lower_bound_log(&self, value: f64) -> Result<f64, QuantizerError> {
        self.logarithmic.lower_bound_of(value)
    }
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new(QuantizerConfig::default())
    }
}
