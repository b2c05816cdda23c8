//! Textual bucketing descriptors.

use std::{fmt, str::FromStr};

use crate::{config::QuantizerConfig, error::QuantizerError, mapping::Scheme, quantizer::Quantizer};

/// Smallest amount by which `base` must exceed `n` in a hybrid descriptor.
const HYBRID_MIN_HEADROOM: f64 = 0.1;

/// A bucketing scheme together with its configuration, in textual form.
///
/// Descriptors name a scheme followed by its parameters, either as path segments or as a query string:
///
/// ```text
/// log/base/10/n/5/scale/0.1
/// logRegular?base=10&n=5&scale=0.1
/// ```
///
/// The scheme is `log` for the pure logarithmic scheme, and `logRegular` for the hybrid scheme (`logQuantile` is
/// accepted as a deprecated alias). The recognized parameters are:
///
/// - `base`: growth factor of a decade
/// - `n`: number of buckets per decade
/// - `scale`: value at index zero
/// - `negative`: whether negative indices are allowed (`true` or `false`)
///
/// Omitted parameters keep their default value. The hybrid scheme additionally requires `base` to exceed `n` by at least
/// 0.1, as its bounds would otherwise not map back to their own index.
///
/// Descriptors are rendered in path form, and parse back to an equal descriptor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BucketingDescriptor {
    scheme: Scheme,
    config: QuantizerConfig,
}

impl BucketingDescriptor {
    /// Creates a new `BucketingDescriptor`.
    pub fn new(scheme: Scheme, config: QuantizerConfig) -> Self {
        Self { scheme, config }
    }

    /// Returns the scheme.
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Returns the configuration.
    pub fn config(&self) -> &QuantizerConfig {
        &self.config
    }

    /// Builds a quantizer from the described configuration.
    pub fn into_quantizer(self) -> Quantizer {
        Quantizer::new(self.config)
    }
}

impl fmt::Display for BucketingDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/base/{}/n/{}/scale/{}",
            self.scheme,
            self.config.base(),
            self.config.subdivisions(),
            self.config.scale()
        )?;
        if !self.config.allows_negative_indices() {
            f.write_str("/negative/false")?;
        }
        Ok(())
    }
}

impl FromStr for BucketingDescriptor {
    type Err = QuantizerError;

    fn from_str(descriptor: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| QuantizerError::InvalidDescriptor {
            descriptor: descriptor.to_string(),
            reason,
        };

        let (name, params) = match descriptor.find(|c: char| c == '?' || c == '/') {
            Some(pos) => (&descriptor[..pos], parse_params(&descriptor[pos..]).map_err(invalid)?),
            None => (descriptor, Vec::new()),
        };
        let scheme = name.parse::<Scheme>().map_err(|e| invalid(e.to_string()))?;

        let defaults = QuantizerConfig::default();
        let mut scale = defaults.scale();
        let mut subdivisions = f64::from(defaults.subdivisions());
        let mut base = defaults.base();
        let mut allow_negative_indices = defaults.allows_negative_indices();

        for (key, value) in params {
            match key {
                "scale" => scale = parse_number(key, value).map_err(invalid)?,
                "n" => subdivisions = parse_number(key, value).map_err(invalid)?,
                "base" => base = parse_number(key, value).map_err(invalid)?,
                "negative" => {
                    allow_negative_indices = value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("parameter 'negative' must be true or false, got '{}'", value)))?
                }
                _ => return Err(invalid(format!("unknown parameter '{}'", key))),
            }
        }

        if subdivisions.fract() != 0.0 || subdivisions < 1.0 || subdivisions > f64::from(u32::MAX) {
            return Err(invalid(format!(
                "parameter 'n' must be a whole number of at least 1, got {}",
                subdivisions
            )));
        }

        // The range check above makes this conversion lossless.
        let config = QuantizerConfig::new(scale, subdivisions as u32, base)
            .map_err(|e| invalid(e.to_string()))?
            .with_negative_indices(allow_negative_indices);

        if scheme == Scheme::Hybrid && base - subdivisions < HYBRID_MIN_HEADROOM {
            return Err(invalid(format!(
                "{} scheme requires base to exceed n by at least {} (n: {}, base: {})",
                scheme,
                HYBRID_MIN_HEADROOM,
                config.subdivisions(),
                config.base()
            )));
        }

        Ok(Self { scheme, config })
    }
}

/// Splits the parameter part of a descriptor, including its leading separator, into key/value pairs.
fn parse_params(raw: &str) -> Result<Vec<(&str, &str)>, String> {
    let (separator, rest) = raw.split_at(1);
    let rest = rest.trim_end_matches('/');
    if rest.is_empty() {
        return Ok(Vec::new());
    }

    if separator == "?" {
        rest.split('&')
            .map(|pair| {
                pair.split_once('=')
                    .ok_or_else(|| format!("parameter '{}' is missing a value", pair))
            })
            .collect()
    } else {
        let mut pairs = Vec::new();
        let mut segments = rest.split('/');
        while let Some(key) = segments.next() {
            let value = segments
                .next()
                .ok_or_else(|| format!("parameter '{}' is missing a value", key))?;
            pairs.push((key, value));
        }
        Ok(pairs)
    }
}

fn parse_number(key: &str, value: &str) -> Result<f64, String> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("parameter '{}' must be a number, got '{}'", key, value))
}
