//! Quantizer configuration loading.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format as _, Yaml},
    Figment,
};
use loghist::{BucketingDescriptor, QuantizerConfig, Scheme};
use serde::de::DeserializeOwned;
use snafu::{ResultExt as _, Snafu};
use tracing::debug;

/// Environment variable prefix for quantizer parameters.
pub const ENV_VAR_PREFIX: &str = "LOGHIST";

/// A configuration error.
#[derive(Debug, Snafu)]
#[snafu(context(suffix(false)))]
pub enum ConfigurationError {
    /// Environment variable prefix was empty.
    #[snafu(display("Environment variable prefix must not be empty."))]
    EmptyPrefix,

    /// Configuration file could not be read.
    #[snafu(display("Failed to read configuration file '{}'.", path.display()))]
    Io {
        /// Path to the configuration file.
        path: PathBuf,

        /// Error source.
        source: std::io::Error,
    },

    /// Configuration could not be deserialized.
    #[snafu(display("Failed to parse configuration: {}", source))]
    Parse {
        /// Error source.
        source: figment::Error,
    },
}

/// Layers configuration sources on top of each other.
///
/// Sources added later take precedence over sources added earlier. Fields missing from every source keep their
/// default value.
pub struct ConfigurationLoader {
    figment: Figment,
}

impl Default for ConfigurationLoader {
    fn default() -> Self {
        Self { figment: Figment::new() }
    }
}

impl ConfigurationLoader {
    /// Loads the given YAML configuration file.
    ///
    /// # Errors
    ///
    /// If the file could not be read, an error will be returned. Invalid YAML is reported when the configuration is
    /// deserialized.
    pub fn from_yaml<P>(self, path: P) -> Result<Self, ConfigurationError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).context(Io { path })?;
        debug!(file_path = %path.display(), "Loaded configuration file.");

        Ok(Self {
            figment: self.figment.merge(Yaml::string(&contents)),
        })
    }

    /// Loads configuration from environment variables with the given prefix.
    ///
    /// The prefix is separated from the field name by an underscore, which is added if the prefix doesn't already end
    /// with one. Field names are matched case-insensitively.
    ///
    /// # Errors
    ///
    /// If the prefix is empty, an error will be returned.
    pub fn from_environment(self, prefix: &str) -> Result<Self, ConfigurationError> {
        if prefix.is_empty() {
            return Err(ConfigurationError::EmptyPrefix);
        }

        let prefix = if prefix.ends_with('_') {
            prefix.to_string()
        } else {
            format!("{}_", prefix)
        };

        Ok(Self {
            figment: self.figment.merge(Env::prefixed(&prefix)),
        })
    }

    /// Deserializes the layered configuration into `T`.
    ///
    /// # Errors
    ///
    /// If a source is malformed, or the merged values do not form a valid `T`, an error will be returned.
    pub fn into_typed<T>(self) -> Result<T, ConfigurationError>
    where
        T: DeserializeOwned,
    {
        self.figment.extract().context(Parse)
    }
}

/// Resolved bucketing parameters.
#[derive(Debug, PartialEq)]
pub struct Bucketing {
    /// Schemes to print.
    pub schemes: Vec<Scheme>,

    /// Quantizer configuration.
    pub config: QuantizerConfig,
}

impl Bucketing {
    /// Resolves the bucketing parameters.
    ///
    /// A descriptor, when given, is used as-is and selects a single scheme. Otherwise, both schemes are printed, with
    /// the configuration taken from the configuration file (if any) and `LOGHIST_`-prefixed environment variables.
    ///
    /// # Errors
    ///
    /// If the configuration cannot be loaded, an error will be returned.
    pub fn resolve(
        config_path: Option<&Path>, descriptor: Option<BucketingDescriptor>,
    ) -> Result<Self, ConfigurationError> {
        if let Some(descriptor) = descriptor {
            debug!(%descriptor, "Using bucketing descriptor.");
            return Ok(Self {
                schemes: vec![descriptor.scheme()],
                config: *descriptor.config(),
            });
        }

        let mut loader = ConfigurationLoader::default();
        if let Some(path) = config_path {
            loader = loader.from_yaml(path)?;
        }
        let config = loader.from_environment(ENV_VAR_PREFIX)?.into_typed()?;

        Ok(Self {
            schemes: vec![Scheme::Hybrid, Scheme::Logarithmic],
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn defaults_without_sources() {
        Jail::expect_with(|_| {
            let bucketing = Bucketing::resolve(None, None).map_err(|e| e.to_string())?;
            assert_eq!(bucketing.schemes, vec![Scheme::Hybrid, Scheme::Logarithmic]);
            assert_eq!(bucketing.config, QuantizerConfig::default());
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("loghist.yaml", "scale: 1\nsubdivisions: 3\nbase: 8\n")?;
            jail.set_env("LOGHIST_BASE", "4");
            jail.set_env("LOGHIST_ALLOW_NEGATIVE_INDICES", "false");

            let bucketing = Bucketing::resolve(Some(Path::new("loghist.yaml")), None).map_err(|e| e.to_string())?;
            let expected = QuantizerConfig::new(1.0, 3, 4.0).unwrap().with_negative_indices(false);
            assert_eq!(bucketing.config, expected);
            Ok(())
        });
    }

    #[test]
    fn descriptor_wins() {
        Jail::expect_with(|jail| {
            jail.set_env("LOGHIST_SUBDIVISIONS", "7");

            let descriptor = "log/base/2/n/4/scale/1".parse::<BucketingDescriptor>().unwrap();
            let bucketing = Bucketing::resolve(Some(Path::new("missing.yaml")), Some(descriptor))
                .map_err(|e| e.to_string())?;
            assert_eq!(bucketing.schemes, vec![Scheme::Logarithmic]);
            assert_eq!(bucketing.config, QuantizerConfig::new(1.0, 4, 2.0).unwrap());
            Ok(())
        });
    }

    #[test]
    fn missing_file() {
        Jail::expect_with(|_| {
            let err = Bucketing::resolve(Some(Path::new("missing.yaml")), None).unwrap_err();
            assert!(matches!(err, ConfigurationError::Io { .. }), "{:?}", err);
            Ok(())
        });
    }

    #[test]
    fn invalid_parameters() {
        Jail::expect_with(|jail| {
            jail.set_env("LOGHIST_SUBDIVISIONS", "0");

            let err = Bucketing::resolve(None, None).unwrap_err();
            assert!(matches!(err, ConfigurationError::Parse { .. }), "{:?}", err);
            Ok(())
        });
    }

    #[test]
    fn empty_prefix() {
        let result = ConfigurationLoader::default().from_environment("");
        assert!(matches!(result, Err(ConfigurationError::EmptyPrefix)));
    }
}
