use std::path::PathBuf;

use clap::{Parser, Subcommand};
use loghist::BucketingDescriptor;

/// Prints and compares histogram bucket boundaries for the hybrid and logarithmic bucketing schemes.
///
/// Quantizer parameters are read from the configuration file, if any, and then from `LOGHIST_`-prefixed environment
/// variables (`LOGHIST_SCALE`, `LOGHIST_SUBDIVISIONS`, `LOGHIST_BASE`, and `LOGHIST_ALLOW_NEGATIVE_INDICES`), which
/// take precedence. A descriptor overrides both, and limits the output to the scheme it names.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Cli {
    /// Path to a YAML file holding quantizer parameters.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Bucketing descriptor, such as `log/base/10/n/5/scale/0.1` or `logRegular?base=10&n=5&scale=0.1`.
    #[arg(short, long, global = true)]
    pub descriptor: Option<BucketingDescriptor>,

    #[command(subcommand)]
    pub action: Action,
}

/// Table to print.
#[derive(Debug, PartialEq, Subcommand)]
pub enum Action {
    /// Prints the lower bound of every bucket index in a range.
    Bounds {
        /// First index to print.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        start: i64,

        /// Last index to print, inclusive.
        #[arg(long, default_value_t = 20, allow_negative_numbers = true)]
        end: i64,
    },

    /// Prints the bucket index and bucket range of each value.
    Classify {
        /// Values to classify.
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },

    /// Prints the lower bound of the bucket holding each value in a range.
    LowerBounds {
        /// First value to print.
        #[arg(long, default_value_t = 1.0)]
        start: f64,

        /// Last value to print, inclusive.
        #[arg(long, default_value_t = 1000.0)]
        end: f64,

        /// Distance between consecutive values.
        #[arg(long, default_value_t = 1.0)]
        step: f64,
    },
}
