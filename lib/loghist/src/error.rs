//! Error types.

use snafu::Snafu;

/// Broad classification of a [`QuantizerError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// A value, index, configuration parameter, or descriptor was outside of its documented domain.
    InvalidArgument,

    /// Floating-point evaluation produced a non-finite or otherwise unusable result for well-formed input.
    NumericDegeneracy,
}

/// Quantizer error.
#[derive(Clone, Debug, PartialEq, Snafu)]
#[snafu(context(suffix(false)))]
#[snafu(visibility(pub(crate)))]
pub enum QuantizerError {
    /// The value to quantize was not a finite, strictly positive number.
    #[snafu(display("value must be finite and greater than zero (got {})", value))]
    InvalidValue {
        /// The rejected value.
        value: f64,
    },

    /// A configuration parameter violated its constraint.
    #[snafu(display("invalid quantizer configuration: '{}' {}", parameter, reason))]
    InvalidConfiguration {
        /// Name of the offending parameter.
        parameter: &'static str,

        /// Why the parameter was rejected.
        reason: &'static str,
    },

    /// A negative bucket index was requested or produced while negative indices are disabled.
    #[snafu(display("negative bucket index {} is not allowed by this configuration", index))]
    NegativeIndex {
        /// The negative index.
        index: i64,
    },

    /// A bucketing scheme name was not recognized.
    #[snafu(display("no known bucketing scheme is named '{}'", name))]
    UnknownScheme {
        /// The unrecognized name.
        name: String,
    },

    /// A bucketing descriptor could not be parsed or described an invalid configuration.
    #[snafu(display("invalid bucketing descriptor '{}': {}", descriptor, reason))]
    InvalidDescriptor {
        /// The descriptor text, as given.
        descriptor: String,

        /// Why the descriptor was rejected.
        reason: String,
    },

    /// Evaluating the quantization formulas did not produce a usable number.
    ///
    /// This happens when an index or bound leaves the representable range, such as computing the bound of an index so
    /// large that the power overflows to infinity, or so small that it underflows to zero.
    #[snafu(display("numeric degeneracy during {} (input: {})", operation, input))]
    NumericDegeneracy {
        /// The operation being evaluated.
        operation: &'static str,

        /// The input to the operation, as a float.
        input: f64,
    },
}

impl QuantizerError {
    /// Returns the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidValue { .. }
            | Self::InvalidConfiguration { .. }
            | Self::NegativeIndex { .. }
            | Self::UnknownScheme { .. }
            | Self::InvalidDescriptor { .. } => ErrorKind::InvalidArgument,
            Self::NumericDegeneracy { .. } => ErrorKind::NumericDegeneracy,
        }
    }

    /// Returns `true` if the error was caused by an argument outside of its documented domain.
    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }
}
