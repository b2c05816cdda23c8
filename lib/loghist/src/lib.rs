//! Logarithmic histogram quantization.
//!
//! This crate maps positive measurements, such as latencies or sizes, to integer histogram bucket indices and back,
//! with bounded relative error and a bucket count that grows logarithmically with the range of values. It does not
//! store or count anything itself: it provides the index and bound arithmetic that a histogram would use internally.
//!
//! Two schemes are available through [`Quantizer`]:
//!
//! - a hybrid scheme, logarithmic across decades and linear within each decade
//! - a pure logarithmic scheme, with buckets evenly spaced in log-space
//!
//! Both are configured by a [`QuantizerConfig`], and can also be described textually with a [`BucketingDescriptor`].
#![deny(warnings)]
#![deny(missing_docs)]

mod common;
pub use self::common::float_eq;

mod config;
pub use self::config::QuantizerConfig;

mod decade;

mod descriptor;
pub use self::descriptor::BucketingDescriptor;

mod error;
pub use self::error::{ErrorKind, QuantizerError};

pub mod mapping;
pub use self::mapping::{IndexMapping, Scheme};

mod quantizer;
pub use self::quantizer::Quantizer;
