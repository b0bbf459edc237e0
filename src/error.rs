//! Error types for the bjpeg codec.
//!
//! Every failure in the core is returned as a value. Quantization loss is never an error; only
//! malformed input, inconsistent dimensions and failed channel tasks are.

use thiserror::Error;

use crate::compression::pipeline::Channel;

/// Result type for bjpeg operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for bjpeg operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Truncated byte stream, a length prefix running past the end of the data, or a run-length
    /// pair that cannot be expanded.
    #[error("malformed container: {0}")]
    MalformedContainer(String),

    /// Stored or supplied dimensions disagree with the number of decoded samples.
    #[error("dimension mismatch: expected {expected} samples, found {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// One of the three parallel channel tasks failed.
    #[error("channel {channel} failed: {source}")]
    ChannelTaskFailure {
        channel: Channel,
        #[source]
        source: Box<Error>,
    },

    /// Quality must lie in (0, 1].
    #[error("quality {0} out of range (0, 1]")]
    InvalidQuality(f32),

    /// Block size must be at least 1.
    #[error("invalid block size {0}")]
    InvalidBlockSize(usize),

    /// Interleaved pixel buffer does not match the image dimensions.
    #[error("expected {expected} bytes of pixel data, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Dimensions too large to be stored in a channel record.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Internal invariant broken.
    #[error("internal error: {0}")]
    Internal(&'static str),
}

impl Error {
    /// Shorthand for building a [`Error::MalformedContainer`].
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedContainer(reason.into())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn channel_failure_names_channel() {
        let err = Error::ChannelTaskFailure {
            channel: Channel::U,
            source: Box::new(Error::DimensionMismatch {
                expected: 64,
                actual: 63,
            }),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("channel U failed"));
        assert!(msg.contains("expected 64 samples, found 63"));
    }

    #[test]
    fn malformed_shorthand() {
        let err = Error::malformed("truncated");
        assert!(matches!(err, Error::MalformedContainer(ref r) if r == "truncated"));
    }

    #[test]
    fn caller_errors_describe_themselves() {
        let err = Error::InvalidPixelData {
            expected: 12,
            actual: 11,
        };
        assert_eq!(err.to_string(), "expected 12 bytes of pixel data, got 11");
        let err = Error::InvalidDimensions {
            width: 3,
            height: 4,
        };
        assert_eq!(err.to_string(), "invalid dimensions 3x4");
    }
}
