use std::io;

use snafu::{Backtrace, Snafu};

use crate::types::Tag;

pub type Result<T, E = Error> = ::std::result::Result<T, E>;

/// Error types
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The tag-length framing is violated, e.g. a header byte without the high bit set.
    #[snafu(display("malformed packet: {message}"))]
    MalformedPacket { message: String },
    /// Fewer bytes were available than a declared length demands.
    #[snafu(display("truncated stream: needed {needed}, remaining {remaining}"))]
    TruncatedStream {
        needed: usize,
        remaining: usize,
        backtrace: Option<Backtrace>,
    },
    #[snafu(display("invalid merge: {message}"))]
    InvalidMerge { message: &'static str },
    /// The stream ended while a partial packet was still waiting for its remainder.
    #[snafu(display("stream ended inside partial packet {tag:?}"))]
    IncompleteStream { tag: Tag },
    #[snafu(display("invalid input"))]
    InvalidInput,
    #[snafu(display("SHA1 hash collision detected"))]
    Sha1HashCollision,
    /// Signals parameters we know about, but don't support
    #[snafu(display("Unsupported: {message}"))]
    Unsupported { message: String },
    #[snafu(display("invalid configuration: {message}"))]
    InvalidConfig { message: String },
    #[snafu(display("io error"))]
    Io {
        source: io::Error,
        backtrace: Backtrace,
    },
}

impl Error {
    /// Returns true if the error indicates that the input was too short.
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self,
            Self::TruncatedStream { .. } | Self::IncompleteStream { .. }
        )
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            // the underlying reader does not tell us how much was missing
            return TruncatedStreamSnafu {
                needed: 1usize,
                remaining: 0usize,
            }
            .build();
        }

        Error::Io {
            source: err,
            backtrace: snafu::GenerateImplicitData::generate(),
        }
    }
}

impl From<derive_builder::UninitializedFieldError> for Error {
    fn from(err: derive_builder::UninitializedFieldError) -> Error {
        Error::InvalidConfig {
            message: err.to_string(),
        }
    }
}

#[macro_export]
macro_rules! unsupported_err {
    ($e:expr) => {
        return Err($crate::errors::Error::Unsupported { message: $e.to_string()})
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::errors::Error::Unsupported { message: format!($fmt, $($arg)+) })
    };
}

#[macro_export]
macro_rules! malformed_err {
    ($e:expr) => {
        return Err($crate::errors::Error::MalformedPacket { message: $e.to_string()})
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::errors::Error::MalformedPacket { message: format!($fmt, $($arg)+) })
    };
}
