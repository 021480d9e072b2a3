use derive_builder::Builder;

use crate::errors::Error;

/// What to do with a partial packet that is still pending when the stream ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TrailingPartial {
    /// Log a warning and discard the fragments.
    #[default]
    Drop,
    /// Fail with [`Error::IncompleteStream`].
    Error,
}

/// Settings for [`PacketParser`](super::PacketParser).
///
/// ```
/// use pgp_framing::packet::{ParserConfigBuilder, TrailingPartial};
///
/// let config = ParserConfigBuilder::default()
///     .trailing_partial(TrailingPartial::Error)
///     .max_body_len(Some(1024 * 1024))
///     .build()
///     .unwrap();
/// assert_eq!(config.trailing_partial, TrailingPartial::Error);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Builder)]
#[builder(build_fn(error = "Error"))]
pub struct ParserConfig {
    #[builder(default)]
    pub trailing_partial: TrailingPartial,

    /// Upper bound for the body of a reassembled packet, `None` for no limit.
    #[builder(default)]
    pub max_body_len: Option<usize>,
}
