use std::string::FromUtf8Error;

use deepcast_transport::TransportError;

/// Result type alias for traversal operations.
pub type Result<T> = std::result::Result<T, PackError>;

/// Errors that can occur while packing or unpacking a value graph.
///
/// None of these are recoverable for the current operation: a partially
/// consumed stream leaves the alias map and any reconstructed nodes in an
/// unusable state, so callers abandon the session on the first error.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    /// A caller-declared length disagrees with the length actually present
    /// in the stream (or in the value being written).
    #[error(
        "declared length {expected} does not match transported length {actual}"
    )]
    LengthMismatch {
        /// Length the caller declared.
        expected: usize,
        /// Length actually transported.
        actual: usize,
    },

    /// An inbound string payload is not valid UTF-8.
    #[error("transported text is not valid UTF-8")]
    InvalidText(#[source] FromUtf8Error),

    /// The bound transport failed; propagated as-is, no retries.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
