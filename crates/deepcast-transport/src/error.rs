use crate::Tag;

/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// A buffer-bound transport was asked to move bytes past its fixed
    /// capacity. There is no truncation path: the whole operation fails.
    #[error(
        "buffer capacity exceeded: offset {offset} + {requested} bytes \
         overruns capacity {capacity}"
    )]
    CapacityExceeded {
        /// Bytes already moved through the buffer.
        offset: usize,
        /// Size of the rejected transfer.
        requested: usize,
        /// Fixed capacity of the buffer.
        capacity: usize,
    },

    /// File or stream I/O failed.
    #[error("file transport failed: {0}")]
    Io(#[source] std::io::Error),

    /// The peer side of an in-memory channel is gone.
    #[error("channel closed: {0}")]
    ChannelClosed(String),

    /// A received message carried a different tag than the one requested.
    #[error("message tag mismatch: expected {expected}, got {actual}")]
    TagMismatch {
        /// Tag the receiver asked for.
        expected: Tag,
        /// Tag the message actually carried.
        actual: Tag,
    },

    /// A received message did not match the requested transfer size.
    #[error("message size mismatch: expected {expected} bytes, got {actual}")]
    MessageSize {
        /// Bytes the receiver asked for.
        expected: usize,
        /// Bytes the message actually carried.
        actual: usize,
    },
}
