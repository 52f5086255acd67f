//! Transport abstraction layer for Deepcast.
//!
//! Provides the [`Transport`] trait that abstracts over the physical media a
//! traversal can move bytes through (peer-to-peer, collective broadcast,
//! file, in-memory buffer, no-op), and the [`Channel`] trait that marks the
//! boundary to the process-group communication collaborator.
//!
//! Every concrete transport is tagged with a [`Direction`] known at compile
//! time. The traversal engine issues the same `move_bytes` calls in both
//! directions; only the transport decides whether the buffer is read from or
//! written into.

mod buffer;
mod channel;
mod error;
mod file;
mod peer;

pub use buffer::{BufferRead, BufferWrite, NoOp};
pub use channel::{Channel, LocalCluster, LocalEndpoint};
pub use error::TransportError;
pub use file::{FileRead, FileWrite};
pub use peer::{BroadcastFollower, BroadcastRoot, PeerRecv, PeerSend};

use std::fmt;

/// Which way bytes flow through a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The traversal is the source: `move_bytes` reads from the buffer.
    Outbound,
    /// The traversal is the destination: `move_bytes` fills the buffer.
    Inbound,
}

/// The rank of a participant within a process group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(pub u32);

impl Rank {
    /// Returns the underlying `u32` value.
    pub fn into_inner(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rank-{}", self.0)
    }
}

/// A message tag distinguishing concurrent conversations between two peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag(pub u32);

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tag-{}", self.0)
    }
}

/// Moves raw bytes in one fixed direction over one physical medium.
///
/// A transport either fully completes a `move_bytes` call or returns an
/// error; there is no partial transfer. The engine layers no retry or
/// timeout logic on top — a failure abandons the whole operation.
pub trait Transport {
    /// The direction bytes flow for this concrete transport.
    const DIRECTION: Direction;

    /// Moves `buf.len()` bytes through the medium.
    ///
    /// Outbound transports read from `buf` and leave it unchanged; inbound
    /// transports overwrite `buf` entirely.
    fn move_bytes(&mut self, buf: &mut [u8]) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_display() {
        assert_eq!(Rank(3).to_string(), "rank-3");
    }

    #[test]
    fn test_rank_into_inner() {
        assert_eq!(Rank(42).into_inner(), 42);
    }

    #[test]
    fn test_tag_display() {
        assert_eq!(Tag(7).to_string(), "tag-7");
    }

    #[test]
    fn test_rank_works_as_map_key() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(Rank(0), "root");
        map.insert(Rank(1), "follower");
        assert_eq!(map[&Rank(0)], "root");
    }

    #[test]
    fn test_direction_equality() {
        assert_eq!(Direction::Outbound, Direction::Outbound);
        assert_ne!(Direction::Outbound, Direction::Inbound);
    }
}
