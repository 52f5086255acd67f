//! Peer-to-peer and collective transports over a [`Channel`].

use crate::{Channel, Direction, Rank, Tag, Transport, TransportError};

/// Sends every transfer to one peer under one tag.
#[derive(Debug)]
pub struct PeerSend<'c, C: Channel> {
    peer: Rank,
    tag: Tag,
    channel: &'c C,
}

impl<'c, C: Channel> PeerSend<'c, C> {
    /// Creates a send transport addressed to `peer` under `tag`.
    pub fn new(peer: Rank, tag: Tag, channel: &'c C) -> Self {
        Self { peer, tag, channel }
    }
}

impl<C: Channel> Transport for PeerSend<'_, C> {
    const DIRECTION: Direction = Direction::Outbound;

    fn move_bytes(&mut self, buf: &mut [u8]) -> Result<(), TransportError> {
        self.channel.send_bytes(buf, self.peer, self.tag)
    }
}

/// Fills every transfer from one peer under one tag.
#[derive(Debug)]
pub struct PeerRecv<'c, C: Channel> {
    peer: Rank,
    tag: Tag,
    channel: &'c C,
}

impl<'c, C: Channel> PeerRecv<'c, C> {
    /// Creates a receive transport addressed to `peer` under `tag`.
    pub fn new(peer: Rank, tag: Tag, channel: &'c C) -> Self {
        Self { peer, tag, channel }
    }
}

impl<C: Channel> Transport for PeerRecv<'_, C> {
    const DIRECTION: Direction = Direction::Inbound;

    fn move_bytes(&mut self, buf: &mut [u8]) -> Result<(), TransportError> {
        self.channel.recv_bytes(buf, self.peer, self.tag)
    }
}

/// The root side of a collective broadcast.
///
/// Both broadcast transports issue the same collective call; the role fixes
/// whether the traversal runs in write or read mode.
#[derive(Debug)]
pub struct BroadcastRoot<'c, C: Channel> {
    root: Rank,
    channel: &'c C,
}

impl<'c, C: Channel> BroadcastRoot<'c, C> {
    /// Creates the root-side broadcast transport.
    pub fn new(root: Rank, channel: &'c C) -> Self {
        Self { root, channel }
    }
}

impl<C: Channel> Transport for BroadcastRoot<'_, C> {
    const DIRECTION: Direction = Direction::Outbound;

    fn move_bytes(&mut self, buf: &mut [u8]) -> Result<(), TransportError> {
        self.channel.broadcast_bytes(buf, self.root)
    }
}

/// The follower side of a collective broadcast.
#[derive(Debug)]
pub struct BroadcastFollower<'c, C: Channel> {
    root: Rank,
    channel: &'c C,
}

impl<'c, C: Channel> BroadcastFollower<'c, C> {
    /// Creates the follower-side broadcast transport.
    pub fn new(root: Rank, channel: &'c C) -> Self {
        Self { root, channel }
    }
}

impl<C: Channel> Transport for BroadcastFollower<'_, C> {
    const DIRECTION: Direction = Direction::Inbound;

    fn move_bytes(&mut self, buf: &mut [u8]) -> Result<(), TransportError> {
        self.channel.broadcast_bytes(buf, self.root)
    }
}
