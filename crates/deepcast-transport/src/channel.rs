//! The process-group communication boundary and an in-memory implementation.
//!
//! [`Channel`] is the seam to the communication collaborator: the engine
//! only ever asks it to fully move a byte region to a peer, from a peer, or
//! through a collective broadcast, and to report the caller's rank. Real
//! launchers can implement it over their own fabric; [`LocalCluster`] wires
//! a group of in-process endpoints together so peer and collective
//! operations run (and are tested) without any external medium.

use std::collections::HashMap;

use crossbeam::channel::{Receiver, Sender, unbounded};

use crate::{Rank, Tag, TransportError};

/// Rank-addressed byte movement within one process group.
///
/// Each primitive either fully completes the transfer or fails; partial
/// transfers are not representable. Failures are propagated to the caller
/// unchanged — the engine adds no retry logic of its own.
pub trait Channel {
    /// Delivers `buf` to `dest` under `tag`.
    fn send_bytes(
        &self,
        buf: &[u8],
        dest: Rank,
        tag: Tag,
    ) -> Result<(), TransportError>;

    /// Fills `buf` with the next message from `source` under `tag`.
    fn recv_bytes(
        &self,
        buf: &mut [u8],
        source: Rank,
        tag: Tag,
    ) -> Result<(), TransportError>;

    /// Collective broadcast: the `root` rank sends `buf` to every other
    /// rank; all other ranks fill `buf` with what the root sent.
    fn broadcast_bytes(
        &self,
        buf: &mut [u8],
        root: Rank,
    ) -> Result<(), TransportError>;

    /// The rank of this endpoint within the group.
    fn current_rank(&self) -> Rank;

    /// Number of ranks in the group.
    fn group_size(&self) -> usize;
}

// ---------------------------------------------------------------------------
// In-memory cluster
// ---------------------------------------------------------------------------

/// One tagged point-to-point message.
struct Frame {
    tag: Tag,
    bytes: Vec<u8>,
}

/// A group of in-process endpoints wired pairwise with crossbeam channels.
///
/// Every ordered pair of ranks gets its own point-to-point lane, and every
/// root gets a dedicated broadcast lane to each follower, so collectives
/// never interleave with tagged peer traffic.
pub struct LocalCluster {
    endpoints: Vec<LocalEndpoint>,
}

impl LocalCluster {
    /// Builds a fully-connected group of `size` endpoints.
    pub fn new(size: usize) -> Self {
        let mut p2p_tx: Vec<HashMap<Rank, Sender<Frame>>> =
            (0..size).map(|_| HashMap::new()).collect();
        let mut p2p_rx: Vec<HashMap<Rank, Receiver<Frame>>> =
            (0..size).map(|_| HashMap::new()).collect();
        let mut bcast_tx: Vec<HashMap<Rank, Sender<Vec<u8>>>> =
            (0..size).map(|_| HashMap::new()).collect();
        let mut bcast_rx: Vec<HashMap<Rank, Receiver<Vec<u8>>>> =
            (0..size).map(|_| HashMap::new()).collect();

        for src in 0..size {
            for dst in 0..size {
                if src == dst {
                    continue;
                }
                let (tx, rx) = unbounded();
                p2p_tx[src].insert(Rank(dst as u32), tx);
                p2p_rx[dst].insert(Rank(src as u32), rx);

                let (tx, rx) = unbounded();
                bcast_tx[src].insert(Rank(dst as u32), tx);
                bcast_rx[dst].insert(Rank(src as u32), rx);
            }
        }

        let endpoints = (0..size)
            .map(|rank| LocalEndpoint {
                rank: Rank(rank as u32),
                size,
                p2p_tx: std::mem::take(&mut p2p_tx[rank]),
                p2p_rx: std::mem::take(&mut p2p_rx[rank]),
                bcast_tx: std::mem::take(&mut bcast_tx[rank]),
                bcast_rx: std::mem::take(&mut bcast_rx[rank]),
            })
            .collect();

        tracing::debug!(size, "local cluster wired");
        Self { endpoints }
    }

    /// Hands out the endpoints, one per rank in rank order.
    ///
    /// Endpoints are `Send`, so each rank can run on its own thread.
    pub fn into_endpoints(self) -> Vec<LocalEndpoint> {
        self.endpoints
    }
}

/// One rank's view of a [`LocalCluster`].
pub struct LocalEndpoint {
    rank: Rank,
    size: usize,
    p2p_tx: HashMap<Rank, Sender<Frame>>,
    p2p_rx: HashMap<Rank, Receiver<Frame>>,
    bcast_tx: HashMap<Rank, Sender<Vec<u8>>>,
    bcast_rx: HashMap<Rank, Receiver<Vec<u8>>>,
}

impl LocalEndpoint {
    fn peer_tx(&self, dest: Rank) -> Result<&Sender<Frame>, TransportError> {
        self.p2p_tx.get(&dest).ok_or_else(|| {
            TransportError::ChannelClosed(format!(
                "{dest} is not a peer of {}",
                self.rank
            ))
        })
    }
}

impl Channel for LocalEndpoint {
    fn send_bytes(
        &self,
        buf: &[u8],
        dest: Rank,
        tag: Tag,
    ) -> Result<(), TransportError> {
        let frame = Frame {
            tag,
            bytes: buf.to_vec(),
        };
        self.peer_tx(dest)?.send(frame).map_err(|_| {
            TransportError::ChannelClosed(format!("{dest} hung up"))
        })
    }

    fn recv_bytes(
        &self,
        buf: &mut [u8],
        source: Rank,
        tag: Tag,
    ) -> Result<(), TransportError> {
        let rx = self.p2p_rx.get(&source).ok_or_else(|| {
            TransportError::ChannelClosed(format!(
                "{source} is not a peer of {}",
                self.rank
            ))
        })?;
        let frame = rx.recv().map_err(|_| {
            TransportError::ChannelClosed(format!("{source} hung up"))
        })?;
        if frame.tag != tag {
            return Err(TransportError::TagMismatch {
                expected: tag,
                actual: frame.tag,
            });
        }
        if frame.bytes.len() != buf.len() {
            return Err(TransportError::MessageSize {
                expected: buf.len(),
                actual: frame.bytes.len(),
            });
        }
        buf.copy_from_slice(&frame.bytes);
        Ok(())
    }

    fn broadcast_bytes(
        &self,
        buf: &mut [u8],
        root: Rank,
    ) -> Result<(), TransportError> {
        if self.rank == root {
            for (dest, tx) in &self.bcast_tx {
                tx.send(buf.to_vec()).map_err(|_| {
                    TransportError::ChannelClosed(format!("{dest} hung up"))
                })?;
            }
            return Ok(());
        }

        let rx = self.bcast_rx.get(&root).ok_or_else(|| {
            TransportError::ChannelClosed(format!(
                "{root} is not a peer of {}",
                self.rank
            ))
        })?;
        let bytes = rx.recv().map_err(|_| {
            TransportError::ChannelClosed(format!("{root} hung up"))
        })?;
        if bytes.len() != buf.len() {
            return Err(TransportError::MessageSize {
                expected: buf.len(),
                actual: bytes.len(),
            });
        }
        buf.copy_from_slice(&bytes);
        Ok(())
    }

    fn current_rank(&self) -> Rank {
        self.rank
    }

    fn group_size(&self) -> usize {
        self.size
    }
}
