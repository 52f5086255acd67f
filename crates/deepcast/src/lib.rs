//! # Deepcast
//!
//! Deep-copy packing of object graphs over peer, collective, file, and
//! buffer media.
//!
//! A type implements [`Pack`] once — a single walk over its fields — and
//! that one declared shape drives everything: sending the value to a peer,
//! receiving it into a fresh destination, broadcasting it across a process
//! group, persisting it to a file, staging it in one contiguous buffer, and
//! computing its exact serialized size without moving a byte. Shared nodes
//! (`Option<Rc<RefCell<_>>>` fields) move once per operation and come back
//! as shared nodes, so the reconstructed graph is isomorphic to the source,
//! not a tree of copies.
//!
//! ## Quick start
//!
//! ```
//! use deepcast::prelude::*;
//!
//! let mut outbound = vec![4i32, 9, -2];
//!
//! // Size is computed by the same traversal the transports run.
//! let bytes = deepcast::serialized_size(&mut outbound)?;
//! assert_eq!(bytes, 8 + 3 * 4);
//!
//! let mut stored = Vec::new();
//! deepcast::file_write(&mut outbound, &mut stored)?;
//! assert_eq!(stored.len(), bytes);
//!
//! let mut inbound: Vec<i32> = Vec::new();
//! deepcast::file_read(&mut inbound, std::io::Cursor::new(stored))?;
//! assert_eq!(inbound, outbound);
//! # Ok::<(), deepcast::PackError>(())
//! ```

mod ops;
mod size;

pub use ops::{
    broadcast, broadcast_with, buffered_broadcast, buffered_broadcast_with,
    buffered_file_read, buffered_file_read_with, buffered_file_write,
    buffered_file_write_with, buffered_recv, buffered_recv_with,
    buffered_send, buffered_send_with, file_read, file_read_with, file_write,
    file_write_with, recv, recv_with, send, send_with,
};
pub use size::{serialized_size, serialized_size_with};

pub use deepcast_numeric::{DenseMatrix, DenseVector, SparseColMatrix};
pub use deepcast_session::{
    AliasMap, AliasToken, DenseLeaf, Pack, PackError, Plain, Result, Session,
    SparseLeaf,
};
pub use deepcast_transport::{
    BroadcastFollower, BroadcastRoot, BufferRead, BufferWrite, Channel,
    Direction, FileRead, FileWrite, LocalCluster, LocalEndpoint, NoOp,
    PeerRecv, PeerSend, Rank, Tag, Transport, TransportError,
};

/// The commonly-needed names in one import.
pub mod prelude {
    pub use crate::{
        Channel, LocalCluster, Pack, PackError, Plain, Rank, Result, Session,
        Tag, Transport,
    };
}
