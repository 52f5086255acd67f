//! Traversal engine for Deepcast.
//!
//! A [`Session`] couples one transport with one per-session [`AliasMap`] and
//! walks a value graph through it. The same declared shape — a type's
//! [`Pack`] implementation — drives three things without modification:
//! writing the graph to a medium, reconstructing an isomorphic graph from a
//! medium, and computing the exact serialized size against the no-op
//! transport.
//!
//! Shared nodes (`Option<Rc<RefCell<V>>>` fields) are deduplicated per
//! session: however many paths reach an allocation, its payload moves once,
//! and the reconstructed graph shares a single allocation in the same
//! places the source did.
//!
//! ```
//! use deepcast_session::{Pack, Result, Session};
//! use deepcast_transport::{BufferRead, BufferWrite, Transport};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Probe {
//!     samples: Vec<f64>,
//!     label: String,
//! }
//!
//! impl Pack for Probe {
//!     fn pack<T: Transport>(&mut self, session: &mut Session<T>) -> Result<()> {
//!         session.pack_vec(&mut self.samples)?;
//!         session.pack_string(&mut self.label)
//!     }
//! }
//!
//! let mut probe = Probe { samples: vec![0.5, 2.0], label: "probe".into() };
//! let mut region = [0u8; 64];
//!
//! let mut writer = Session::new(BufferWrite::new(&mut region));
//! probe.pack(&mut writer)?;
//! let written = writer.finish();
//!
//! let mut reader = Session::new(BufferRead::new(&region[..written]));
//! let mut copy = Probe::default();
//! copy.pack(&mut reader)?;
//! assert_eq!(copy, probe);
//! # Ok::<(), deepcast_session::PackError>(())
//! ```

mod alias;
mod error;
mod leaf;
mod pack;
mod session;

pub use alias::{AliasMap, AliasToken};
pub use error::{PackError, Result};
pub use leaf::{DenseLeaf, SparseLeaf};
pub use pack::{Pack, Plain};
pub use session::Session;
