//! Numeric leaf types for Deepcast.
//!
//! Concrete dense and compressed-sparse-column array types implementing the
//! engine's [`DenseLeaf`]/[`SparseLeaf`] accessor boundary. The engine
//! treats them as opaque leaves: extents and nonzero counts move first,
//! then the backing storage moves as whole blocks.
//!
//! [`DenseLeaf`]: deepcast_session::DenseLeaf
//! [`SparseLeaf`]: deepcast_session::SparseLeaf

mod dense;
mod sparse;

pub use dense::{DenseMatrix, DenseVector};
pub use sparse::SparseColMatrix;
