//! The numeric-leaf boundary: dense and sparse arrays as opaque leaves.
//!
//! The engine never looks inside a numeric array type; it only consumes the
//! accessors below — extents, nonzero count, contiguous backing storage —
//! and moves the storage as whole blocks. Any matrix library can sit behind
//! these traits.

use deepcast_transport::Transport;

use crate::error::Result;
use crate::pack::Plain;
use crate::session::Session;

/// A dense matrix or vector with contiguous backing storage.
///
/// `storage_mut` must return exactly `rows * cols` scalars after a
/// `reshape(rows, cols)`; a vector is a dense leaf with one column.
pub trait DenseLeaf: Default {
    /// Element type of the backing storage.
    type Scalar: Plain;

    /// Number of rows.
    fn rows(&self) -> usize;

    /// Number of columns.
    fn cols(&self) -> usize;

    /// Resizes the leaf to the given extents, allocating backing storage.
    /// Existing contents need not be preserved.
    fn reshape(&mut self, rows: usize, cols: usize);

    /// The contiguous backing storage, length `rows * cols`.
    fn storage_mut(&mut self) -> &mut [Self::Scalar];
}

/// A compressed-sparse-column matrix exposed as value / inner-index /
/// outer-offset arrays.
///
/// `outer_offsets_mut` has `cols + 1` entries; the engine moves the first
/// `cols` and asks the leaf to restore the final sentinel after an inbound
/// reshape.
pub trait SparseLeaf: Default {
    /// Element type of the value array.
    type Scalar: Plain;

    /// Element type of the index arrays.
    type Index: Plain;

    /// Number of rows.
    fn rows(&self) -> usize;

    /// Number of columns.
    fn cols(&self) -> usize;

    /// Number of stored nonzero entries.
    fn nonzeros(&self) -> usize;

    /// Resizes the leaf to the given extents and nonzero count, allocating
    /// the three backing arrays. Existing contents need not be preserved.
    fn reshape(&mut self, rows: usize, cols: usize, nonzeros: usize);

    /// The nonzero values, length `nonzeros`.
    fn values_mut(&mut self) -> &mut [Self::Scalar];

    /// The row index of each stored value, length `nonzeros`.
    fn inner_indices_mut(&mut self) -> &mut [Self::Index];

    /// Per-column offsets into the value array, length `cols + 1`.
    fn outer_offsets_mut(&mut self) -> &mut [Self::Index];

    /// Restores the final outer-offset sentinel (`offsets[cols] ==
    /// nonzeros`) after the first `cols` offsets have been filled in.
    fn restore_sentinel(&mut self);
}

impl<T: Transport> Session<T> {
    /// Packs a dense leaf: row extent, column extent, then the backing
    /// storage as one block.
    pub fn pack_dense<M: DenseLeaf>(&mut self, leaf: &mut M) -> Result<()> {
        let rows = self.pack_len(leaf.rows())?;
        let cols = self.pack_len(leaf.cols())?;
        if !self.is_outbound() {
            leaf.reshape(rows, cols);
        }
        self.pack_plain_slice(leaf.storage_mut())
    }

    /// Packs a sparse leaf: row/column extents and nonzero count, then the
    /// three backing arrays as three blocks. The inbound side reconstructs
    /// the final outer-offset sentinel.
    pub fn pack_sparse<M: SparseLeaf>(&mut self, leaf: &mut M) -> Result<()> {
        let rows = self.pack_len(leaf.rows())?;
        let cols = self.pack_len(leaf.cols())?;
        let nonzeros = self.pack_len(leaf.nonzeros())?;
        if !self.is_outbound() {
            leaf.reshape(rows, cols, nonzeros);
        }
        self.pack_plain_slice(leaf.values_mut())?;
        self.pack_plain_slice(leaf.inner_indices_mut())?;
        let outer = leaf.outer_offsets_mut();
        self.pack_plain_slice(&mut outer[..cols])?;
        if !self.is_outbound() {
            leaf.restore_sentinel();
        }
        Ok(())
    }
}
