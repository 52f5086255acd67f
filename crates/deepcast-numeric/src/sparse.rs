//! Compressed-sparse-column matrix leaf.

use deepcast_session::{Pack, Plain, Result, Session, SparseLeaf};
use deepcast_transport::Transport;

/// A column-major compressed sparse matrix.
///
/// Storage is the classic CSC triple: `values[k]` is the `k`-th stored
/// entry, `inner[k]` its row, and `outer[c]..outer[c + 1]` the range of
/// stored entries belonging to column `c`. `outer` always has `cols + 1`
/// entries with `outer[cols] == values.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseColMatrix<S> {
    rows: usize,
    cols: usize,
    values: Vec<S>,
    inner: Vec<i64>,
    outer: Vec<i64>,
}

impl<S> Default for SparseColMatrix<S> {
    fn default() -> Self {
        Self {
            rows: 0,
            cols: 0,
            values: Vec::new(),
            inner: Vec::new(),
            outer: vec![0],
        }
    }
}

impl<S: Plain + Copy + Default> SparseColMatrix<S> {
    /// Builds a `rows × cols` matrix from `(row, col, value)` triplets.
    ///
    /// Duplicate positions are kept as-is (no summing); entries are stored
    /// in column-major order regardless of the input order.
    pub fn from_triplets(
        rows: usize,
        cols: usize,
        triplets: &[(usize, usize, S)],
    ) -> Self {
        let mut sorted = triplets.to_vec();
        sorted.sort_by_key(|&(row, col, _)| (col, row));

        let mut outer = vec![0i64; cols + 1];
        for &(_, col, _) in &sorted {
            outer[col + 1] += 1;
        }
        for col in 0..cols {
            outer[col + 1] += outer[col];
        }

        Self {
            rows,
            cols,
            values: sorted.iter().map(|&(_, _, v)| v).collect(),
            inner: sorted.iter().map(|&(row, _, _)| row as i64).collect(),
            outer,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of stored entries.
    pub fn nonzeros(&self) -> usize {
        self.values.len()
    }

    /// The stored entry at `(row, col)`, or `None` if that position holds
    /// no entry.
    pub fn get(&self, row: usize, col: usize) -> Option<S> {
        let start = self.outer[col] as usize;
        let end = self.outer[col + 1] as usize;
        self.inner[start..end]
            .iter()
            .position(|&r| r as usize == row)
            .map(|k| self.values[start + k])
    }

    /// All stored entries as `(row, col, value)` triplets in column-major
    /// order.
    pub fn triplets(&self) -> Vec<(usize, usize, S)> {
        let mut out = Vec::with_capacity(self.values.len());
        for col in 0..self.cols {
            let start = self.outer[col] as usize;
            let end = self.outer[col + 1] as usize;
            for k in start..end {
                out.push((self.inner[k] as usize, col, self.values[k]));
            }
        }
        out
    }
}

impl<S: Plain + Copy + Default> SparseLeaf for SparseColMatrix<S> {
    type Scalar = S;
    type Index = i64;

    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn nonzeros(&self) -> usize {
        self.values.len()
    }

    fn reshape(&mut self, rows: usize, cols: usize, nonzeros: usize) {
        self.rows = rows;
        self.cols = cols;
        self.values.clear();
        self.values.resize(nonzeros, S::default());
        self.inner.clear();
        self.inner.resize(nonzeros, 0);
        self.outer.clear();
        self.outer.resize(cols + 1, 0);
    }

    fn values_mut(&mut self) -> &mut [S] {
        &mut self.values
    }

    fn inner_indices_mut(&mut self) -> &mut [i64] {
        &mut self.inner
    }

    fn outer_offsets_mut(&mut self) -> &mut [i64] {
        &mut self.outer
    }

    fn restore_sentinel(&mut self) {
        self.outer[self.cols] = self.values.len() as i64;
    }
}

impl<S: Plain + Copy + Default> Pack for SparseColMatrix<S> {
    fn pack<T: Transport>(&mut self, session: &mut Session<T>) -> Result<()> {
        session.pack_sparse(self)
    }
}
