//! Dense matrix and vector leaves with contiguous column-major storage.

use deepcast_session::{DenseLeaf, Pack, Plain, Result, Session};
use deepcast_transport::Transport;

/// A dense, column-major matrix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DenseMatrix<S> {
    rows: usize,
    cols: usize,
    data: Vec<S>,
}

impl<S: Plain + Copy + Default> DenseMatrix<S> {
    /// Creates a zero-filled `rows × cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![S::default(); rows * cols],
        }
    }

    /// Creates a matrix by evaluating `f(row, col)` for every entry.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> S,
    ) -> Self {
        let mut matrix = Self::new(rows, cols);
        for col in 0..cols {
            for row in 0..rows {
                matrix.data[row + col * rows] = f(row, col);
            }
        }
        matrix
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> S {
        self.data[row + col * self.rows]
    }

    /// Sets the entry at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: S) {
        self.data[row + col * self.rows] = value;
    }

    /// The backing storage in column-major order.
    pub fn as_slice(&self) -> &[S] {
        &self.data
    }
}

impl<S: Plain + Copy + Default> DenseLeaf for DenseMatrix<S> {
    type Scalar = S;

    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn reshape(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        self.data.clear();
        self.data.resize(rows * cols, S::default());
    }

    fn storage_mut(&mut self) -> &mut [S] {
        &mut self.data
    }
}

impl<S: Plain + Copy + Default> Pack for DenseMatrix<S> {
    fn pack<T: Transport>(&mut self, session: &mut Session<T>) -> Result<()> {
        session.pack_dense(self)
    }
}

/// A dense vector: a dense leaf with a single column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DenseVector<S> {
    data: Vec<S>,
}

impl<S: Plain + Copy + Default> DenseVector<S> {
    /// Creates a zero-filled vector of `len` entries.
    pub fn new(len: usize) -> Self {
        Self {
            data: vec![S::default(); len],
        }
    }

    /// Creates a vector from existing entries.
    pub fn from_slice(entries: &[S]) -> Self {
        Self {
            data: entries.to_vec(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the vector has no entries.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The entry at `index`.
    pub fn get(&self, index: usize) -> S {
        self.data[index]
    }

    /// Sets the entry at `index`.
    pub fn set(&mut self, index: usize, value: S) {
        self.data[index] = value;
    }

    /// The backing storage.
    pub fn as_slice(&self) -> &[S] {
        &self.data
    }
}

impl<S: Plain + Copy + Default> DenseLeaf for DenseVector<S> {
    type Scalar = S;

    fn rows(&self) -> usize {
        self.data.len()
    }

    fn cols(&self) -> usize {
        1
    }

    fn reshape(&mut self, rows: usize, cols: usize) {
        self.data.clear();
        self.data.resize(rows * cols, S::default());
    }

    fn storage_mut(&mut self) -> &mut [S] {
        &mut self.data
    }
}

impl<S: Plain + Copy + Default> Pack for DenseVector<S> {
    fn pack<T: Transport>(&mut self, session: &mut Session<T>) -> Result<()> {
        session.pack_dense(self)
    }
}
