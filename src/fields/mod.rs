//! Contiguous field containers for the staggered C-grid.
//!
//! All fields use flat `Vec<f64>` storage for cache-friendly access and
//! LLVM auto-vectorization. 3-D fields are laid out with the vertical
//! index fastest, so a water column `(i, j, 0..nz)` is a contiguous
//! slice; the per-column tridiagonal solver and the `parallel` feature
//! both rely on this.
//!
//! Horizontal axes carry a 2-cell halo on each side: a field over an
//! `nx × ny` interior is allocated as `(nx + 4) × (ny + 4)`.

use std::ops::{Index, IndexMut};

/// Width of the horizontal halo on each side of the domain.
pub const HALO: usize = 2;

/// A 2-D scalar field on the (padded) horizontal grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Field2 {
    /// Values, stored as `data[i * ny + j]`.
    pub data: Vec<f64>,
    /// Padded extent in x.
    pub nx: usize,
    /// Padded extent in y.
    pub ny: usize,
}

impl Field2 {
    /// Create a zero-initialized field with padded extents `nx × ny`.
    pub fn zeros(nx: usize, ny: usize) -> Self {
        Self {
            data: vec![0.0; nx * ny],
            nx,
            ny,
        }
    }

    /// Create a field filled with a constant value.
    pub fn constant(nx: usize, ny: usize, value: f64) -> Self {
        Self {
            data: vec![value; nx * ny],
            nx,
            ny,
        }
    }

    /// Create a field from existing data.
    pub fn from_data(data: Vec<f64>, nx: usize, ny: usize) -> Self {
        debug_assert_eq!(data.len(), nx * ny);
        Self { data, nx, ny }
    }

    #[inline]
    fn idx(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.nx && j < self.ny);
        i * self.ny + j
    }

    /// Set every value to zero.
    pub fn fill_zero(&mut self) {
        self.data.fill(0.0);
    }
}

impl Index<(usize, usize)> for Field2 {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[self.idx(i, j)]
    }
}

impl IndexMut<(usize, usize)> for Field2 {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        let n = self.idx(i, j);
        &mut self.data[n]
    }
}

/// A 2-D integer field, used for the per-column seafloor index `kbot`.
///
/// Values are 1-based level indices; 0 marks a fully dry column.
#[derive(Clone, Debug, PartialEq)]
pub struct IntField2 {
    /// Values, stored as `data[i * ny + j]`.
    pub data: Vec<usize>,
    /// Padded extent in x.
    pub nx: usize,
    /// Padded extent in y.
    pub ny: usize,
}

impl IntField2 {
    /// Create a zero-initialized (all-dry) field.
    pub fn zeros(nx: usize, ny: usize) -> Self {
        Self {
            data: vec![0; nx * ny],
            nx,
            ny,
        }
    }

    /// Create a field filled with a constant index.
    pub fn constant(nx: usize, ny: usize, value: usize) -> Self {
        Self {
            data: vec![value; nx * ny],
            nx,
            ny,
        }
    }

    #[inline]
    fn idx(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.nx && j < self.ny);
        i * self.ny + j
    }
}

impl Index<(usize, usize)> for IntField2 {
    type Output = usize;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &usize {
        &self.data[self.idx(i, j)]
    }
}

impl IndexMut<(usize, usize)> for IntField2 {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut usize {
        let n = self.idx(i, j);
        &mut self.data[n]
    }
}

/// A 3-D scalar field on the (padded) grid, vertical index fastest.
#[derive(Clone, Debug, PartialEq)]
pub struct Field3 {
    /// Values, stored as `data[(i * ny + j) * nz + k]`.
    pub data: Vec<f64>,
    /// Padded extent in x.
    pub nx: usize,
    /// Padded extent in y.
    pub ny: usize,
    /// Number of vertical levels.
    pub nz: usize,
}

impl Field3 {
    /// Create a zero-initialized field.
    pub fn zeros(nx: usize, ny: usize, nz: usize) -> Self {
        Self {
            data: vec![0.0; nx * ny * nz],
            nx,
            ny,
            nz,
        }
    }

    /// Create a field filled with a constant value.
    pub fn constant(nx: usize, ny: usize, nz: usize, value: f64) -> Self {
        Self {
            data: vec![value; nx * ny * nz],
            nx,
            ny,
            nz,
        }
    }

    /// Create a field from existing data.
    pub fn from_data(data: Vec<f64>, nx: usize, ny: usize, nz: usize) -> Self {
        debug_assert_eq!(data.len(), nx * ny * nz);
        Self { data, nx, ny, nz }
    }

    #[inline]
    fn idx(&self, i: usize, j: usize, k: usize) -> usize {
        debug_assert!(i < self.nx && j < self.ny && k < self.nz);
        (i * self.ny + j) * self.nz + k
    }

    /// The water column `(i, j, 0..nz)` as a contiguous slice.
    #[inline]
    pub fn column(&self, i: usize, j: usize) -> &[f64] {
        let start = self.idx(i, j, 0);
        &self.data[start..start + self.nz]
    }

    /// The water column `(i, j, 0..nz)` as a mutable contiguous slice.
    #[inline]
    pub fn column_mut(&mut self, i: usize, j: usize) -> &mut [f64] {
        let start = self.idx(i, j, 0);
        let nz = self.nz;
        &mut self.data[start..start + nz]
    }

    /// Set every value to zero.
    pub fn fill_zero(&mut self) {
        self.data.fill(0.0);
    }

    /// Element-wise `self += other`.
    pub fn add_assign(&mut self, other: &Field3) {
        debug_assert_eq!(self.data.len(), other.data.len());
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += b;
        }
    }

    /// Maximum absolute value over the whole field.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |m, v| m.max(v.abs()))
    }

    /// Sum over the whole field.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}

impl Index<(usize, usize, usize)> for Field3 {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j, k): (usize, usize, usize)) -> &f64 {
        &self.data[self.idx(i, j, k)]
    }
}

impl IndexMut<(usize, usize, usize)> for Field3 {
    #[inline]
    fn index_mut(&mut self, (i, j, k): (usize, usize, usize)) -> &mut f64 {
        let n = self.idx(i, j, k);
        &mut self.data[n]
    }
}

/// A horizontal velocity component with its two time slots.
///
/// `tau` holds the current time level, `taup1` the next one. The implicit
/// vertical friction solve writes `taup1` directly; everything else reads
/// `tau`. Keeping the slots as separate fields stages implicit updates
/// without aliasing reads and writes.
#[derive(Clone, Debug)]
pub struct VelocityField {
    /// Current time level.
    pub tau: Field3,
    /// Next time level.
    pub taup1: Field3,
}

impl VelocityField {
    /// Create a zero-initialized velocity field.
    pub fn zeros(nx: usize, ny: usize, nz: usize) -> Self {
        Self {
            tau: Field3::zeros(nx, ny, nz),
            taup1: Field3::zeros(nx, ny, nz),
        }
    }
}
