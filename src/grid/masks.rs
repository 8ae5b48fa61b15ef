//! Water-column masks for velocity-point pairs.
//!
//! Vertical-friction and bottom-friction routines need to know, per
//! horizontal velocity point, which levels are ocean and which single
//! level sits on the seafloor. Because a velocity point lies between two
//! tracer columns, its effective seafloor is the *shallower* of the two,
//! i.e. the maximum of the two adjacent `kbot` values.

use crate::fields::IntField2;
use std::ops::Range;

/// Effective seafloor index at u-points: `max(kbot[i, j], kbot[i+1, j])`.
///
/// Only the given index ranges are filled; everything outside stays 0
/// (dry), so downstream masks ignore halo columns the stencils never
/// compute.
pub fn seafloor_u(kbot: &IntField2, i_range: Range<usize>, j_range: Range<usize>) -> IntField2 {
    let mut ks = IntField2::zeros(kbot.nx, kbot.ny);
    for i in i_range {
        for j in j_range.clone() {
            ks[(i, j)] = kbot[(i, j)].max(kbot[(i + 1, j)]);
        }
    }
    ks
}

/// Effective seafloor index at v-points: `max(kbot[i, j], kbot[i, j+1])`.
pub fn seafloor_v(kbot: &IntField2, i_range: Range<usize>, j_range: Range<usize>) -> IntField2 {
    let mut ks = IntField2::zeros(kbot.nx, kbot.ny);
    for i in i_range {
        for j in j_range.clone() {
            ks[(i, j)] = kbot[(i, j)].max(kbot[(i, j + 1)]);
        }
    }
    ks
}

/// Per-column ocean/seafloor classification derived from an effective
/// seafloor index field.
///
/// For a column with seafloor index `ks` (1-based, 0 = dry):
/// - `water` is true at levels `k >= ks - 1`,
/// - `edge` is true exactly at `k == ks - 1` (the deepest wet level),
/// - dry columns are all-false.
#[derive(Clone, Debug)]
pub struct ColumnMasks {
    nx: usize,
    ny: usize,
    nz: usize,
    /// True where the column holds any water.
    wet_column: Vec<bool>,
    /// True at ocean levels, `data[(i * ny + j) * nz + k]`.
    water: Vec<bool>,
    /// True at the single seafloor-adjacent level of each wet column.
    edge: Vec<bool>,
}

impl ColumnMasks {
    /// Build the masks for `nz` levels from an effective seafloor field.
    pub fn build(ks: &IntField2, nz: usize) -> Self {
        let (nx, ny) = (ks.nx, ks.ny);
        let mut wet_column = vec![false; nx * ny];
        let mut water = vec![false; nx * ny * nz];
        let mut edge = vec![false; nx * ny * nz];

        for i in 0..nx {
            for j in 0..ny {
                let col = i * ny + j;
                let kb = ks[(i, j)];
                if kb == 0 {
                    continue;
                }
                wet_column[col] = true;
                for k in (kb - 1)..nz {
                    water[col * nz + k] = true;
                }
                edge[col * nz + (kb - 1)] = true;
            }
        }

        Self {
            nx,
            ny,
            nz,
            wet_column,
            water,
            edge,
        }
    }

    /// Number of vertical levels.
    #[inline]
    pub fn nz(&self) -> usize {
        self.nz
    }

    /// Whether the column holds any water.
    #[inline]
    pub fn is_wet_column(&self, i: usize, j: usize) -> bool {
        debug_assert!(i < self.nx && j < self.ny);
        self.wet_column[i * self.ny + j]
    }

    /// Whether level `k` of column `(i, j)` is ocean.
    #[inline]
    pub fn is_water(&self, i: usize, j: usize, k: usize) -> bool {
        debug_assert!(i < self.nx && j < self.ny && k < self.nz);
        self.water[(i * self.ny + j) * self.nz + k]
    }

    /// Whether level `k` is the seafloor-adjacent level of column `(i, j)`.
    #[inline]
    pub fn is_edge(&self, i: usize, j: usize, k: usize) -> bool {
        debug_assert!(i < self.nx && j < self.ny && k < self.nz);
        self.edge[(i * self.ny + j) * self.nz + k]
    }

    /// The water mask of one column as a contiguous slice.
    #[inline]
    pub fn water_column(&self, i: usize, j: usize) -> &[bool] {
        debug_assert!(i < self.nx && j < self.ny);
        let start = (i * self.ny + j) * self.nz;
        &self.water[start..start + self.nz]
    }

    /// The edge mask of one column as a contiguous slice.
    #[inline]
    pub fn edge_column(&self, i: usize, j: usize) -> &[bool] {
        debug_assert!(i < self.nx && j < self.ny);
        let start = (i * self.ny + j) * self.nz;
        &self.edge[start..start + self.nz]
    }
}
