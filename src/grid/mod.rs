//! Staggered C-grid metrics, masks, and bottom topography.
//!
//! The [`Grid`] owns everything that is immutable for the lifetime of a
//! run: horizontal scale factors, vertical layer thicknesses, spherical
//! cosine factors, cell-face areas, the velocity-point land/sea masks and
//! the per-column seafloor index `kbot`.
//!
//! # Staggering
//!
//! Scalars (tracer points) live at cell centers; the zonal velocity `u`
//! lives on the east face (offset in x), the meridional velocity `v` on
//! the north face (offset in y). Horizontal axes are padded with a 2-cell
//! halo on each side for the 5-point stencils, so a `nx × ny` domain is
//! stored as `(nx + 4) × (ny + 4)`.
//!
//! # Vertical convention
//!
//! Level `k = 0` is the deepest level, `k = nz - 1` is at the surface.
//! `kbot[i, j]` is the 1-based index of the deepest wet cell of a column;
//! 0 marks a fully dry column. A column is water at level `k` iff
//! `kbot > 0 && k >= kbot - 1`.

pub mod masks;

pub use masks::ColumnMasks;

use crate::fields::{Field2, Field3, IntField2, HALO};
use thiserror::Error;

/// Error type for grid construction and validation.
#[derive(Debug, Error)]
pub enum GridError {
    /// A domain extent was zero.
    #[error("grid extents must be positive, got {0}x{1}x{2}")]
    EmptyDomain(usize, usize, usize),

    /// A layer thickness was zero or negative.
    #[error("non-positive layer thickness {value} at level {level} of {axis}")]
    NonPositiveThickness {
        /// `"dzt"` or `"dzw"`.
        axis: &'static str,
        /// Vertical level index.
        level: usize,
        /// Offending value.
        value: f64,
    },

    /// A metric array has the wrong length.
    #[error("metric {name} has length {got}, expected {expected}")]
    MetricLength {
        /// Metric array name.
        name: &'static str,
        /// Actual length.
        got: usize,
        /// Required length.
        expected: usize,
    },

    /// `kbot` points above the top of the water column.
    #[error("kbot value {value} at ({i}, {j}) exceeds nz = {nz}")]
    KbotOutOfRange {
        /// Column index.
        i: usize,
        /// Column index.
        j: usize,
        /// Offending value.
        value: usize,
        /// Number of vertical levels.
        nz: usize,
    },

    /// A velocity mask marks water where `kbot` says seafloor.
    #[error("mask {name} is wet at ({i}, {j}, {k}) below the seafloor")]
    MaskBelowSeafloor {
        /// `"mask_u"` or `"mask_v"`.
        name: &'static str,
        /// Grid point.
        i: usize,
        /// Grid point.
        j: usize,
        /// Grid point.
        k: usize,
    },
}

/// Immutable grid metrics, masks and topography for one model run.
///
/// All 1-D metric arrays are stored over the padded extents. Fields are
/// public: the grid is a plain data bundle that the friction kernels read
/// and never mutate.
#[derive(Clone, Debug)]
pub struct Grid {
    /// Interior extent in x (without halo).
    pub nx: usize,
    /// Interior extent in y (without halo).
    pub ny: usize,
    /// Number of vertical levels.
    pub nz: usize,

    /// Tracer-cell width in x, length `nx + 4`.
    pub dxt: Vec<f64>,
    /// u-cell width in x, length `nx + 4`.
    pub dxu: Vec<f64>,
    /// Tracer-cell width in y, length `ny + 4`.
    pub dyt: Vec<f64>,
    /// v-cell width in y, length `ny + 4`.
    pub dyu: Vec<f64>,
    /// Tracer-level thickness, length `nz`.
    pub dzt: Vec<f64>,
    /// Interface (w-level) thickness, length `nz`.
    pub dzw: Vec<f64>,
    /// Cosine of latitude at tracer rows, length `ny + 4`.
    pub cost: Vec<f64>,
    /// Cosine of latitude at u/v rows, length `ny + 4`.
    pub cosu: Vec<f64>,
    /// Tracer-cell face area.
    pub area_t: Field2,
    /// v-cell face area.
    pub area_v: Field2,

    /// Ocean/land mask at u-points (1.0 water, 0.0 land).
    pub mask_u: Field3,
    /// Ocean/land mask at v-points (1.0 water, 0.0 land).
    pub mask_v: Field3,
    /// 1-based index of the deepest wet cell per column; 0 = dry column.
    pub kbot: IntField2,
}

impl Grid {
    /// Padded extent in x.
    #[inline]
    pub fn nxp(&self) -> usize {
        self.nx + 2 * HALO
    }

    /// Padded extent in y.
    #[inline]
    pub fn nyp(&self) -> usize {
        self.ny + 2 * HALO
    }

    /// Create an all-ocean Cartesian box with uniform spacing.
    ///
    /// Cosine factors are 1 (f-plane), all masks are wet, `kbot = 1`
    /// everywhere (water over the full depth). This is the configuration
    /// used throughout the test suite.
    pub fn cartesian(nx: usize, ny: usize, nz: usize, dx: f64, dy: f64, dz: f64) -> Self {
        let nxp = nx + 2 * HALO;
        let nyp = ny + 2 * HALO;
        Self {
            nx,
            ny,
            nz,
            dxt: vec![dx; nxp],
            dxu: vec![dx; nxp],
            dyt: vec![dy; nyp],
            dyu: vec![dy; nyp],
            dzt: vec![dz; nz],
            dzw: vec![dz; nz],
            cost: vec![1.0; nyp],
            cosu: vec![1.0; nyp],
            area_t: Field2::constant(nxp, nyp, dx * dy),
            area_v: Field2::constant(nxp, nyp, dx * dy),
            mask_u: Field3::constant(nxp, nyp, nz, 1.0),
            mask_v: Field3::constant(nxp, nyp, nz, 1.0),
            kbot: IntField2::constant(nxp, nyp, 1),
        }
    }

    /// Recompute the velocity-point masks from `kbot`.
    ///
    /// A u-point is wet where both adjacent tracer columns reach the
    /// level; likewise for v-points along y. Call after editing `kbot`
    /// to keep the masks consistent.
    pub fn rebuild_masks(&mut self) {
        let (nxp, nyp, nz) = (self.nxp(), self.nyp(), self.nz);
        let wet = |kb: usize, k: usize| kb > 0 && k + 1 >= kb;
        for i in 0..nxp {
            for j in 0..nyp {
                let kb = self.kbot[(i, j)];
                let kb_e = if i + 1 < nxp { self.kbot[(i + 1, j)] } else { 0 };
                let kb_n = if j + 1 < nyp { self.kbot[(i, j + 1)] } else { 0 };
                for k in 0..nz {
                    let t = wet(kb, k);
                    self.mask_u[(i, j, k)] = if t && wet(kb_e, k) { 1.0 } else { 0.0 };
                    self.mask_v[(i, j, k)] = if t && wet(kb_n, k) { 1.0 } else { 0.0 };
                }
            }
        }
    }

    /// Check the structural invariants of the grid.
    ///
    /// Verifies extents, metric lengths, layer-thickness positivity,
    /// `kbot` range, and that the velocity masks never mark water below
    /// the seafloor implied by `kbot`. Physical validity of the metric
    /// values themselves (e.g. monotone latitudes) is a caller concern.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.nx == 0 || self.ny == 0 || self.nz == 0 {
            return Err(GridError::EmptyDomain(self.nx, self.ny, self.nz));
        }
        let checks: [(&'static str, usize, usize); 8] = [
            ("dxt", self.dxt.len(), self.nxp()),
            ("dxu", self.dxu.len(), self.nxp()),
            ("dyt", self.dyt.len(), self.nyp()),
            ("dyu", self.dyu.len(), self.nyp()),
            ("dzt", self.dzt.len(), self.nz),
            ("dzw", self.dzw.len(), self.nz),
            ("cost", self.cost.len(), self.nyp()),
            ("cosu", self.cosu.len(), self.nyp()),
        ];
        for (name, got, expected) in checks {
            if got != expected {
                return Err(GridError::MetricLength {
                    name,
                    got,
                    expected,
                });
            }
        }
        for (axis, dz) in [("dzt", &self.dzt), ("dzw", &self.dzw)] {
            for (level, &value) in dz.iter().enumerate() {
                if value <= 0.0 {
                    return Err(GridError::NonPositiveThickness { axis, level, value });
                }
            }
        }
        for i in 0..self.nxp() {
            for j in 0..self.nyp() {
                let kb = self.kbot[(i, j)];
                if kb > self.nz {
                    return Err(GridError::KbotOutOfRange {
                        i,
                        j,
                        value: kb,
                        nz: self.nz,
                    });
                }
                // Velocity points are wet only where both adjacent tracer
                // columns reach the level; checking against the local kbot
                // alone catches masks that dip below their own seafloor.
                for k in 0..self.nz {
                    let dry = kb == 0 || k + 1 < kb;
                    if dry && self.mask_u[(i, j, k)] != 0.0 {
                        return Err(GridError::MaskBelowSeafloor {
                            name: "mask_u",
                            i,
                            j,
                            k,
                        });
                    }
                    if dry && self.mask_v[(i, j, k)] != 0.0 {
                        return Err(GridError::MaskBelowSeafloor {
                            name: "mask_v",
                            i,
                            j,
                            k,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Print a short summary of the grid for debugging.
    pub fn print_info(&self) {
        let wet: usize = self.kbot.data.iter().filter(|&&kb| kb > 0).count();
        let total = self.nxp() * self.nyp();
        println!(
            "Grid: {}x{}x{} (+{}-cell halo), {:.1}% wet columns",
            self.nx,
            self.ny,
            self.nz,
            HALO,
            100.0 * wet as f64 / total as f64
        );
        println!(
            "  dzt: min={:.3}, max={:.3}",
            self.dzt.iter().copied().fold(f64::INFINITY, f64::min),
            self.dzt.iter().copied().fold(0.0, f64::max)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cartesian_is_valid() {
        let grid = Grid::cartesian(4, 3, 5, 100.0, 200.0, 10.0);
        assert!(grid.validate().is_ok());
        assert_eq!(grid.nxp(), 8);
        assert_eq!(grid.nyp(), 7);
    }

    #[test]
    fn test_empty_domain_rejected() {
        let grid = Grid::cartesian(0, 3, 5, 1.0, 1.0, 1.0);
        assert!(matches!(grid.validate(), Err(GridError::EmptyDomain(..))));
    }

    #[test]
    fn test_bad_thickness_rejected() {
        let mut grid = Grid::cartesian(2, 2, 3, 1.0, 1.0, 1.0);
        grid.dzw[1] = -1.0;
        match grid.validate() {
            Err(GridError::NonPositiveThickness { axis, level, .. }) => {
                assert_eq!(axis, "dzw");
                assert_eq!(level, 1);
            }
            other => panic!("expected thickness error, got {other:?}"),
        }
    }

    #[test]
    fn test_metric_length_rejected() {
        let mut grid = Grid::cartesian(2, 2, 3, 1.0, 1.0, 1.0);
        grid.dxu.pop();
        assert!(matches!(
            grid.validate(),
            Err(GridError::MetricLength { name: "dxu", .. })
        ));
    }

    #[test]
    fn test_mask_below_seafloor_rejected() {
        let mut grid = Grid::cartesian(2, 2, 4, 1.0, 1.0, 1.0);
        // Seafloor at level 2 but mask still wet at level 0.
        grid.kbot[(3, 3)] = 3;
        assert!(matches!(
            grid.validate(),
            Err(GridError::MaskBelowSeafloor { .. })
        ));
        grid.rebuild_masks();
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn test_rebuild_masks_dry_column() {
        let mut grid = Grid::cartesian(2, 2, 3, 1.0, 1.0, 1.0);
        grid.kbot[(3, 3)] = 0;
        grid.rebuild_masks();
        for k in 0..3 {
            assert_eq!(grid.mask_u[(3, 3, k)], 0.0);
            // The u-point west of the dry column is also dry.
            assert_eq!(grid.mask_u[(2, 3, k)], 0.0);
            // v-point south of it likewise.
            assert_eq!(grid.mask_v[(3, 2, k)], 0.0);
        }
    }
}
