//! Reduction of velocity-grid dissipation fields onto the tracer grid.
//!
//! Dissipation is diagnosed where the momentum lives (u- or v-points,
//! often on w-levels) but booked on the tracer grid. Two ingredients:
//!
//! - a horizontal two-point average, length-weighted for the zonal grid
//!   and area-weighted for the meridional grid, symmetric around the
//!   source cell;
//! - a vertical redistribution onto w-levels that respects the column's
//!   seafloor: land levels are zeroed and the seafloor-adjacent level
//!   absorbs the share of the level below it.
//!
//! The total (grid-summed) dissipation is preserved by the averaging up
//! to the weighting assumptions; this is exercised as a property test
//! rather than an exact law at domain boundaries.

use crate::fields::{Field3, IntField2, HALO};
use crate::grid::masks::{seafloor_u, seafloor_v};
use crate::grid::Grid;

/// Average a u-grid field onto the tracer grid.
///
/// Interior tracer cells receive the `dxu`-weighted mean of the fluxes on
/// their two bounding u-points; everything outside the interior is zero.
pub fn u_to_tracer(f: &Field3, grid: &Grid) -> Field3 {
    debug_assert_eq!(f.nx, grid.nxp());
    let (nxp, nyp, nz) = (f.nx, f.ny, f.nz);
    let mut out = Field3::zeros(nxp, nyp, nz);
    for i in HALO..nxp - HALO {
        for j in 0..nyp {
            for k in 0..nz {
                out[(i, j, k)] = (grid.dxu[i] * f[(i, j, k)] + grid.dxu[i - 1] * f[(i - 1, j, k)])
                    / (2.0 * grid.dxt[i]);
            }
        }
    }
    out
}

/// Average a v-grid field onto the tracer grid.
///
/// Interior tracer cells receive the `area_v`-weighted mean of their two
/// bounding v-points.
pub fn v_to_tracer(f: &Field3, grid: &Grid) -> Field3 {
    debug_assert_eq!(f.ny, grid.nyp());
    let (nxp, nyp, nz) = (f.nx, f.ny, f.nz);
    let mut out = Field3::zeros(nxp, nyp, nz);
    for i in 0..nxp {
        for j in HALO..nyp - HALO {
            for k in 0..nz {
                out[(i, j, k)] = (grid.area_v[(i, j)] * f[(i, j, k)]
                    + grid.area_v[(i, j - 1)] * f[(i, j - 1, k)])
                    / (2.0 * grid.area_t[(i, j)]);
            }
        }
    }
    out
}

/// Redistribute a tracer-level dissipation onto w-levels, respecting the
/// per-column effective seafloor index `ks`.
///
/// Water levels above the seafloor get the half-sum of the two adjacent
/// tracer levels; the seafloor-adjacent level additionally absorbs its
/// lower neighbor's share, weighted by the thickness ratio
/// `dzw[k-1] / dzw[k]` (clamped at the bottom of the array). The surface
/// level maps through unchanged for wet columns. Levels at or below the
/// seafloor are zeroed so no dissipation is attributed to inactive cells.
pub fn dissipation_on_wgrid(f: &Field3, dzw: &[f64], ks: &IntField2) -> Field3 {
    debug_assert_eq!(dzw.len(), f.nz);
    let (nxp, nyp, nz) = (f.nx, f.ny, f.nz);
    let mut out = Field3::zeros(nxp, nyp, nz);
    for i in 0..nxp {
        for j in 0..nyp {
            let kb = ks[(i, j)];
            if kb == 0 {
                continue;
            }
            let edge = kb - 1;
            for k in edge..nz - 1 {
                let half_sum = 0.5 * (f[(i, j, k)] + f[(i, j, k + 1)]);
                out[(i, j, k)] = if k == edge {
                    let dzw_below = if k > 0 { dzw[k - 1] } else { dzw[0] };
                    half_sum + 0.5 * f[(i, j, k)] * dzw_below / dzw[k]
                } else {
                    half_sum
                };
            }
            out[(i, j, nz - 1)] = f[(i, j, nz - 1)];
        }
    }
    out
}

/// Book a u-point dissipation field on the tracer grid: w-level
/// redistribution with the u-face seafloor index, then the zonal
/// average.
pub fn diss_u_to_tracer(f: &Field3, grid: &Grid) -> Field3 {
    let (nxp, nyp) = (grid.nxp(), grid.nyp());
    let ks = seafloor_u(&grid.kbot, 1..nxp - 2, HALO..nyp - HALO);
    let w = dissipation_on_wgrid(f, &grid.dzw, &ks);
    u_to_tracer(&w, grid)
}

/// Book a v-point dissipation field on the tracer grid: w-level
/// redistribution with the v-face seafloor index, then the meridional
/// average.
pub fn diss_v_to_tracer(f: &Field3, grid: &Grid) -> Field3 {
    let (nxp, nyp) = (grid.nxp(), grid.nyp());
    let ks = seafloor_v(&grid.kbot, HALO..nxp - HALO, 1..nyp - 2);
    let w = dissipation_on_wgrid(f, &grid.dzw, &ks);
    v_to_tracer(&w, grid)
}
