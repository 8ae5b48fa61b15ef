//! External momentum sources.
//!
//! Adds prescribed source fields (tides, wave forcing, restoring zones)
//! to the tendencies. The work done against the flow is booked as
//! dissipation with a minus sign: a source aligned with the velocity
//! injects energy, so its booked dissipation is negative.

use crate::diagnostics::reduction::{diss_u_to_tracer, diss_v_to_tracer};
use crate::fields::{Field3, VelocityField};
use crate::friction::FrictionConfig;
use crate::grid::Grid;

/// Apply the external momentum source fields to both components.
pub fn momentum_sources(
    grid: &Grid,
    config: &FrictionConfig,
    u: &VelocityField,
    v: &VelocityField,
    u_source: &Field3,
    v_source: &Field3,
    du_mix: &mut Field3,
    dv_mix: &mut Field3,
    k_diss_bot: &mut Field3,
) {
    let (nxp, nyp, nz) = (grid.nxp(), grid.nyp(), grid.nz);
    for i in 0..nxp {
        for j in 0..nyp {
            for k in 0..nz {
                du_mix[(i, j, k)] += grid.mask_u[(i, j, k)] * u_source[(i, j, k)];
                dv_mix[(i, j, k)] += grid.mask_v[(i, j, k)] * v_source[(i, j, k)];
            }
        }
    }
    if config.enable_conserve_energy {
        let mut diss = Field3::zeros(nxp, nyp, nz);
        for i in 0..nxp {
            for j in 0..nyp {
                for k in 0..nz {
                    diss[(i, j, k)] =
                        -grid.mask_u[(i, j, k)] * u.tau[(i, j, k)] * u_source[(i, j, k)];
                }
            }
        }
        k_diss_bot.add_assign(&diss_u_to_tracer(&diss, grid));
        for i in 0..nxp {
            for j in 0..nyp {
                for k in 0..nz {
                    diss[(i, j, k)] =
                        -grid.mask_v[(i, j, k)] * v.tau[(i, j, k)] * v_source[(i, j, k)];
                }
            }
        }
        k_diss_bot.add_assign(&diss_v_to_tracer(&diss, grid));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::State;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_sources_add_to_tendency() {
        let grid = Grid::cartesian(3, 3, 2, 1.0, 1.0, 1.0);
        let mut s = State::new(&grid);
        s.u_source[(3, 3, 1)] = 0.25;
        s.v_source[(4, 2, 0)] = -0.5;
        s.du_mix[(3, 3, 1)] = 1.0;
        let config = FrictionConfig::new();
        momentum_sources(
            &grid, &config, &s.u, &s.v, &s.u_source, &s.v_source, &mut s.du_mix, &mut s.dv_mix,
            &mut s.k_diss_bot,
        );
        assert!((s.du_mix[(3, 3, 1)] - 1.25).abs() < TOL);
        assert!((s.dv_mix[(4, 2, 0)] + 0.5).abs() < TOL);
    }

    #[test]
    fn test_source_masked_on_land() {
        let mut grid = Grid::cartesian(3, 3, 2, 1.0, 1.0, 1.0);
        grid.kbot[(3, 3)] = 0;
        grid.rebuild_masks();
        let mut s = State::new(&grid);
        s.u_source = Field3::constant(grid.nxp(), grid.nyp(), 2, 1.0);
        let config = FrictionConfig::new();
        momentum_sources(
            &grid, &config, &s.u, &s.v, &s.u_source, &s.v_source, &mut s.du_mix, &mut s.dv_mix,
            &mut s.k_diss_bot,
        );
        assert!(s.du_mix[(3, 3, 0)].abs() < TOL);
        assert!((s.du_mix[(4, 3, 0)] - 1.0).abs() < TOL);
    }

    #[test]
    fn test_aligned_source_books_negative_dissipation() {
        let grid = Grid::cartesian(3, 3, 1, 1.0, 1.0, 1.0);
        let mut s = State::new(&grid);
        s.u.tau = Field3::constant(grid.nxp(), grid.nyp(), 1, 1.0);
        s.u_source = Field3::constant(grid.nxp(), grid.nyp(), 1, 0.5);
        let config = FrictionConfig::new().with_conserve_energy();
        momentum_sources(
            &grid, &config, &s.u, &s.v, &s.u_source, &s.v_source, &mut s.du_mix, &mut s.dv_mix,
            &mut s.k_diss_bot,
        );
        assert!(s.k_diss_bot[(3, 3, 0)] < -TOL);
    }
}
