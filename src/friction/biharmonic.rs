//! Horizontal biharmonic (hyperviscous) friction.
//!
//! Two Laplacian passes with the square root of the viscosity applied in
//! each, so the composite carries the full coefficient. The second-pass
//! divergence enters the tendency with a minus sign, which is what makes
//! the fourth-order operator damping rather than amplifying. No cosine
//! scaling of the coefficient; the no-slip correction, when enabled,
//! applies in both passes.
//!
//! Before the dissipation diagnostic reads the second-pass fluxes, their
//! zonal halo is refreshed: the first pass shrinks the valid stencil
//! region, and the diagnostic reaches one cell further than the tendency
//! update.

use crate::boundary::BoundaryExchange;
use crate::diagnostics::reduction::{diss_u_to_tracer, diss_v_to_tracer};
use crate::fields::{Field3, VelocityField, HALO};
use crate::friction::harmonic::{
    u_flux_divergence, u_point_fluxes, v_flux_divergence, v_point_fluxes,
};
use crate::friction::FrictionConfig;
use crate::grid::Grid;

/// Horizontal biharmonic friction for both velocity components.
///
/// Accumulates into the tendency fields. When energy diagnostics are on,
/// `k_diss_h` is overwritten with the zonal contribution and the
/// meridional one is added, mirroring the reset the harmonic kernel
/// performs when it runs first.
pub fn biharmonic_friction(
    grid: &Grid,
    config: &FrictionConfig,
    boundary: &dyn BoundaryExchange,
    u: &VelocityField,
    v: &VelocityField,
    du_mix: &mut Field3,
    dv_mix: &mut Field3,
    k_diss_h: &mut Field3,
) {
    let (nxp, nyp, nz) = (grid.nxp(), grid.nyp(), grid.nz);
    let coeff = config.a_hbi.abs().sqrt();
    let noslip = config.enable_noslip_lateral;
    // Shared scratch for the two dissipation passes, as in the harmonic
    // kernel; leftover zonal entries are masked out by the reduction.
    let mut diss = Field3::zeros(nxp, nyp, nz);

    // Zonal component: Laplacian of u, then Laplacian of that.
    let (fe, fn_) = u_point_fluxes(grid, &u.tau, coeff, None, noslip);
    let mut del2 = Field3::zeros(nxp, nyp, nz);
    for i in 1..nxp {
        for j in 1..nyp {
            for k in 0..nz {
                del2[(i, j, k)] = u_flux_divergence(grid, &fe, &fn_, i, j, k);
            }
        }
    }
    let (mut fe, mut fn_) = u_point_fluxes(grid, &del2, coeff, None, noslip);
    for i in HALO..nxp - HALO {
        for j in HALO..nyp - HALO {
            for k in 0..nz {
                du_mix[(i, j, k)] -=
                    grid.mask_u[(i, j, k)] * u_flux_divergence(grid, &fe, &fn_, i, j, k);
            }
        }
    }
    if config.enable_conserve_energy {
        boundary.enforce(&mut fe);
        boundary.enforce(&mut fn_);
        for i in 1..nxp - HALO {
            for j in HALO..nyp - HALO {
                for k in 0..nz {
                    diss[(i, j, k)] = -0.5
                        * ((u.tau[(i + 1, j, k)] - u.tau[(i, j, k)]) * fe[(i, j, k)]
                            + (u.tau[(i, j, k)] - u.tau[(i - 1, j, k)]) * fe[(i - 1, j, k)])
                        / (grid.cost[j] * grid.dxu[i])
                        - 0.5
                            * ((u.tau[(i, j + 1, k)] - u.tau[(i, j, k)]) * fn_[(i, j, k)]
                                + (u.tau[(i, j, k)] - u.tau[(i, j - 1, k)])
                                    * fn_[(i, j - 1, k)])
                            / (grid.cost[j] * grid.dyt[j]);
                }
            }
        }
        k_diss_h.fill_zero();
        k_diss_h.add_assign(&diss_u_to_tracer(&diss, grid));
    }

    // Meridional component.
    let (fe, fn_) = v_point_fluxes(grid, &v.tau, coeff, None, noslip);
    let mut del2 = Field3::zeros(nxp, nyp, nz);
    for i in 1..nxp {
        for j in 1..nyp {
            for k in 0..nz {
                del2[(i, j, k)] = v_flux_divergence(grid, &fe, &fn_, i, j, k);
            }
        }
    }
    let (mut fe, mut fn_) = v_point_fluxes(grid, &del2, coeff, None, noslip);
    for i in HALO..nxp - HALO {
        for j in HALO..nyp - HALO {
            for k in 0..nz {
                dv_mix[(i, j, k)] -=
                    grid.mask_v[(i, j, k)] * v_flux_divergence(grid, &fe, &fn_, i, j, k);
            }
        }
    }
    if config.enable_conserve_energy {
        boundary.enforce(&mut fe);
        boundary.enforce(&mut fn_);
        for i in HALO..nxp - HALO {
            for j in 1..nyp - HALO {
                for k in 0..nz {
                    diss[(i, j, k)] = -0.5
                        * ((v.tau[(i + 1, j, k)] - v.tau[(i, j, k)]) * fe[(i, j, k)]
                            + (v.tau[(i, j, k)] - v.tau[(i - 1, j, k)]) * fe[(i - 1, j, k)])
                        / (grid.cosu[j] * grid.dxt[i])
                        - 0.5
                            * ((v.tau[(i, j + 1, k)] - v.tau[(i, j, k)]) * fn_[(i, j, k)]
                                + (v.tau[(i, j, k)] - v.tau[(i, j - 1, k)])
                                    * fn_[(i, j - 1, k)])
                            / (grid.cosu[j] * grid.dyu[j]);
                }
            }
        }
        k_diss_h.add_assign(&diss_v_to_tracer(&diss, grid));
    }
}
