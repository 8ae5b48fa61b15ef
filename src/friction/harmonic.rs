//! Horizontal harmonic (Laplacian) friction.
//!
//! Flux-form Laplacian on the sphere: east and north face fluxes per
//! velocity point, then the metric divergence. Optional pieces are the
//! cosine-of-latitude scaling of the viscosity and a no-slip correction
//! that adds the ghost-cell flux at lateral land-water interfaces.
//!
//! The flux builders are shared with the biharmonic kernel, which runs
//! them twice with the square root of its viscosity and no cosine
//! scaling.

use crate::diagnostics::reduction::{diss_u_to_tracer, diss_v_to_tracer};
use crate::fields::{Field3, VelocityField, HALO};
use crate::friction::FrictionConfig;
use crate::grid::Grid;

/// Per-row viscosity factor: `coeff` times a power of the row's cosine,
/// or plain `coeff` when scaling is off.
#[inline]
fn row_coeff(coeff: f64, cos_row: f64, cos_power: Option<f64>) -> f64 {
    match cos_power {
        Some(p) => coeff * cos_row.powf(p),
        None => coeff,
    }
}

/// East and north diffusive fluxes for a u-point field.
///
/// The cosine scaling uses the tracer-row cosine for east fluxes and the
/// u-row cosine for north fluxes. With `noslip`, land-adjacent north
/// faces get the ghost-cell contribution that drives the velocity to
/// zero at the wall.
pub(crate) fn u_point_fluxes(
    grid: &Grid,
    vel: &Field3,
    coeff: f64,
    cos_power: Option<f64>,
    noslip: bool,
) -> (Field3, Field3) {
    let (nxp, nyp, nz) = (grid.nxp(), grid.nyp(), grid.nz);
    let mask = &grid.mask_u;
    let mut flux_east = Field3::zeros(nxp, nyp, nz);
    let mut flux_north = Field3::zeros(nxp, nyp, nz);

    for i in 0..nxp - 1 {
        for j in 0..nyp {
            let fxa = row_coeff(coeff, grid.cost[j], cos_power);
            for k in 0..nz {
                flux_east[(i, j, k)] = fxa * (vel[(i + 1, j, k)] - vel[(i, j, k)])
                    / (grid.cost[j] * grid.dxt[i + 1])
                    * mask[(i + 1, j, k)]
                    * mask[(i, j, k)];
            }
        }
    }
    for i in 0..nxp {
        for j in 0..nyp - 1 {
            let fya = row_coeff(coeff, grid.cosu[j], cos_power);
            for k in 0..nz {
                flux_north[(i, j, k)] = fya * (vel[(i, j + 1, k)] - vel[(i, j, k)]) / grid.dyu[j]
                    * mask[(i, j + 1, k)]
                    * mask[(i, j, k)]
                    * grid.cosu[j];
                if noslip {
                    flux_north[(i, j, k)] += 2.0 * fya * vel[(i, j + 1, k)] / grid.dyu[j]
                        * mask[(i, j + 1, k)]
                        * (1.0 - mask[(i, j, k)])
                        * grid.cosu[j]
                        - 2.0 * fya * vel[(i, j, k)] / grid.dyu[j]
                            * (1.0 - mask[(i, j + 1, k)])
                            * mask[(i, j, k)]
                            * grid.cosu[j];
                }
            }
        }
    }
    (flux_east, flux_north)
}

/// East and north diffusive fluxes for a v-point field.
///
/// Mirror of [`u_point_fluxes`] with the staggering swapped: east fluxes
/// sit on u-rows, north fluxes on tracer rows, and the no-slip
/// correction applies to east faces.
pub(crate) fn v_point_fluxes(
    grid: &Grid,
    vel: &Field3,
    coeff: f64,
    cos_power: Option<f64>,
    noslip: bool,
) -> (Field3, Field3) {
    let (nxp, nyp, nz) = (grid.nxp(), grid.nyp(), grid.nz);
    let mask = &grid.mask_v;
    let mut flux_east = Field3::zeros(nxp, nyp, nz);
    let mut flux_north = Field3::zeros(nxp, nyp, nz);

    for i in 0..nxp - 1 {
        for j in 0..nyp {
            let fxa = row_coeff(coeff, grid.cosu[j], cos_power);
            for k in 0..nz {
                flux_east[(i, j, k)] = fxa * (vel[(i + 1, j, k)] - vel[(i, j, k)])
                    / (grid.cosu[j] * grid.dxu[i])
                    * mask[(i + 1, j, k)]
                    * mask[(i, j, k)];
                if noslip {
                    flux_east[(i, j, k)] += 2.0 * fxa * vel[(i + 1, j, k)]
                        / (grid.cosu[j] * grid.dxu[i])
                        * mask[(i + 1, j, k)]
                        * (1.0 - mask[(i, j, k)])
                        - 2.0 * fxa * vel[(i, j, k)] / (grid.cosu[j] * grid.dxu[i])
                            * (1.0 - mask[(i + 1, j, k)])
                            * mask[(i, j, k)];
                }
            }
        }
    }
    for i in 0..nxp {
        for j in 0..nyp - 1 {
            let fya = row_coeff(coeff, grid.cost[j + 1], cos_power);
            for k in 0..nz {
                flux_north[(i, j, k)] = fya * (vel[(i, j + 1, k)] - vel[(i, j, k)])
                    / grid.dyt[j + 1]
                    * grid.cost[j + 1]
                    * mask[(i, j + 1, k)]
                    * mask[(i, j, k)];
            }
        }
    }
    (flux_east, flux_north)
}

/// Metric flux divergence at a u-point.
#[inline]
pub(crate) fn u_flux_divergence(
    grid: &Grid,
    flux_east: &Field3,
    flux_north: &Field3,
    i: usize,
    j: usize,
    k: usize,
) -> f64 {
    (flux_east[(i, j, k)] - flux_east[(i - 1, j, k)]) / (grid.cost[j] * grid.dxu[i])
        + (flux_north[(i, j, k)] - flux_north[(i, j - 1, k)]) / (grid.cost[j] * grid.dyt[j])
}

/// Metric flux divergence at a v-point.
#[inline]
pub(crate) fn v_flux_divergence(
    grid: &Grid,
    flux_east: &Field3,
    flux_north: &Field3,
    i: usize,
    j: usize,
    k: usize,
) -> f64 {
    (flux_east[(i, j, k)] - flux_east[(i - 1, j, k)]) / (grid.cosu[j] * grid.dxt[i])
        + (flux_north[(i, j, k)] - flux_north[(i, j - 1, k)]) / (grid.dyu[j] * grid.cosu[j])
}

/// Horizontal harmonic friction for both velocity components.
///
/// Accumulates into the tendency fields and, when energy diagnostics are
/// on, resets `k_diss_h` and books the lateral dissipation of both
/// components into it.
pub fn harmonic_friction(
    grid: &Grid,
    config: &FrictionConfig,
    u: &VelocityField,
    v: &VelocityField,
    du_mix: &mut Field3,
    dv_mix: &mut Field3,
    k_diss_h: &mut Field3,
) {
    let (nxp, nyp, nz) = (grid.nxp(), grid.nyp(), grid.nz);
    let cos_power = config
        .enable_hor_friction_cos_scaling
        .then_some(config.hor_friction_cos_power);
    let noslip = config.enable_noslip_lateral;
    // One scratch shared by both dissipation passes. The meridional
    // write region does not cover the zonal one; the leftover columns
    // are masked out by the seafloor index of the reduction.
    let mut diss = Field3::zeros(nxp, nyp, nz);

    let (fe, fn_) = u_point_fluxes(grid, &u.tau, config.a_h, cos_power, noslip);
    for i in HALO..nxp - HALO {
        for j in HALO..nyp - HALO {
            for k in 0..nz {
                du_mix[(i, j, k)] +=
                    grid.mask_u[(i, j, k)] * u_flux_divergence(grid, &fe, &fn_, i, j, k);
            }
        }
    }
    if config.enable_conserve_energy {
        k_diss_h.fill_zero();
        for i in 1..nxp - HALO {
            for j in HALO..nyp - HALO {
                for k in 0..nz {
                    diss[(i, j, k)] = 0.5
                        * ((u.tau[(i + 1, j, k)] - u.tau[(i, j, k)]) * fe[(i, j, k)]
                            + (u.tau[(i, j, k)] - u.tau[(i - 1, j, k)]) * fe[(i - 1, j, k)])
                        / (grid.cost[j] * grid.dxu[i])
                        + 0.5
                            * ((u.tau[(i, j + 1, k)] - u.tau[(i, j, k)]) * fn_[(i, j, k)]
                                + (u.tau[(i, j, k)] - u.tau[(i, j - 1, k)])
                                    * fn_[(i, j - 1, k)])
                            / (grid.cost[j] * grid.dyt[j]);
                }
            }
        }
        k_diss_h.add_assign(&diss_u_to_tracer(&diss, grid));
    }

    let (fe, fn_) = v_point_fluxes(grid, &v.tau, config.a_h, cos_power, noslip);
    for i in HALO..nxp - HALO {
        for j in HALO..nyp - HALO {
            for k in 0..nz {
                dv_mix[(i, j, k)] +=
                    grid.mask_v[(i, j, k)] * v_flux_divergence(grid, &fe, &fn_, i, j, k);
            }
        }
    }
    if config.enable_conserve_energy {
        for i in HALO..nxp - HALO {
            for j in 1..nyp - HALO {
                for k in 0..nz {
                    diss[(i, j, k)] = 0.5
                        * ((v.tau[(i + 1, j, k)] - v.tau[(i, j, k)]) * fe[(i, j, k)]
                            + (v.tau[(i, j, k)] - v.tau[(i - 1, j, k)]) * fe[(i - 1, j, k)])
                        / (grid.cosu[j] * grid.dxt[i])
                        + 0.5
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
