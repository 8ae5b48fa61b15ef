//! Vertical friction of horizontal momentum.
//!
//! Two time discretizations of the same physics: an explicit flux-form
//! update and an implicit per-column tridiagonal solve. Both average the
//! vertical viscosity onto the velocity point (along x for u, along y
//! for v), apply a no-flux condition at the surface and the seafloor,
//! and, when energy diagnostics are on, book the dissipated kinetic
//! energy on the tracer grid into `k_diss_v`.
//!
//! The implicit dissipation diagnostic deliberately mixes time levels:
//! the flux is built from the post-solve (`taup1`) vertical gradient but
//! weighted by the pre-solve (`tau`) velocity difference, for both
//! components. This reproduces the reference discretization bit for bit;
//! see DESIGN.md before changing it.

use crate::diagnostics::reduction::{u_to_tracer, v_to_tracer};
use crate::fields::{Field3, VelocityField, HALO};
use crate::friction::FrictionConfig;
use crate::grid::masks::{seafloor_u, seafloor_v};
use crate::grid::{ColumnMasks, Grid};
#[cfg(not(feature = "parallel"))]
use crate::solver::solve_implicit;
#[cfg(feature = "parallel")]
use crate::solver::solve_implicit_parallel;

/// Which velocity component a kernel pass operates on; selects the
/// neighbor direction for viscosity averaging and the seafloor pairing.
#[derive(Clone, Copy)]
enum Component {
    Zonal,
    Meridional,
}

impl Component {
    #[inline]
    fn offset(self) -> (usize, usize) {
        match self {
            Component::Zonal => (1, 0),
            Component::Meridional => (0, 1),
        }
    }
}

/// Explicit vertical friction for both velocity components.
///
/// The tendency fields are assigned (not accumulated): the vertical
/// friction pass defines the baseline tendency for the step.
pub fn explicit_vertical_friction(
    grid: &Grid,
    config: &FrictionConfig,
    kappa_m: &Field3,
    u: &VelocityField,
    v: &VelocityField,
    du_mix: &mut Field3,
    dv_mix: &mut Field3,
    k_diss_v: &mut Field3,
) {
    let flux = explicit_flux(grid, kappa_m, &u.tau, &grid.mask_u, Component::Zonal);
    flux_divergence(grid, &flux, &grid.mask_u, du_mix);
    if config.enable_conserve_energy {
        let diss = interface_dissipation(grid, &flux, &u.tau);
        k_diss_v.add_assign(&u_to_tracer(&diss, grid));
    }

    let flux = explicit_flux(grid, kappa_m, &v.tau, &grid.mask_v, Component::Meridional);
    flux_divergence(grid, &flux, &grid.mask_v, dv_mix);
    if config.enable_conserve_energy {
        let diss = interface_dissipation(grid, &flux, &v.tau);
        k_diss_v.add_assign(&v_to_tracer(&diss, grid));
    }
}

/// Implicit vertical friction for both velocity components.
///
/// Solves the backward-Euler diffusion system per water column, writes
/// the result into the `taup1` slot at water levels, and assigns the
/// tendency `(taup1 - tau) / dt` over the stencil interior.
pub fn implicit_vertical_friction(
    grid: &Grid,
    config: &FrictionConfig,
    kappa_m: &Field3,
    u: &mut VelocityField,
    v: &mut VelocityField,
    du_mix: &mut Field3,
    dv_mix: &mut Field3,
    k_diss_v: &mut Field3,
) {
    implicit_component(grid, config, kappa_m, u, du_mix, Component::Zonal);
    if config.enable_conserve_energy {
        let diss = mixed_level_dissipation(grid, kappa_m, u, &grid.mask_u, Component::Zonal);
        k_diss_v.add_assign(&u_to_tracer(&diss, grid));
    }

    implicit_component(grid, config, kappa_m, v, dv_mix, Component::Meridional);
    if config.enable_conserve_energy {
        let diss = mixed_level_dissipation(grid, kappa_m, v, &grid.mask_v, Component::Meridional);
        k_diss_v.add_assign(&v_to_tracer(&diss, grid));
    }
}

/// Viscosity at the velocity point: mean of the two neighboring tracer
/// columns along the component's axis.
#[inline]
fn kappa_face(kappa_m: &Field3, i: usize, j: usize, k: usize, comp: Component) -> f64 {
    let (di, dj) = comp.offset();
    0.5 * (kappa_m[(i, j, k)] + kappa_m[(i + di, j + dj, k)])
}

/// Diffusive flux through each interior w-interface at the current time
/// level. Surface and seafloor interfaces stay zero (no-flux).
fn explicit_flux(
    grid: &Grid,
    kappa_m: &Field3,
    vel: &Field3,
    mask: &Field3,
    comp: Component,
) -> Field3 {
    let (nxp, nyp, nz) = (grid.nxp(), grid.nyp(), grid.nz);
    let mut flux = Field3::zeros(nxp, nyp, nz);
    for i in 1..nxp - HALO {
        for j in 1..nyp - HALO {
            for k in 0..nz - 1 {
                let fxa = kappa_face(kappa_m, i, j, k, comp);
                flux[(i, j, k)] = fxa * (vel[(i, j, k + 1)] - vel[(i, j, k)]) / grid.dzw[k]
                    * mask[(i, j, k + 1)]
                    * mask[(i, j, k)];
            }
        }
    }
    flux
}

/// Tendency = vertical divergence of the interface flux over the layer
/// thickness, masked; assigned over the full horizontal domain.
fn flux_divergence(grid: &Grid, flux: &Field3, mask: &Field3, tend: &mut Field3) {
    let (nxp, nyp, nz) = (grid.nxp(), grid.nyp(), grid.nz);
    for i in 0..nxp {
        for j in 0..nyp {
            tend[(i, j, 0)] = flux[(i, j, 0)] / grid.dzt[0] * mask[(i, j, 0)];
            for k in 1..nz {
                tend[(i, j, k)] =
                    (flux[(i, j, k)] - flux[(i, j, k - 1)]) / grid.dzt[k] * mask[(i, j, k)];
            }
        }
    }
}

/// Dissipation at each interior interface: velocity difference times
/// flux over the interface thickness. The surface level stays zero.
fn interface_dissipation(grid: &Grid, flux: &Field3, vel: &Field3) -> Field3 {
    let (nxp, nyp, nz) = (grid.nxp(), grid.nyp(), grid.nz);
    let mut diss = Field3::zeros(nxp, nyp, nz);
    for i in 1..nxp - HALO {
        for j in 1..nyp - HALO {
            for k in 0..nz - 1 {
                diss[(i, j, k)] =
                    (vel[(i, j, k + 1)] - vel[(i, j, k)]) * flux[(i, j, k)] / grid.dzw[k];
            }
        }
    }
    diss
}

/// Build and solve the implicit diffusion system for one component,
/// writing `taup1` and the tendency.
fn implicit_component(
    grid: &Grid,
    config: &FrictionConfig,
    kappa_m: &Field3,
    vel: &mut VelocityField,
    tend: &mut Field3,
    comp: Component,
) {
    let (nxp, nyp, nz) = (grid.nxp(), grid.nyp(), grid.nz);
    let dt = config.dt_mom;
    let mask = match comp {
        Component::Zonal => &grid.mask_u,
        Component::Meridional => &grid.mask_v,
    };
    let ks = match comp {
        Component::Zonal => seafloor_u(&grid.kbot, 1..nxp - HALO, 1..nyp - HALO),
        Component::Meridional => seafloor_v(&grid.kbot, 1..nxp - HALO, 1..nyp - HALO),
    };
    let masks = ColumnMasks::build(&ks, nz);

    let mut a = Field3::zeros(nxp, nyp, nz);
    let mut b = Field3::zeros(nxp, nyp, nz);
    let mut c = Field3::zeros(nxp, nyp, nz);
    let mut d = Field3::zeros(nxp, nyp, nz);
    let mut b_edge = Field3::zeros(nxp, nyp, nz);
    let mut delta = vec![0.0; nz];

    for i in 1..nxp - HALO {
        for j in 1..nyp - HALO {
            delta[nz - 1] = 0.0;
            for k in 0..nz - 1 {
                let fxa = kappa_face(kappa_m, i, j, k, comp);
                delta[k] =
                    dt / grid.dzw[k] * fxa * mask[(i, j, k + 1)] * mask[(i, j, k)];
            }
            for k in 1..nz {
                a[(i, j, k)] = -delta[k - 1] / grid.dzt[k];
                b[(i, j, k)] = 1.0 + delta[k - 1] / grid.dzt[k];
            }
            for k in 1..nz - 1 {
                b[(i, j, k)] += delta[k] / grid.dzt[k];
            }
            for k in 0..nz {
                // The edge coefficient drops the coupling to the (dry)
                // level below: no flux through the seafloor.
                b_edge[(i, j, k)] = 1.0 + delta[k] / grid.dzt[k];
                c[(i, j, k)] = -delta[k] / grid.dzt[k];
                d[(i, j, k)] = vel.tau[(i, j, k)];
            }
        }
    }

    #[cfg(not(feature = "parallel"))]
    let sol = solve_implicit(&a, &b, &c, &d, &masks, &b_edge);
    #[cfg(feature = "parallel")]
    let sol = solve_implicit_parallel(&a, &b, &c, &d, &masks, &b_edge);

    for i in 1..nxp - HALO {
        for j in 1..nyp - HALO {
            for k in 0..nz {
                if masks.is_water(i, j, k) {
                    vel.taup1[(i, j, k)] = sol[(i, j, k)];
                }
                tend[(i, j, k)] = (vel.taup1[(i, j, k)] - vel.tau[(i, j, k)]) / dt;
            }
        }
    }
}

/// Dissipation diagnostic for the implicit update: post-solve flux,
/// pre-solve velocity difference.
fn mixed_level_dissipation(
    grid: &Grid,
    kappa_m: &Field3,
    vel: &VelocityField,
    mask: &Field3,
    comp: Component,
) -> Field3 {
    let (nxp, nyp, nz) = (grid.nxp(), grid.nyp(), grid.nz);
    let mut diss = Field3::zeros(nxp, nyp, nz);
    for i in 1..nxp - HALO {
        for j in 1..nyp - HALO {
            for k in 0..nz - 1 {
                let fxa = kappa_face(kappa_m, i, j, k, comp);
                let flux = fxa * (vel.taup1[(i, j, k + 1)] - vel.taup1[(i, j, k)]) / grid.dzw[k]
                    * mask[(i, j, k + 1)]
                    * mask[(i, j, k)];
                diss[(i, j, k)] =
                    (vel.tau[(i, j, k + 1)] - vel.tau[(i, j, k)]) * flux / grid.dzw[k];
            }
        }
    }
    diss
}
