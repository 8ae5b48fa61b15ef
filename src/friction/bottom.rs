//! Rayleigh damping and bottom drag.
//!
//! Three drag laws acting on the velocity directly rather than on its
//! gradients: interior Rayleigh damping over the whole water column, and
//! linear and quadratic drag applied only at each column's deepest wet
//! level. All of them book their dissipation into `k_diss_bot` through
//! the w-level redistribution, so the energy sink lands on the cell
//! touching the seafloor.

use crate::diagnostics::reduction::{diss_u_to_tracer, diss_v_to_tracer};
use crate::fields::{Field2, Field3, VelocityField, HALO};
use crate::friction::FrictionConfig;
use crate::grid::Grid;

/// Interior Rayleigh damping of both velocity components.
pub fn rayleigh_friction(
    grid: &Grid,
    config: &FrictionConfig,
    u: &VelocityField,
    v: &VelocityField,
    du_mix: &mut Field3,
    dv_mix: &mut Field3,
    k_diss_bot: &mut Field3,
) {
    let (nxp, nyp, nz) = (grid.nxp(), grid.nyp(), grid.nz);
    for i in 0..nxp {
        for j in 0..nyp {
            for k in 0..nz {
                du_mix[(i, j, k)] -= grid.mask_u[(i, j, k)] * config.r_ray * u.tau[(i, j, k)];
                dv_mix[(i, j, k)] -= grid.mask_v[(i, j, k)] * config.r_ray * v.tau[(i, j, k)];
            }
        }
    }
    if config.enable_conserve_energy {
        let mut diss = Field3::zeros(nxp, nyp, nz);
        for i in 0..nxp {
            for j in 0..nyp {
                for k in 0..nz {
                    let uu = u.tau[(i, j, k)];
                    diss[(i, j, k)] = grid.mask_u[(i, j, k)] * config.r_ray * uu * uu;
                }
            }
        }
        k_diss_bot.add_assign(&diss_u_to_tracer(&diss, grid));
        for i in 0..nxp {
            for j in 0..nyp {
                for k in 0..nz {
                    let vv = v.tau[(i, j, k)];
                    diss[(i, j, k)] = grid.mask_v[(i, j, k)] * config.r_ray * vv * vv;
                }
            }
        }
        k_diss_bot.add_assign(&diss_v_to_tracer(&diss, grid));
    }
}

/// Linear bottom drag at each water column's deepest wet level.
///
/// The drag coefficient is either the uniform `r_bot` or, with the
/// variable-drag option, the per-column fields staggered to the velocity
/// points.
pub fn linear_bottom_friction(
    grid: &Grid,
    config: &FrictionConfig,
    r_bot_var_u: &Field2,
    r_bot_var_v: &Field2,
    u: &VelocityField,
    v: &VelocityField,
    du_mix: &mut Field3,
    dv_mix: &mut Field3,
    k_diss_bot: &mut Field3,
) {
    let (nxp, nyp, nz) = (grid.nxp(), grid.nyp(), grid.nz);
    let mut diss = Field3::zeros(nxp, nyp, nz);

    for i in 1..nxp - HALO {
        for j in HALO..nyp - HALO {
            let kb = grid.kbot[(i, j)].max(grid.kbot[(i + 1, j)]);
            if kb == 0 {
                continue;
            }
            let k = kb - 1;
            let coef = if config.enable_bottom_friction_var {
                r_bot_var_u[(i, j)]
            } else {
                config.r_bot
            };
            let drag = grid.mask_u[(i, j, k)] * coef * u.tau[(i, j, k)];
            du_mix[(i, j, k)] -= drag;
            diss[(i, j, k)] = drag * u.tau[(i, j, k)];
        }
    }
    if config.enable_conserve_energy {
        k_diss_bot.add_assign(&diss_u_to_tracer(&diss, grid));
    }

    diss.fill_zero();
    for i in HALO..nxp - HALO {
        for j in 1..nyp - HALO {
            let kb = grid.kbot[(i, j)].max(grid.kbot[(i, j + 1)]);
            if kb == 0 {
                continue;
            }
            let k = kb - 1;
            let coef = if config.enable_bottom_friction_var {
                r_bot_var_v[(i, j)]
            } else {
                config.r_bot
            };
            let drag = grid.mask_v[(i, j, k)] * coef * v.tau[(i, j, k)];
            dv_mix[(i, j, k)] -= drag;
            diss[(i, j, k)] = drag * v.tau[(i, j, k)];
        }
    }
    if config.enable_conserve_energy {
        k_diss_bot.add_assign(&diss_v_to_tracer(&diss, grid));
    }
}

/// Quadratic bottom drag at each water column's deepest wet level.
///
/// The drag scales with the local speed, estimated per u-point from the
/// zonal velocity and the mean square of the four surrounding meridional
/// velocities (and vice versa at v-points).
pub fn quadratic_bottom_friction(
    grid: &Grid,
    config: &FrictionConfig,
    u: &VelocityField,
    v: &VelocityField,
    du_mix: &mut Field3,
    dv_mix: &mut Field3,
    k_diss_bot: &mut Field3,
) {
    let (nxp, nyp, nz) = (grid.nxp(), grid.nyp(), grid.nz);
    let mut diss = Field3::zeros(nxp, nyp, nz);

    for i in 1..nxp - HALO {
        for j in HALO..nyp - HALO {
            let kb = grid.kbot[(i, j)].max(grid.kbot[(i + 1, j)]);
            if kb == 0 {
                continue;
            }
            let k = kb - 1;
            let fxa = grid.mask_v[(i, j, k)] * v.tau[(i, j, k)].powi(2)
                + grid.mask_v[(i, j - 1, k)] * v.tau[(i, j - 1, k)].powi(2)
                + grid.mask_v[(i + 1, j, k)] * v.tau[(i + 1, j, k)].powi(2)
                + grid.mask_v[(i + 1, j - 1, k)] * v.tau[(i + 1, j - 1, k)].powi(2);
            let uu = u.tau[(i, j, k)];
            let speed = (uu * uu + 0.25 * fxa).sqrt();
            let drag = grid.mask_u[(i, j, k)] * config.r_quad_bot * uu * speed / grid.dzt[k];
            du_mix[(i, j, k)] -= drag;
            diss[(i, j, k)] = drag * uu;
        }
    }
    if config.enable_conserve_energy {
        k_diss_bot.add_assign(&diss_u_to_tracer(&diss, grid));
    }

    diss.fill_zero();
    for i in HALO..nxp - HALO {
        for j in 1..nyp - HALO {
            let kb = grid.kbot[(i, j)].max(grid.kbot[(i, j + 1)]);
            if kb == 0 {
                continue;
            }
            let k = kb - 1;
            let fxa = grid.mask_u[(i, j, k)] * u.tau[(i, j, k)].powi(2)
                + grid.mask_u[(i - 1, j, k)] * u.tau[(i - 1, j, k)].powi(2)
                + grid.mask_u[(i, j + 1, k)] * u.tau[(i, j + 1, k)].powi(2)
                + grid.mask_u[(i - 1, j + 1, k)] * u.tau[(i - 1, j + 1, k)].powi(2);
            let vv = v.tau[(i, j, k)];
            let speed = (vv * vv + 0.25 * fxa).sqrt();
            let drag = grid.mask_v[(i, j, k)] * config.r_quad_bot * vv * speed / grid.dzt[k];
            dv_mix[(i, j, k)] -= drag;
            diss[(i, j, k)] = drag * vv;
        }
    }
    if config.enable_conserve_energy {
        k_diss_bot.add_assign(&diss_v_to_tracer(&diss, grid));
    }
}
