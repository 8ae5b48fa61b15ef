//! The friction step: dissipative momentum tendencies for one time step.
//!
//! [`compute_friction`] runs the enabled parameterizations in a fixed
//! sequence over the shared tendency accumulators:
//!
//! 1. vertical friction (implicit, then explicit),
//! 2. the eddy (TEM) collaborator,
//! 3. lateral harmonic and biharmonic friction,
//! 4. Rayleigh damping, linear and quadratic bottom drag,
//! 5. external momentum sources.
//!
//! The tendencies are assigned fresh each call; the dissipation
//! accumulators are reset only when the energy diagnostics are enabled,
//! so a fully disabled step leaves the state untouched apart from the
//! tendency reset.

pub mod biharmonic;
pub mod bottom;
pub mod config;
pub mod eddy;
pub mod harmonic;
pub mod sources;
pub mod vertical;

pub use biharmonic::biharmonic_friction;
pub use bottom::{linear_bottom_friction, quadratic_bottom_friction, rayleigh_friction};
pub use config::FrictionConfig;
pub use eddy::{EddyFriction, NoEddyFriction};
pub use harmonic::harmonic_friction;
pub use sources::momentum_sources;
pub use vertical::{explicit_vertical_friction, implicit_vertical_friction};

use crate::boundary::BoundaryExchange;
use crate::grid::Grid;
use crate::state::State;
use thiserror::Error;

/// Error type for the friction step.
#[derive(Debug, Error)]
pub enum FrictionError {
    /// A vertical friction scheme needs a positive time step.
    #[error("vertical friction requires a positive time step, got {0}")]
    NonPositiveTimeStep(f64),

    /// TEM friction is enabled but no collaborator was supplied.
    #[error("TEM friction enabled without an eddy friction implementation")]
    MissingEddyFriction,
}

/// Compute the dissipative momentum tendencies for one time step.
///
/// `du_mix` and `dv_mix` are rebuilt from scratch. With
/// `enable_conserve_energy`, the dissipation accumulators owned by this
/// step (`k_diss_v`, `k_diss_h`, `k_diss_bot`, and `k_diss_gm` when the
/// eddy closure is off) are reset and refilled by the enabled kernels.
pub fn compute_friction(
    grid: &Grid,
    config: &FrictionConfig,
    boundary: &dyn BoundaryExchange,
    eddy: Option<&dyn EddyFriction>,
    state: &mut State,
) -> Result<(), FrictionError> {
    let vertical_on =
        config.enable_implicit_vert_friction || config.enable_explicit_vert_friction;
    if vertical_on && config.dt_mom <= 0.0 {
        return Err(FrictionError::NonPositiveTimeStep(config.dt_mom));
    }

    state.du_mix.fill_zero();
    state.dv_mix.fill_zero();
    if config.enable_conserve_energy {
        state.k_diss_v.fill_zero();
        state.k_diss_bot.fill_zero();
    }

    if config.enable_implicit_vert_friction {
        implicit_vertical_friction(
            grid,
            config,
            &state.kappa_m,
            &mut state.u,
            &mut state.v,
            &mut state.du_mix,
            &mut state.dv_mix,
            &mut state.k_diss_v,
        );
    }
    if config.enable_explicit_vert_friction {
        explicit_vertical_friction(
            grid,
            config,
            &state.kappa_m,
            &state.u,
            &state.v,
            &mut state.du_mix,
            &mut state.dv_mix,
            &mut state.k_diss_v,
        );
    }

    if config.enable_tem_friction {
        let eddy = eddy.ok_or(FrictionError::MissingEddyFriction)?;
        eddy.apply(grid, config, state);
    } else if config.enable_conserve_energy {
        state.k_diss_gm.fill_zero();
    }

    if config.enable_hor_friction {
        harmonic_friction(
            grid,
            config,
            &state.u,
            &state.v,
            &mut state.du_mix,
            &mut state.dv_mix,
            &mut state.k_diss_h,
        );
    }
    if config.enable_biharmonic_friction {
        biharmonic_friction(
            grid,
            config,
            boundary,
            &state.u,
            &state.v,
            &mut state.du_mix,
            &mut state.dv_mix,
            &mut state.k_diss_h,
        );
    }

    if config.enable_ray_friction {
        rayleigh_friction(
            grid,
            config,
            &state.u,
            &state.v,
            &mut state.du_mix,
            &mut state.dv_mix,
            &mut state.k_diss_bot,
        );
    }
    if config.enable_bottom_friction {
        linear_bottom_friction(
            grid,
            config,
            &state.r_bot_var_u,
            &state.r_bot_var_v,
            &state.u,
            &state.v,
            &mut state.du_mix,
            &mut state.dv_mix,
            &mut state.k_diss_bot,
        );
    }
    if config.enable_quadratic_bottom_friction {
        quadratic_bottom_friction(
            grid,
            config,
            &state.u,
            &state.v,
            &mut state.du_mix,
            &mut state.dv_mix,
            &mut state.k_diss_bot,
        );
    }

    if config.enable_momentum_sources {
        momentum_sources(
            grid,
            config,
            &state.u,
            &state.v,
            &state.u_source,
            &state.v_source,
            &mut state.du_mix,
            &mut state.dv_mix,
            &mut state.k_diss_bot,
        );
    }

    Ok(())
}
