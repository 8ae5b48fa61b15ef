//! The mutable model state threaded through one friction step.
//!
//! The [`State`] owns the velocity fields with their two time slots, the
//! shared tendency accumulators, the per-process dissipation accumulators
//! on the tracer grid, and the spatially varying coefficients. The
//! friction kernels receive read access to inputs and read-modify-write
//! access to the named accumulators for one time step; no kernel retains
//! state between calls.

use crate::fields::{Field2, Field3, VelocityField};
use crate::grid::Grid;

/// Velocities, tendency and dissipation accumulators, and spatially
/// varying coefficient fields for one model run.
///
/// The dissipation accumulators (`k_diss_*`) are written only when
/// energy-conservation diagnostics are enabled; consumers must treat
/// them as stale otherwise.
#[derive(Clone, Debug)]
pub struct State {
    /// Zonal velocity (u-points).
    pub u: VelocityField,
    /// Meridional velocity (v-points).
    pub v: VelocityField,
    /// Vertical viscosity at tracer points.
    pub kappa_m: Field3,

    /// Zonal momentum tendency, zeroed by the orchestrator each step.
    pub du_mix: Field3,
    /// Meridional momentum tendency, zeroed by the orchestrator each step.
    pub dv_mix: Field3,

    /// Dissipation by vertical friction (tracer grid).
    pub k_diss_v: Field3,
    /// Dissipation by lateral friction (tracer grid).
    pub k_diss_h: Field3,
    /// Dissipation by bottom drag, Rayleigh damping and sources.
    pub k_diss_bot: Field3,
    /// Dissipation by the eddy (TEM) parameterization.
    pub k_diss_gm: Field3,

    /// Spatially varying linear bottom drag at u-points.
    pub r_bot_var_u: Field2,
    /// Spatially varying linear bottom drag at v-points.
    pub r_bot_var_v: Field2,
    /// External zonal momentum source.
    pub u_source: Field3,
    /// External meridional momentum source.
    pub v_source: Field3,
}

impl State {
    /// Create a zero-initialized state matching the grid's extents.
    pub fn new(grid: &Grid) -> Self {
        let (nxp, nyp, nz) = (grid.nxp(), grid.nyp(), grid.nz);
        Self {
            u: VelocityField::zeros(nxp, nyp, nz),
            v: VelocityField::zeros(nxp, nyp, nz),
            kappa_m: Field3::zeros(nxp, nyp, nz),
            du_mix: Field3::zeros(nxp, nyp, nz),
            dv_mix: Field3::zeros(nxp, nyp, nz),
            k_diss_v: Field3::zeros(nxp, nyp, nz),
            k_diss_h: Field3::zeros(nxp, nyp, nz),
            k_diss_bot: Field3::zeros(nxp, nyp, nz),
            k_diss_gm: Field3::zeros(nxp, nyp, nz),
            r_bot_var_u: Field2::zeros(nxp, nyp),
            r_bot_var_v: Field2::zeros(nxp, nyp),
            u_source: Field3::zeros(nxp, nyp, nz),
            v_source: Field3::zeros(nxp, nyp, nz),
        }
    }
}
