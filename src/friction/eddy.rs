//! Seam for the eddy-driven (TEM) friction collaborator.
//!
//! The transformed-Eulerian-mean closure lives outside this crate; the
//! friction step only needs to hand it the state at the right point in
//! the sequence and account for its dissipation slot. Implementors
//! update the staged velocities and tendencies and book their energy
//! conversion into `k_diss_gm`.

use crate::friction::FrictionConfig;
use crate::grid::Grid;
use crate::state::State;

/// Eddy-driven vertical friction applied between the vertical and
/// lateral passes of the friction step.
pub trait EddyFriction {
    /// Apply the closure for one time step.
    fn apply(&self, grid: &Grid, config: &FrictionConfig, state: &mut State);
}

/// Collaborator that does nothing; useful in tests and in runs where the
/// closure is configured but inactive.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEddyFriction;

impl EddyFriction for NoEddyFriction {
    fn apply(&self, _grid: &Grid, _config: &FrictionConfig, _state: &mut State) {}
}
