//! Energy-conservation bookkeeping helpers.
//!
//! When the energy diagnostics are enabled, every dissipative process
//! reports the kinetic energy it removes, reduced onto the tracer grid
//! by the routines in [`reduction`].

pub mod reduction;

pub use reduction::{diss_u_to_tracer, diss_v_to_tracer, dissipation_on_wgrid, u_to_tracer, v_to_tracer};
