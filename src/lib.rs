//! Momentum friction and dissipation kernels for a hydrostatic ocean
//! model on an Arakawa C-grid.
//!
//! The crate computes the dissipative part of the horizontal momentum
//! tendency for one time step: vertical friction (explicit or implicit),
//! lateral harmonic and biharmonic friction, Rayleigh damping, linear
//! and quadratic bottom drag, and external momentum sources. When the
//! energy diagnostics are enabled, every process also books the kinetic
//! energy it removes onto the tracer grid, so a closed energy budget can
//! be assembled downstream.
//!
//! # Layout
//!
//! - [`fields`]: flat-storage field containers with a 2-cell halo
//! - [`grid`]: C-grid metrics, land/sea masks, bottom topography
//! - [`solver`]: per-column tridiagonal solver for implicit mixing
//! - [`diagnostics`]: reduction of dissipation onto the tracer grid
//! - [`boundary`]: zonal halo exchange
//! - [`friction`]: the kernels and the [`friction::compute_friction`]
//!   orchestrator
//! - [`state`]: the mutable per-step state bundle
//!
//! # Example
//!
//! ```
//! use momix_rs::boundary::CyclicExchange;
//! use momix_rs::friction::{compute_friction, FrictionConfig};
//! use momix_rs::grid::Grid;
//! use momix_rs::state::State;
//!
//! let grid = Grid::cartesian(16, 16, 8, 5e3, 5e3, 50.0);
//! let mut state = State::new(&grid);
//! let config = FrictionConfig::new()
//!     .with_dt(900.0)
//!     .with_implicit_vert_friction()
//!     .with_hor_friction(5e4)
//!     .with_bottom_friction(1e-5);
//! let boundary = CyclicExchange::new(true);
//! compute_friction(&grid, &config, &boundary, None, &mut state).unwrap();
//! ```

pub mod boundary;
pub mod diagnostics;
pub mod fields;
pub mod friction;
pub mod grid;
pub mod solver;
pub mod state;

pub use boundary::{BoundaryExchange, CyclicExchange};
pub use fields::{Field2, Field3, IntField2, VelocityField, HALO};
pub use friction::{compute_friction, FrictionConfig, FrictionError};
pub use grid::{Grid, GridError};
pub use state::State;
