//! Linear solvers for the implicit time discretization.
//!
//! The only solver the friction core needs is the specialized per-column
//! Thomas routine; the band structure is fixed (3 diagonals) and small,
//! so a general sparse package would be wasted here.

pub mod tridiagonal;

pub use tridiagonal::solve_implicit;

#[cfg(feature = "parallel")]
pub use tridiagonal::solve_implicit_parallel;
