//! Per-column tridiagonal (Thomas) solver for implicit vertical mixing.
//!
//! Each water column carries an independent system
//! `a[k]·x[k-1] + b[k]·x[k] + c[k]·x[k+1] = d[k]`. The main diagonal at a
//! column's seafloor-adjacent level is overridden by `b_edge`, which
//! encodes the no-flux bottom condition. Levels outside the water mask
//! become identity rows with the right-hand side kept, so dry columns
//! (and the land part of partial columns) pass `d` through unchanged.
//!
//! The solver assumes the caller built a diagonally dominant system
//! (non-negative diffusivities, positive time step); it does not validate
//! stability.

use crate::fields::Field3;
use crate::grid::ColumnMasks;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Solve the per-column systems, returning the solution field.
///
/// All fields must share the same shape as the mask set; the column
/// layout (vertical index fastest) makes each column a contiguous slice.
///
/// # Arguments
///
/// * `a`, `b`, `c` - sub-, main- and super-diagonal coefficients
/// * `d` - right-hand side
/// * `masks` - water/edge classification per column (see [`ColumnMasks`])
/// * `b_edge` - main-diagonal replacement applied at each column's edge level
pub fn solve_implicit(
    a: &Field3,
    b: &Field3,
    c: &Field3,
    d: &Field3,
    masks: &ColumnMasks,
    b_edge: &Field3,
) -> Field3 {
    debug_assert_eq!(a.data.len(), d.data.len());
    debug_assert_eq!(b.data.len(), d.data.len());
    debug_assert_eq!(c.data.len(), d.data.len());
    debug_assert_eq!(b_edge.data.len(), d.data.len());
    debug_assert_eq!(masks.nz(), d.nz);

    let nz = d.nz;
    let ny = d.ny;
    let mut out = d.clone();

    out.data.chunks_mut(nz).enumerate().for_each(|(col, x)| {
        let (i, j) = (col / ny, col % ny);
        if !masks.is_wet_column(i, j) {
            // Pass-through: x already holds d for this column.
            return;
        }
        let s = col * nz;
        solve_column(
            &a.data[s..s + nz],
            &b.data[s..s + nz],
            &c.data[s..s + nz],
            &d.data[s..s + nz],
            masks.water_column(i, j),
            masks.edge_column(i, j),
            &b_edge.data[s..s + nz],
            x,
        );
    });

    out
}

/// Parallel variant of [`solve_implicit`]: columns are independent, so
/// the work distributes over contiguous column chunks with no
/// synchronization.
#[cfg(feature = "parallel")]
pub fn solve_implicit_parallel(
    a: &Field3,
    b: &Field3,
    c: &Field3,
    d: &Field3,
    masks: &ColumnMasks,
    b_edge: &Field3,
) -> Field3 {
    debug_assert_eq!(a.data.len(), d.data.len());
    debug_assert_eq!(masks.nz(), d.nz);

    let nz = d.nz;
    let ny = d.ny;
    let mut out = d.clone();

    out.data
        .par_chunks_mut(nz)
        .enumerate()
        .for_each(|(col, x)| {
            let (i, j) = (col / ny, col % ny);
            if !masks.is_wet_column(i, j) {
                return;
            }
            let s = col * nz;
            solve_column(
                &a.data[s..s + nz],
                &b.data[s..s + nz],
                &c.data[s..s + nz],
                &d.data[s..s + nz],
                masks.water_column(i, j),
                masks.edge_column(i, j),
                &b_edge.data[s..s + nz],
                x,
            );
        });

    out
}

/// Thomas algorithm for one column with per-level masking.
///
/// Masked (land) levels are identity rows keeping `d`, and the kernels
/// guarantee the sub-diagonal vanishes at the edge level, so the water
/// part of the column never couples to the land part below it.
#[allow(clippy::too_many_arguments)]
fn solve_column(
    a: &[f64],
    b: &[f64],
    c: &[f64],
    d: &[f64],
    water: &[bool],
    edge: &[bool],
    b_edge: &[f64],
    x: &mut [f64],
) {
    let nz = d.len();
    let row = |k: usize| -> (f64, f64, f64) {
        if water[k] {
            let bk = if edge[k] { b_edge[k] } else { b[k] };
            (a[k], bk, c[k])
        } else {
            (0.0, 1.0, 0.0)
        }
    };

    // Forward elimination.
    let mut cp = vec![0.0; nz];
    let mut dp = vec![0.0; nz];
    let (_, b0, c0) = row(0);
    cp[0] = c0 / b0;
    dp[0] = d[0] / b0;
    for k in 1..nz {
        let (ak, bk, ck) = row(k);
        let m = bk - ak * cp[k - 1];
        cp[k] = ck / m;
        dp[k] = (d[k] - ak * dp[k - 1]) / m;
    }

    // Back substitution.
    x[nz - 1] = dp[nz - 1];
    for k in (0..nz - 1).rev() {
        x[k] = dp[k] - cp[k] * x[k + 1];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::IntField2;

    const TOL: f64 = 1e-12;

    fn single_column_masks(ks_val: usize, nz: usize) -> ColumnMasks {
        let mut ks = IntField2::zeros(1, 1);
        ks[(0, 0)] = ks_val;
        ColumnMasks::build(&ks, nz)
    }

    #[test]
    fn test_identity_system_returns_rhs() {
        let nz = 4;
        let a = Field3::zeros(1, 1, nz);
        let b = Field3::constant(1, 1, nz, 1.0);
        let c = Field3::zeros(1, 1, nz);
        let d = Field3::from_data(vec![3.0, -1.0, 2.5, 0.25], 1, 1, nz);
        let b_edge = Field3::constant(1, 1, nz, 1.0);
        let masks = single_column_masks(1, nz);

        let x = solve_implicit(&a, &b, &c, &d, &masks, &b_edge);
        for k in 0..nz {
            assert!((x[(0, 0, k)] - d[(0, 0, k)]).abs() < TOL);
        }
    }

    #[test]
    fn test_dry_column_passes_through() {
        let nz = 3;
        // Arbitrary garbage coefficients: a dry column must ignore them.
        let a = Field3::constant(1, 1, nz, 5.0);
        let b = Field3::constant(1, 1, nz, -2.0);
        let c = Field3::constant(1, 1, nz, 9.0);
        let d = Field3::from_data(vec![1.0, 2.0, 3.0], 1, 1, nz);
        let b_edge = Field3::zeros(1, 1, nz);
        let masks = single_column_masks(0, nz);

        let x = solve_implicit(&a, &b, &c, &d, &masks, &b_edge);
        assert_eq!(x.data, d.data);
    }

    #[test]
    fn test_land_levels_keep_rhs() {
        let nz = 4;
        // Seafloor at level 2: levels 0 and 1 are land.
        let masks = single_column_masks(3, nz);
        let a = Field3::zeros(1, 1, nz);
        let mut b = Field3::constant(1, 1, nz, 2.0);
        b[(0, 0, 0)] = -7.0; // never read: land
        let c = Field3::zeros(1, 1, nz);
        let d = Field3::from_data(vec![4.0, 5.0, 6.0, 8.0], 1, 1, nz);
        let b_edge = Field3::constant(1, 1, nz, 2.0);

        let x = solve_implicit(&a, &b, &c, &d, &masks, &b_edge);
        assert!((x[(0, 0, 0)] - 4.0).abs() < TOL);
        assert!((x[(0, 0, 1)] - 5.0).abs() < TOL);
        assert!((x[(0, 0, 2)] - 3.0).abs() < TOL);
        assert!((x[(0, 0, 3)] - 4.0).abs() < TOL);
    }

    #[test]
    fn test_edge_override_applied() {
        let nz = 2;
        let masks = single_column_masks(1, nz);
        let a = Field3::zeros(1, 1, nz);
        let b = Field3::constant(1, 1, nz, 1.0);
        let c = Field3::zeros(1, 1, nz);
        let d = Field3::from_data(vec![6.0, 6.0], 1, 1, nz);
        // Edge level 0 gets b = 3 instead of 1.
        let b_edge = Field3::constant(1, 1, nz, 3.0);

        let x = solve_implicit(&a, &b, &c, &d, &masks, &b_edge);
        assert!((x[(0, 0, 0)] - 2.0).abs() < TOL);
        assert!((x[(0, 0, 1)] - 6.0).abs() < TOL);
    }

    #[test]
    fn test_known_diffusion_system() {
        // Hand-solvable 3-level system:
        //   [ 2 -1  0 ] [x0]   [1]
        //   [-1  2 -1 ] [x1] = [0]
        //   [ 0 -1  2 ] [x2]   [1]
        // Solution: x = [1, 1, 1].
        let nz = 3;
        let masks = single_column_masks(1, nz);
        let a = Field3::from_data(vec![0.0, -1.0, -1.0], 1, 1, nz);
        let b = Field3::constant(1, 1, nz, 2.0);
        let c = Field3::from_data(vec![-1.0, -1.0, 0.0], 1, 1, nz);
        let d = Field3::from_data(vec![1.0, 0.0, 1.0], 1, 1, nz);
        // Edge override identical to b so the system stays as written.
        let b_edge = Field3::constant(1, 1, nz, 2.0);

        let x = solve_implicit(&a, &b, &c, &d, &masks, &b_edge);
        for k in 0..nz {
            assert!(
                (x[(0, 0, k)] - 1.0).abs() < TOL,
                "x[{}] = {}",
                k,
                x[(0, 0, k)]
            );
        }
    }

    #[test]
    fn test_multiple_columns_independent() {
        let nz = 2;
        let mut ks = IntField2::zeros(2, 1);
        ks[(0, 0)] = 1;
        ks[(1, 0)] = 0; // dry
        let masks = ColumnMasks::build(&ks, nz);

        let a = Field3::zeros(2, 1, nz);
        let b = Field3::constant(2, 1, nz, 2.0);
        let c = Field3::zeros(2, 1, nz);
        let d = Field3::from_data(vec![2.0, 4.0, 10.0, 12.0], 2, 1, nz);
        let b_edge = Field3::constant(2, 1, nz, 2.0);

        let x = solve_implicit(&a, &b, &c, &d, &masks, &b_edge);
        // Wet column solved...
        assert!((x[(0, 0, 0)] - 1.0).abs() < TOL);
        assert!((x[(0, 0, 1)] - 2.0).abs() < TOL);
        // ...dry column untouched.
        assert!((x[(1, 0, 0)] - 10.0).abs() < TOL);
        assert!((x[(1, 0, 1)] - 12.0).abs() < TOL);
    }
}
