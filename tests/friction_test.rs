//! End-to-end tests of the friction step through the orchestrator.

use momix_rs::boundary::CyclicExchange;
use momix_rs::fields::Field3;
use momix_rs::friction::{compute_friction, FrictionConfig};
use momix_rs::grid::Grid;
use momix_rs::state::State;

const TOL: f64 = 1e-12;

fn checkerboard(field: &mut Field3) {
    for i in 0..field.nx {
        for j in 0..field.ny {
            for k in 0..field.nz {
                field[(i, j, k)] = if (i + j + k) % 2 == 0 { 0.5 } else { -0.5 };
            }
        }
    }
}

#[test]
fn test_zero_coefficients_give_zero_tendency() {
    // Every process enabled but with zero coefficients and viscosity:
    // tendencies and booked dissipation must vanish.
    let grid = Grid::cartesian(6, 6, 4, 1.0, 1.0, 1.0);
    let mut state = State::new(&grid);
    checkerboard(&mut state.u.tau);
    checkerboard(&mut state.v.tau);

    let mut config = FrictionConfig::new()
        .with_dt(1.0)
        .with_implicit_vert_friction()
        .with_explicit_vert_friction()
        .with_hor_friction(0.0)
        .with_biharmonic_friction(0.0)
        .with_ray_friction(0.0)
        .with_bottom_friction(0.0)
        .with_quadratic_bottom_friction(0.0)
        .with_conserve_energy();
    config.enable_momentum_sources = true;

    let bc = CyclicExchange::new(false);
    compute_friction(&grid, &config, &bc, None, &mut state).unwrap();

    assert!(state.du_mix.max_abs() < TOL);
    assert!(state.dv_mix.max_abs() < TOL);
    assert!(state.k_diss_v.max_abs() < TOL);
    assert!(state.k_diss_h.max_abs() < TOL);
    assert!(state.k_diss_bot.max_abs() < TOL);
}

#[test]
fn test_disabled_step_is_idempotent() {
    // With everything off, the step only clears the tendencies; running
    // it twice changes nothing further.
    let grid = Grid::cartesian(4, 4, 3, 1.0, 1.0, 1.0);
    let mut state = State::new(&grid);
    checkerboard(&mut state.u.tau);
    state.du_mix[(3, 3, 1)] = 42.0;

    let config = FrictionConfig::new();
    let bc = CyclicExchange::new(false);
    compute_friction(&grid, &config, &bc, None, &mut state).unwrap();
    let u_after = state.u.tau.clone();
    let du_after = state.du_mix.clone();

    compute_friction(&grid, &config, &bc, None, &mut state).unwrap();
    assert_eq!(state.u.tau.data, u_after.data);
    assert_eq!(state.du_mix.data, du_after.data);
    assert!(state.du_mix.max_abs() < TOL);
}

#[test]
fn test_implicit_column_golden_values() {
    // Single full-depth column, unit spacing and viscosity, dt = 1,
    // linear profile u = [0, 1, 2, 3]. The backward-Euler system is
    //   2x0 - x1 = 0
    //   -x0 + 3x1 - x2 = 1
    //   -x1 + 3x2 - x3 = 2
    //   -x2 + 2x3 = 3
    // with solution x = [4, 8, 13, 17] / 7.
    let grid = Grid::cartesian(1, 1, 4, 1.0, 1.0, 1.0);
    let mut state = State::new(&grid);
    state.kappa_m = Field3::constant(grid.nxp(), grid.nyp(), 4, 1.0);
    let (i, j) = (2, 2);
    for k in 0..4 {
        state.u.tau[(i, j, k)] = k as f64;
    }

    let config = FrictionConfig::new().with_dt(1.0).with_implicit_vert_friction();
    let bc = CyclicExchange::new(false);
    compute_friction(&grid, &config, &bc, None, &mut state).unwrap();

    let expected = [4.0 / 7.0, 8.0 / 7.0, 13.0 / 7.0, 17.0 / 7.0];
    for k in 0..4 {
        assert!(
            (state.u.taup1[(i, j, k)] - expected[k]).abs() < TOL,
            "level {k}: {} vs {}",
            state.u.taup1[(i, j, k)],
            expected[k]
        );
        assert!((state.du_mix[(i, j, k)] - (expected[k] - k as f64)).abs() < TOL);
    }
}

#[test]
fn test_land_points_feel_no_friction() {
    let mut grid = Grid::cartesian(5, 5, 3, 1.0, 1.0, 1.0);
    grid.kbot[(4, 4)] = 0;
    grid.rebuild_masks();
    let mut state = State::new(&grid);
    for i in 0..grid.nxp() {
        for j in 0..grid.nyp() {
            for k in 0..3 {
                state.u.tau[(i, j, k)] = grid.mask_u[(i, j, k)] * (1.0 + 0.1 * k as f64);
                state.v.tau[(i, j, k)] = grid.mask_v[(i, j, k)] * 0.5;
            }
        }
    }

    let config = FrictionConfig::new()
        .with_dt(1.0)
        .with_explicit_vert_friction()
        .with_hor_friction(1.0)
        .with_ray_friction(0.1)
        .with_bottom_friction(0.05);
    let bc = CyclicExchange::new(false);
    compute_friction(&grid, &config, &bc, None, &mut state).unwrap();

    for k in 0..3 {
        assert!(state.du_mix[(4, 4, k)].abs() < TOL);
        assert!(state.du_mix[(3, 4, k)].abs() < TOL); // u-point west of land
        assert!(state.dv_mix[(4, 3, k)].abs() < TOL); // v-point south of land
    }
}

#[test]
fn test_harmonic_conserves_interior_momentum() {
    // On a uniform f-plane the Laplacian flux form is conservative:
    // summing the tendency over a region whose boundary fluxes vanish
    // gives zero. Use a compact bump well inside the interior.
    let grid = Grid::cartesian(8, 8, 1, 1.0, 1.0, 1.0);
    let mut state = State::new(&grid);
    state.u.tau[(5, 5, 0)] = 1.0;
    state.u.tau[(6, 5, 0)] = 2.0;
    state.u.tau[(5, 6, 0)] = -1.0;

    let config = FrictionConfig::new().with_hor_friction(1.0);
    let bc = CyclicExchange::new(false);
    compute_friction(&grid, &config, &bc, None, &mut state).unwrap();

    let total: f64 = state.du_mix.sum();
    assert!(total.abs() < TOL, "net interior tendency {total}");
}

#[test]
fn test_drag_hierarchy_only_touches_bottom() {
    // Rayleigh acts over the whole column; the bottom drags only at the
    // deepest wet level.
    let grid = Grid::cartesian(3, 3, 4, 1.0, 1.0, 1.0);
    let mut state = State::new(&grid);
    state.u.tau = Field3::constant(grid.nxp(), grid.nyp(), 4, 1.0);

    let config = FrictionConfig::new()
        .with_bottom_friction(0.1)
        .with_quadratic_bottom_friction(0.2);
    let bc = CyclicExchange::new(false);
    compute_friction(&grid, &config, &bc, None, &mut state).unwrap();

    let (i, j) = (3, 3);
    // Level 0 is the seafloor: linear 0.1 plus quadratic 0.2 * 1 * 1.
    assert!((state.du_mix[(i, j, 0)] + 0.3).abs() < TOL);
    for k in 1..4 {
        assert!(state.du_mix[(i, j, k)].abs() < TOL);
    }
}

#[test]
fn test_vertical_dissipation_balances_energy_loss() {
    // For explicit vertical friction the energy removed from the
    // velocity field equals the booked dissipation, both summed with
    // their cell thickness weights over an all-ocean box.
    let grid = Grid::cartesian(4, 4, 5, 1.0, 1.0, 1.0);
    let mut state = State::new(&grid);
    state.kappa_m = Field3::constant(grid.nxp(), grid.nyp(), 5, 0.3);
    for i in 0..grid.nxp() {
        for j in 0..grid.nyp() {
            for k in 0..5 {
                state.u.tau[(i, j, k)] = (k as f64 - 2.0).powi(2) * 0.1;
            }
        }
    }

    let config = FrictionConfig::new()
        .with_dt(1.0)
        .with_explicit_vert_friction()
        .with_conserve_energy();
    let bc = CyclicExchange::new(false);
    compute_friction(&grid, &config, &bc, None, &mut state).unwrap();

    // Interior tracer columns away from the reduction margin.
    let mut energy_loss = 0.0;
    let mut booked = 0.0;
    for i in 3..grid.nxp() - 3 {
        for j in 3..grid.nyp() - 3 {
            for k in 0..5 {
                energy_loss -= state.u.tau[(i, j, k)] * state.du_mix[(i, j, k)] * grid.dzt[k];
                booked += state.k_diss_v[(i, j, k)] * grid.dzw[k];
            }
        }
    }
    // The horizontally uniform profile makes the u-to-tracer average a
    // no-op, so the match is exact up to roundoff.
    assert!(
        (energy_loss - booked).abs() < 1e-10,
        "energy {energy_loss} vs booked {booked}"
    );
}

#[test]
fn test_cyclic_boundary_matches_interior_physics() {
    // With a zonally uniform flow and cyclic boundaries, harmonic
    // friction produces a zonally uniform tendency across the interior.
    let grid = Grid::cartesian(6, 4, 1, 1.0, 1.0, 1.0);
    let mut state = State::new(&grid);
    for i in 0..grid.nxp() {
        for j in 0..grid.nyp() {
            state.u.tau[(i, j, 0)] = (j as f64 - 3.0).powi(2);
        }
    }

    let config = FrictionConfig::new().with_hor_friction(1.0);
    let bc = CyclicExchange::new(true);
    compute_friction(&grid, &config, &bc, None, &mut state).unwrap();

    let reference = state.du_mix[(4, 3, 0)];
    for i in 2..grid.nxp() - 2 {
        assert!(
            (state.du_mix[(i, 3, 0)] - reference).abs() < TOL,
            "zonal asymmetry at i = {i}"
        );
    }
    assert!(reference.abs() > TOL);
}
