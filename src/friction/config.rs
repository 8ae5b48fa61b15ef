//! Configuration of the friction step.
//!
//! Each physical parameterization is toggled by a named flag; the
//! orchestrator reads each flag exactly once, so kernels never re-derive
//! flag combinations. Scalar coefficients live here too; spatially
//! varying ones are fields on the [`crate::state::State`].

/// Switches and scalar coefficients for one friction step.
#[derive(Clone, Copy, Debug)]
pub struct FrictionConfig {
    /// Explicit vertical friction.
    pub enable_explicit_vert_friction: bool,
    /// Implicit vertical friction (per-column tridiagonal solve).
    pub enable_implicit_vert_friction: bool,
    /// Eddy-driven (TEM) friction via the external collaborator.
    pub enable_tem_friction: bool,
    /// Horizontal harmonic friction.
    pub enable_hor_friction: bool,
    /// Scale the harmonic viscosity by a power of the latitude cosine.
    pub enable_hor_friction_cos_scaling: bool,
    /// No-slip treatment of lateral land-water interfaces.
    pub enable_noslip_lateral: bool,
    /// Horizontal biharmonic friction.
    pub enable_biharmonic_friction: bool,
    /// Interior Rayleigh damping.
    pub enable_ray_friction: bool,
    /// Linear bottom drag.
    pub enable_bottom_friction: bool,
    /// Use the spatially varying bottom drag fields instead of `r_bot`.
    pub enable_bottom_friction_var: bool,
    /// Quadratic bottom drag.
    pub enable_quadratic_bottom_friction: bool,
    /// External momentum source fields.
    pub enable_momentum_sources: bool,
    /// Energy-conservation diagnostics (dissipation bookkeeping).
    pub enable_conserve_energy: bool,

    /// Momentum time step.
    pub dt_mom: f64,
    /// Harmonic viscosity.
    pub a_h: f64,
    /// Biharmonic viscosity; `sqrt(|a_hbi|)` is applied per Laplacian pass.
    pub a_hbi: f64,
    /// Exponent for the cosine-of-latitude viscosity scaling.
    pub hor_friction_cos_power: f64,
    /// Rayleigh damping coefficient.
    pub r_ray: f64,
    /// Uniform linear bottom drag coefficient.
    pub r_bot: f64,
    /// Quadratic bottom drag coefficient.
    pub r_quad_bot: f64,
}

impl Default for FrictionConfig {
    fn default() -> Self {
        Self {
            enable_explicit_vert_friction: false,
            enable_implicit_vert_friction: false,
            enable_tem_friction: false,
            enable_hor_friction: false,
            enable_hor_friction_cos_scaling: false,
            enable_noslip_lateral: false,
            enable_biharmonic_friction: false,
            enable_ray_friction: false,
            enable_bottom_friction: false,
            enable_bottom_friction_var: false,
            enable_quadratic_bottom_friction: false,
            enable_momentum_sources: false,
            enable_conserve_energy: false,
            dt_mom: 0.0,
            a_h: 0.0,
            a_hbi: 0.0,
            hor_friction_cos_power: 1.0,
            r_ray: 0.0,
            r_bot: 0.0,
            r_quad_bot: 0.0,
        }
    }
}

impl FrictionConfig {
    /// A configuration with every parameterization disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the momentum time step.
    pub fn with_dt(mut self, dt_mom: f64) -> Self {
        self.dt_mom = dt_mom;
        self
    }

    /// Enable implicit vertical friction.
    pub fn with_implicit_vert_friction(mut self) -> Self {
        self.enable_implicit_vert_friction = true;
        self
    }

    /// Enable explicit vertical friction.
    pub fn with_explicit_vert_friction(mut self) -> Self {
        self.enable_explicit_vert_friction = true;
        self
    }

    /// Enable harmonic friction with the given viscosity.
    pub fn with_hor_friction(mut self, a_h: f64) -> Self {
        self.enable_hor_friction = true;
        self.a_h = a_h;
        self
    }

    /// Enable biharmonic friction with the given viscosity.
    pub fn with_biharmonic_friction(mut self, a_hbi: f64) -> Self {
        self.enable_biharmonic_friction = true;
        self.a_hbi = a_hbi;
        self
    }

    /// Enable Rayleigh damping with the given coefficient.
    pub fn with_ray_friction(mut self, r_ray: f64) -> Self {
        self.enable_ray_friction = true;
        self.r_ray = r_ray;
        self
    }

    /// Enable linear bottom drag with the given uniform coefficient.
    pub fn with_bottom_friction(mut self, r_bot: f64) -> Self {
        self.enable_bottom_friction = true;
        self.r_bot = r_bot;
        self
    }

    /// Enable quadratic bottom drag with the given coefficient.
    pub fn with_quadratic_bottom_friction(mut self, r_quad_bot: f64) -> Self {
        self.enable_quadratic_bottom_friction = true;
        self.r_quad_bot = r_quad_bot;
        self
    }

    /// Enable the energy-conservation diagnostics.
    pub fn with_conserve_energy(mut self) -> Self {
        self.enable_conserve_energy = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_off() {
        let c = FrictionConfig::default();
        assert!(!c.enable_hor_friction);
        assert!(!c.enable_conserve_energy);
        assert_eq!(c.a_h, 0.0);
    }

    #[test]
    fn test_builder_chain() {
        let c = FrictionConfig::new()
            .with_dt(900.0)
            .with_implicit_vert_friction()
            .with_hor_friction(5e4)
            .with_conserve_energy();
        assert!(c.enable_implicit_vert_friction);
        assert!(c.enable_hor_friction);
        assert!(c.enable_conserve_energy);
        assert_eq!(c.dt_mom, 900.0);
        assert_eq!(c.a_h, 5e4);
    }
}
