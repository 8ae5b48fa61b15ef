//! Boundary exchange at the domain edges.
//!
//! Halo exchange across a distributed decomposition is owned by the
//! driver; the friction core only needs the local part of the contract:
//! filling the 2-cell zonal halo, cyclically when the domain wraps in x.
//! The seam is a trait so a distributed driver can substitute its own
//! exchange.

use crate::fields::{Field3, HALO};

/// Fills a field's horizontal halo before stencils read across a domain
/// edge.
pub trait BoundaryExchange {
    /// Update the halo cells of `field` in place.
    fn enforce(&self, field: &mut Field3);
}

/// Single-process exchange: cyclic wrap-around on the zonal axis when
/// configured, otherwise a no-op (open boundaries keep whatever the halo
/// holds).
#[derive(Clone, Copy, Debug, Default)]
pub struct CyclicExchange {
    /// Whether the domain is periodic in x.
    pub cyclic_x: bool,
}

impl CyclicExchange {
    /// Create an exchange with the given zonal periodicity.
    pub fn new(cyclic_x: bool) -> Self {
        Self { cyclic_x }
    }
}

impl BoundaryExchange for CyclicExchange {
    fn enforce(&self, field: &mut Field3) {
        if !self.cyclic_x {
            return;
        }
        let nxp = field.nx;
        debug_assert!(nxp >= 2 * HALO + 2);
        // West halo mirrors the two easternmost interior columns,
        // east halo mirrors the two westernmost ones.
        for h in 0..HALO {
            for j in 0..field.ny {
                for k in 0..field.nz {
                    field[(h, j, k)] = field[(nxp - 2 * HALO + h, j, k)];
                    field[(nxp - HALO + h, j, k)] = field[(HALO + h, j, k)];
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyclic_wraps_zonal_halo() {
        // nx = 4 interior columns at i = 2..6, nxp = 8.
        let mut f = Field3::zeros(8, 1, 1);
        for i in 0..8 {
            f[(i, 0, 0)] = i as f64;
        }
        CyclicExchange::new(true).enforce(&mut f);
        assert_eq!(f[(0, 0, 0)], 4.0);
        assert_eq!(f[(1, 0, 0)], 5.0);
        assert_eq!(f[(6, 0, 0)], 2.0);
        assert_eq!(f[(7, 0, 0)], 3.0);
        // Interior untouched.
        assert_eq!(f[(2, 0, 0)], 2.0);
        assert_eq!(f[(5, 0, 0)], 5.0);
    }

    #[test]
    fn test_non_cyclic_is_noop() {
        let mut f = Field3::zeros(8, 2, 2);
        for (n, v) in f.data.iter_mut().enumerate() {
            *v = n as f64;
        }
        let before = f.clone();
        CyclicExchange::new(false).enforce(&mut f);
        assert_eq!(f.data, before.data);
    }
}
