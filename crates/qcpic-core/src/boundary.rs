// ─────────────────────────────────────────────────────────────────────
// QCPIC — Open-Boundary Guard Damping
// License: BSD-3-Clause
// ─────────────────────────────────────────────────────────────────────
//! Absorbing treatment of the longitudinal box ends.
//!
//! The spectral solver is periodic in z; open boundaries are emulated by
//! multiplying the fields in the n_guard outermost cells at each end by a
//! sin² ramp every step. The ramp reaches ~1 at the guard/physical
//! interface, so the interior sees no impedance jump, while anything
//! entering the guard region is extinguished over a few crossings before
//! it can wrap around.

use ndarray::Array1;
use qcpic_types::state::FieldGrid;

pub struct GuardDamper {
    n_guard: usize,
    /// damp[j] for the j-th cell counted from the boundary inward.
    damp: Array1<f64>,
}

impl GuardDamper {
    pub fn new(n_guard: usize) -> Self {
        let damp = Array1::from_shape_fn(n_guard, |j| {
            let s = (std::f64::consts::FRAC_PI_2 * j as f64 / n_guard as f64).sin();
            s * s
        });
        GuardDamper { n_guard, damp }
    }

    pub fn n_guard(&self) -> usize {
        self.n_guard
    }

    /// Attenuate all six field components in both guard regions.
    pub fn apply(&self, grid: &mut FieldGrid) {
        let nz = grid.nz;
        for field in [
            &mut grid.er,
            &mut grid.et,
            &mut grid.ez,
            &mut grid.br,
            &mut grid.bt,
            &mut grid.bz,
        ] {
            for j in 0..self.n_guard {
                let factor = self.damp[j];
                for ir in 0..grid.nr {
                    field[[j, ir]] *= factor;
                    field[[nz - 1 - j, ir]] *= factor;
                }
            }
        }
    }
}
