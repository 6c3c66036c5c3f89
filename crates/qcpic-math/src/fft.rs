// ─────────────────────────────────────────────────────────────────────
// QCPIC — Longitudinal FFT
// License: BSD-3-Clause
// ─────────────────────────────────────────────────────────────────────
//! FFT along the z axis (axis 0) of (Nz, Nr) arrays, wrapping rustfft.
//!
//! Convention matches numpy:
//! - forward FFT: unnormalized
//! - inverse FFT: normalized by 1/Nz

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::f64::consts::PI;
use std::sync::Arc;

/// Planned forward/inverse FFT pair for a fixed longitudinal length.
pub struct ZFft {
    nz: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

impl ZFft {
    pub fn new(nz: usize) -> Self {
        let mut planner = FftPlanner::new();
        ZFft {
            nz,
            forward: planner.plan_fft_forward(nz),
            inverse: planner.plan_fft_inverse(nz),
        }
    }

    pub fn nz(&self) -> usize {
        self.nz
    }

    /// In-place forward FFT along axis 0 of `a`, one column at a time.
    pub fn forward(&self, a: &mut Array2<Complex64>) {
        debug_assert_eq!(a.nrows(), self.nz);
        let mut buf = vec![Complex64::new(0.0, 0.0); self.nz];
        for ir in 0..a.ncols() {
            for iz in 0..self.nz {
                buf[iz] = a[[iz, ir]];
            }
            self.forward.process(&mut buf);
            for iz in 0..self.nz {
                a[[iz, ir]] = buf[iz];
            }
        }
    }

    /// In-place inverse FFT along axis 0, with 1/Nz normalization.
    pub fn inverse(&self, a: &mut Array2<Complex64>) {
        debug_assert_eq!(a.nrows(), self.nz);
        let norm = 1.0 / self.nz as f64;
        let mut buf = vec![Complex64::new(0.0, 0.0); self.nz];
        for ir in 0..a.ncols() {
            for iz in 0..self.nz {
                buf[iz] = a[[iz, ir]];
            }
            self.inverse.process(&mut buf);
            for iz in 0..self.nz {
                a[[iz, ir]] = buf[iz] * norm;
            }
        }
    }
}

/// Angular wavenumbers kz = 2π·fftfreq(nz, dz), in FFT ordering.
pub fn kz_grid(nz: usize, dz: f64) -> Array1<f64> {
    let dk = 2.0 * PI / (nz as f64 * dz);
    Array1::from_shape_fn(nz, |i| {
        if i <= (nz - 1) / 2 {
            i as f64 * dk
        } else {
            (i as f64 - nz as f64) * dk
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_inverse_roundtrip() {
        let nz = 64;
        let plan = ZFft::new(nz);
        let original =
            Array2::from_shape_fn((nz, 3), |(i, j)| Complex64::new((i * 3 + j) as f64, -(i as f64)));
        let mut a = original.clone();
        plan.forward(&mut a);
        plan.inverse(&mut a);
        for (x, y) in a.iter().zip(original.iter()) {
            assert!((x - y).norm() < 1e-10);
        }
    }

    #[test]
    fn single_harmonic_lands_in_one_bin() {
        let nz = 32;
        let plan = ZFft::new(nz);
        // exp(+i·2π·3·j/nz) must land in bin 3 under the e^{+ikz} expansion.
        let mut a = Array2::from_shape_fn((nz, 1), |(j, _)| {
            Complex64::from_polar(1.0, 2.0 * PI * 3.0 * j as f64 / nz as f64)
        });
        plan.forward(&mut a);
        for iz in 0..nz {
            let expect = if iz == 3 { nz as f64 } else { 0.0 };
            assert!(
                (a[[iz, 0]] - Complex64::new(expect, 0.0)).norm() < 1e-9,
                "bin {iz}: {}",
                a[[iz, 0]]
            );
        }
    }

    #[test]
    fn kz_grid_matches_fftfreq() {
        let kz = kz_grid(8, 0.5);
        let dk = 2.0 * PI / 4.0;
        let expect = [0.0, 1.0, 2.0, 3.0, -4.0, -3.0, -2.0, -1.0];
        for (i, &e) in expect.iter().enumerate() {
            assert!((kz[i] - e * dk).abs() < 1e-12);
        }
    }
}
