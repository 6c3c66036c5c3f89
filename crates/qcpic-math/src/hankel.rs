// ─────────────────────────────────────────────────────────────────────
// QCPIC — Matrix Discrete Hankel Transform
// License: BSD-3-Clause
// ─────────────────────────────────────────────────────────────────────
//! Quasi-discrete Hankel transform on the Bessel-zero spectral grid.
//!
//! For azimuthal mode m the radial spectral grid is kr_l = α_{m,l}/rmax,
//! with α_{m,l} the l-th positive zero of J_m. A component expanded on
//! J_p (p ∈ {m-1, m, m+1} depending on the azimuthal packing) is
//! represented on the uniform cell-centered grid r_i = (i + 1/2)·rmax/Nr
//! through the evaluation matrix A[i][l] = J_p(kr_l·r_i); the forward
//! (grid → spectral) transform is the numerical inverse of A. Sharing the
//! mode-m zeros across the three orders keeps one kr value per spectral
//! slot, so the solver's per-(kz, kr) coefficients are common to every
//! component of a mode.
//!
//! Order m−1 needs one amendment: on the J_m-zero grid that family sits
//! exactly on the borderline Dini condition, so it is complete only with
//! the extra member r^{m−1} (the kr = 0 slot). Without it the evaluation
//! matrix is near-singular and the transform represents smooth profiles
//! as huge cancelling coefficients, which amplify per-slot propagation
//! differences into O(1) field errors. With it, every matrix used here
//! has a condition number in the hundreds at most.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use qcpic_types::error::PicResult;

use crate::bessel::{bessel_jn, bessel_zeros};
use crate::linalg::invert;

/// Planned DHT of order `p` on the mode-`m` spectral grid.
pub struct HankelPlan {
    p: i32,
    m: usize,
    nr: usize,
    /// True for the order-(m−1) plan of a mode m ≥ 1: slot 0 carries the
    /// r^{m−1} member at kr = 0, followed by the first Nr−1 zeros.
    dini: bool,
    kr: Array1<f64>,
    /// A^T: spectral → grid, applied as `spect.dot(&to_grid)`.
    to_grid: Array2<Complex64>,
    /// (A^{-1})^T: grid → spectral, applied as `grid.dot(&to_spect)`.
    to_spect: Array2<Complex64>,
}

impl HankelPlan {
    pub fn new(p: i32, m: usize, nr: usize, rmax: f64) -> PicResult<Self> {
        let dini = m >= 1 && p == m as i32 - 1;
        let alphas = bessel_zeros(m, nr);
        let kr = Array1::from_shape_fn(nr, |l| {
            if dini {
                if l == 0 {
                    0.0
                } else {
                    alphas[l - 1] / rmax
                }
            } else {
                alphas[l] / rmax
            }
        });
        let dr = rmax / nr as f64;

        // Evaluation matrix A[i][l] = J_p(kr_l * r_i), with the Dini
        // column (r_i/rmax)^{m-1} in slot 0 where applicable.
        let mut a = Array2::zeros((nr, nr));
        for i in 0..nr {
            let r_i = (i as f64 + 0.5) * dr;
            for l in 0..nr {
                a[[i, l]] = if dini && l == 0 {
                    (r_i / rmax).powi(m as i32 - 1)
                } else {
                    bessel_jn(p, kr[l] * r_i)
                };
            }
        }
        let a_inv = invert(&a)?;

        let to_grid = Array2::from_shape_fn((nr, nr), |(l, i)| Complex64::new(a[[i, l]], 0.0));
        let to_spect = Array2::from_shape_fn((nr, nr), |(i, l)| Complex64::new(a_inv[[l, i]], 0.0));

        Ok(HankelPlan {
            p,
            m,
            nr,
            dini,
            kr,
            to_grid,
            to_spect,
        })
    }

    pub fn order(&self) -> i32 {
        self.p
    }

    pub fn mode(&self) -> usize {
        self.m
    }

    pub fn nr(&self) -> usize {
        self.nr
    }

    pub fn is_dini(&self) -> bool {
        self.dini
    }

    /// Radial spectral grid kr_l (rad/m) of this plan's slots.
    pub fn kr(&self) -> &Array1<f64> {
        &self.kr
    }

    /// Grid → spectral along axis 1.
    pub fn forward(&self, grid: &Array2<Complex64>) -> Array2<Complex64> {
        grid.dot(&self.to_spect)
    }

    /// Spectral → grid along axis 1.
    pub fn inverse(&self, spect: &Array2<Complex64>) -> Array2<Complex64> {
        spect.dot(&self.to_grid)
    }
}
