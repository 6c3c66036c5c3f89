// ─────────────────────────────────────────────────────────────────────
// QCPIC — Spectral Transformer
// License: BSD-3-Clause
// ─────────────────────────────────────────────────────────────────────
//! Real-space (z, r) ↔ spectral (kz, kr) transforms for one azimuthal mode.
//!
//! Longitudinally a plain FFT; radially the matrix DHT of `qcpic_math`.
//! Azimuthal vector pairs are packed as F± = (Fr ± i·Ft)/2 before the
//! radial transform: F+ lives on the order-(m−1) basis, F− on order (m+1),
//! scalars/z on order m. The packing is what lets one complex solve carry
//! two real signals; it is undone by Fr = F+ + F−, Ft = −i·(F+ − F−).
//!
//! Slot layout: the solver sees Nr+1 spectral slots per kz. Slots
//! 0..Nr−1 carry the shared mode-m zeros k_1..k_Nr, on which the three
//! orders close exactly under curl; slot Nr is the kr = 0 cell, where
//! only the ± components of the order-(m−1) Dini member live (a constant
//! × r^{m−1} profile propagating one-dimensionally). The + basis has no
//! member at k_Nr, so its slot Nr−1 is empty on input and its content is
//! truncated on output — a loss confined to the highest radial mode.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use qcpic_math::fft::{kz_grid, ZFft};
use qcpic_math::hankel::HankelPlan;
use qcpic_types::error::PicResult;

pub struct ModeTransform {
    m: usize,
    nr: usize,
    fft: ZFft,
    /// Order m−1, for the + component (Dini grid: kr = 0, k_1..k_{Nr−1}).
    dht_plus: HankelPlan,
    /// Order m+1, for the − component.
    dht_minus: HankelPlan,
    /// Order m, for z components and scalars.
    dht_z: HankelPlan,
    kz: Array1<f64>,
    /// Solver-facing radial grid over the Nr+1 slots: [k_1..k_Nr, 0].
    kr_push: Array1<f64>,
}

impl ModeTransform {
    pub fn new(m: usize, nz: usize, dz: f64, nr: usize, rmax: f64) -> PicResult<Self> {
        let p = m as i32;
        let dht_z = HankelPlan::new(p, m, nr, rmax)?;
        let mut kr_push = Array1::zeros(nr + 1);
        for l in 0..nr {
            kr_push[l] = dht_z.kr()[l];
        }
        Ok(ModeTransform {
            m,
            nr,
            fft: ZFft::new(nz),
            dht_plus: HankelPlan::new(p - 1, m, nr, rmax)?,
            dht_minus: HankelPlan::new(p + 1, m, nr, rmax)?,
            dht_z,
            kz: kz_grid(nz, dz),
            kr_push,
        })
    }

    pub fn mode(&self) -> usize {
        self.m
    }

    /// Number of spectral slots per kz seen by the solver.
    pub fn n_spect(&self) -> usize {
        self.nr + 1
    }

    /// Longitudinal wavenumbers, FFT ordering.
    pub fn kz(&self) -> &Array1<f64> {
        &self.kz
    }

    /// Radial wavenumbers over the solver slots.
    pub fn kr(&self) -> &Array1<f64> {
        &self.kr_push
    }

    /// Scalar / z-component transform, grid → solver slots.
    pub fn forward_z(&self, grid: &Array2<Complex64>) -> Array2<Complex64> {
        let mut a = grid.clone();
        self.fft.forward(&mut a);
        pad_slot(&self.dht_z.forward(&a))
    }

    /// Scalar / z-component transform, solver slots → grid.
    pub fn inverse_z(&self, spect: &Array2<Complex64>) -> Array2<Complex64> {
        let mut a = self.dht_z.inverse(&drop_slot(spect));
        self.fft.inverse(&mut a);
        a
    }

    /// Azimuthal vector pair (Fr, Ft) → spectral (F+, F−) on solver slots.
    pub fn forward_pm(
        &self,
        fr: &Array2<Complex64>,
        ft: &Array2<Complex64>,
    ) -> (Array2<Complex64>, Array2<Complex64>) {
        let i = Complex64::new(0.0, 1.0);
        let mut plus = Array2::from_shape_fn(fr.dim(), |idx| 0.5 * (fr[idx] + i * ft[idx]));
        let mut minus = Array2::from_shape_fn(fr.dim(), |idx| 0.5 * (fr[idx] - i * ft[idx]));
        self.fft.forward(&mut plus);
        self.fft.forward(&mut minus);
        (
            align_plus(&self.dht_plus.forward(&plus)),
            pad_slot(&self.dht_minus.forward(&minus)),
        )
    }

    /// Spectral (F+, F−) on solver slots → azimuthal vector pair (Fr, Ft).
    pub fn inverse_pm(
        &self,
        fp: &Array2<Complex64>,
        fm: &Array2<Complex64>,
    ) -> (Array2<Complex64>, Array2<Complex64>) {
        let mut plus = self.dht_plus.inverse(&unalign_plus(fp));
        let mut minus = self.dht_minus.inverse(&drop_slot(fm));
        self.fft.inverse(&mut plus);
        self.fft.inverse(&mut minus);
        let i = Complex64::new(0.0, 1.0);
        let fr = Array2::from_shape_fn(plus.dim(), |idx| plus[idx] + minus[idx]);
        let ft = Array2::from_shape_fn(plus.dim(), |idx| -i * (plus[idx] - minus[idx]));
        (fr, ft)
    }
}

/// (nz, nr) → (nz, nr+1) with an empty kr = 0 slot.
fn pad_slot(a: &Array2<Complex64>) -> Array2<Complex64> {
    let (nz, nr) = a.dim();
    Array2::from_shape_fn((nz, nr + 1), |(iz, l)| {
        if l < nr {
            a[[iz, l]]
        } else {
            Complex64::new(0.0, 0.0)
        }
    })
}

/// (nz, nr+1) → (nz, nr), discarding the kr = 0 slot (exactly zero for
/// the −/z components throughout the advance).
fn drop_slot(a: &Array2<Complex64>) -> Array2<Complex64> {
    let (nz, ns) = a.dim();
    Array2::from_shape_fn((nz, ns - 1), |(iz, l)| a[[iz, l]])
}

/// Dini-plan layout [kr=0, k_1..k_{nr−1}] → solver slots [k_1.., 0-slot].
fn align_plus(raw: &Array2<Complex64>) -> Array2<Complex64> {
    let (nz, nr) = raw.dim();
    Array2::from_shape_fn((nz, nr + 1), |(iz, l)| {
        if l + 2 <= nr {
            raw[[iz, l + 1]]
        } else if l == nr {
            raw[[iz, 0]]
        } else {
            // No + basis member at k_Nr.
            Complex64::new(0.0, 0.0)
        }
    })
}

/// Solver slots → Dini-plan layout; content at k_Nr is truncated.
fn unalign_plus(spect: &Array2<Complex64>) -> Array2<Complex64> {
    let (nz, ns) = spect.dim();
    let nr = ns - 1;
    Array2::from_shape_fn((nz, nr), |(iz, l)| {
        if l == 0 {
            spect[[iz, nr]]
        } else {
            spect[[iz, l - 1]]
        }
    })
}
