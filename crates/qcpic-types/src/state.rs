// ─────────────────────────────────────────────────────────────────────
// QCPIC — Per-Mode Field State
// License: BSD-3-Clause
// ─────────────────────────────────────────────────────────────────────
//! Field and source storage for one azimuthal mode on the (z, r) mesh.
//!
//! The total physical field is reconstructed from the mode arrays as
//! F(θ) = F_0 + 2·Re[Σ_{m≥1} F_m·exp(−imθ)], so a mode-m array stores half
//! the on-axis physical amplitude for m ≥ 1 and mode 0 is real up to
//! numerical noise. For an x-polarized pulse the informative part of mode 1
//! is the real part for {Er, Bt} and the imaginary part for {Et, Br}; the
//! complementary part must stay at round-off level.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use std::str::FromStr;

use crate::error::{PicError, PicResult};

/// Electromagnetic field component names, as exposed to diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldComponent {
    Er,
    Et,
    Ez,
    Br,
    Bt,
    Bz,
}

impl FieldComponent {
    pub const ALL: [FieldComponent; 6] = [
        FieldComponent::Er,
        FieldComponent::Et,
        FieldComponent::Ez,
        FieldComponent::Br,
        FieldComponent::Bt,
        FieldComponent::Bz,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FieldComponent::Er => "Er",
            FieldComponent::Et => "Et",
            FieldComponent::Ez => "Ez",
            FieldComponent::Br => "Br",
            FieldComponent::Bt => "Bt",
            FieldComponent::Bz => "Bz",
        }
    }
}

impl FromStr for FieldComponent {
    type Err = PicError;

    fn from_str(s: &str) -> PicResult<Self> {
        match s {
            "Er" => Ok(FieldComponent::Er),
            "Et" => Ok(FieldComponent::Et),
            "Ez" => Ok(FieldComponent::Ez),
            "Br" => Ok(FieldComponent::Br),
            "Bt" => Ok(FieldComponent::Bt),
            "Bz" => Ok(FieldComponent::Bz),
            other => Err(PicError::InvalidParameter(format!(
                "unknown field component '{other}'"
            ))),
        }
    }
}

/// Source (current/charge) component names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceComponent {
    Jr,
    Jt,
    Jz,
    Rho,
}

/// Fields and sources of a single azimuthal mode.
///
/// Cell-centered mesh: z_i = zmin + (i + 1/2)·dz, r_j = (j + 1/2)·dr.
/// All arrays have shape (nz, nr) and are allocated once.
#[derive(Debug, Clone)]
pub struct FieldGrid {
    pub m: usize,
    pub nz: usize,
    pub nr: usize,
    pub dz: f64,
    pub dr: f64,
    pub zmin: f64,
    pub zmax: f64,
    pub rmax: f64,
    /// Damped guard cells at each longitudinal end.
    pub n_guard: usize,
    pub z: Array1<f64>,
    pub r: Array1<f64>,
    pub er: Array2<Complex64>,
    pub et: Array2<Complex64>,
    pub ez: Array2<Complex64>,
    pub br: Array2<Complex64>,
    pub bt: Array2<Complex64>,
    pub bz: Array2<Complex64>,
    pub jr: Array2<Complex64>,
    pub jt: Array2<Complex64>,
    pub jz: Array2<Complex64>,
    pub rho: Array2<Complex64>,
}

impl FieldGrid {
    pub fn new(
        m: usize,
        nz: usize,
        zmin: f64,
        zmax: f64,
        nr: usize,
        rmax: f64,
        n_guard: usize,
    ) -> Self {
        let dz = (zmax - zmin) / nz as f64;
        let dr = rmax / nr as f64;
        let z = Array1::from_shape_fn(nz, |i| zmin + (i as f64 + 0.5) * dz);
        let r = Array1::from_shape_fn(nr, |j| (j as f64 + 0.5) * dr);
        let zeros = || Array2::<Complex64>::zeros((nz, nr));
        FieldGrid {
            m,
            nz,
            nr,
            dz,
            dr,
            zmin,
            zmax,
            rmax,
            n_guard,
            z,
            r,
            er: zeros(),
            et: zeros(),
            ez: zeros(),
            br: zeros(),
            bt: zeros(),
            bz: zeros(),
            jr: zeros(),
            jt: zeros(),
            jz: zeros(),
            rho: zeros(),
        }
    }

    /// Field array by component, for external inspection.
    pub fn field(&self, c: FieldComponent) -> &Array2<Complex64> {
        match c {
            FieldComponent::Er => &self.er,
            FieldComponent::Et => &self.et,
            FieldComponent::Ez => &self.ez,
            FieldComponent::Br => &self.br,
            FieldComponent::Bt => &self.bt,
            FieldComponent::Bz => &self.bz,
        }
    }

    pub fn source(&self, c: SourceComponent) -> &Array2<Complex64> {
        match c {
            SourceComponent::Jr => &self.jr,
            SourceComponent::Jt => &self.jt,
            SourceComponent::Jz => &self.jz,
            SourceComponent::Rho => &self.rho,
        }
    }

    /// Reset all source arrays; called at the start of every step.
    pub fn zero_sources(&mut self) {
        let zero = Complex64::new(0.0, 0.0);
        self.jr.fill(zero);
        self.jt.fill(zero);
        self.jz.fill(zero);
        self.rho.fill(zero);
    }
}
