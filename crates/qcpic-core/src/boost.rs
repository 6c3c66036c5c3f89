// ─────────────────────────────────────────────────────────────────────
// QCPIC — Boosted-Frame Conversion
// License: BSD-3-Clause
// ─────────────────────────────────────────────────────────────────────
//! Lab ↔ boosted-frame parameter conversion.
//!
//! Running a relativistic propagation problem in a frame moving at γ along
//! +z shrinks the number of required time steps; the converter maps the
//! user-facing lab-frame parameters into that frame. A pure value object:
//! every method is referentially transparent and safe to call from any
//! thread.

use qcpic_types::constants::C_LIGHT;
use qcpic_types::error::{PicError, PicResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostConverter {
    gamma: f64,
    beta: f64,
}

impl BoostConverter {
    /// γ = 1 is the exact identity transform.
    pub fn new(gamma: f64) -> PicResult<Self> {
        if !gamma.is_finite() || gamma < 1.0 {
            return Err(PicError::InvalidParameter(format!(
                "Lorentz factor {gamma} must be finite and >= 1"
            )));
        }
        let beta = (1.0 - 1.0 / (gamma * gamma)).sqrt();
        Ok(BoostConverter { gamma, beta })
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Lengths co-propagating with an object moving at β_object·c along z:
    /// L ↦ L / (γ·(1 + β·β_object)).
    ///
    /// The same transform applies to every entry, signed offsets included —
    /// a trailing offset keeps its sign and contracts like a duration.
    /// `beta_object = -1` inverts the forward-wave transform exactly.
    pub fn copropag_length_with(&self, lab: &[f64], beta_object: f64) -> Vec<f64> {
        let factor = 1.0 / (self.gamma * (1.0 + self.beta * beta_object));
        lab.iter().map(|l| l * factor).collect()
    }

    /// Co-propagating lengths for a forward-moving wave (β_object = 1):
    /// ctau, wavelength, propagation distance, initial position.
    pub fn copropag_length(&self, lab: &[f64]) -> Vec<f64> {
        self.copropag_length_with(lab, 1.0)
    }

    /// Proper lengths of lab-static objects: L ↦ L/γ (e.g. the antenna
    /// plane position at t = 0).
    pub fn static_length(&self, lab: &[f64]) -> Vec<f64> {
        lab.iter().map(|l| l / self.gamma).collect()
    }

    /// Relativistic velocity addition: v ↦ (v − βc) / (1 − vβ/c).
    pub fn velocity(&self, lab: &[f64]) -> Vec<f64> {
        lab.iter()
            .map(|v| (v - self.beta * C_LIGHT) / (1.0 - v * self.beta / C_LIGHT))
            .collect()
    }

    /// Interaction duration of a forward-moving process: T ↦ T/(γ(1+β)).
    pub fn interaction_time(&self, lab_duration: f64) -> f64 {
        lab_duration / (self.gamma * (1.0 + self.beta))
    }

    /// Time step, converted through c·dt as a co-propagating length so the
    /// points-per-wavelength of a contracted pulse match the lab frame.
    pub fn boosted_dt(&self, lab_dt: f64) -> f64 {
        self.copropag_length(&[C_LIGHT * lab_dt])[0] / C_LIGHT
    }
}
