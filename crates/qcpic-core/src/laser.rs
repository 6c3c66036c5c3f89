// ─────────────────────────────────────────────────────────────────────
// QCPIC — Laser Pulse Descriptor
// License: BSD-3-Clause
// ─────────────────────────────────────────────────────────────────────
//! Gaussian laser pulse parameters and the analytic field profile.

use serde::{Deserialize, Serialize};

use qcpic_types::constants::{C_LIGHT, M_ELECTRON, Q_ELECTRON};
use qcpic_types::error::{PicError, PicResult};

use crate::antenna::LaserAntenna;
use crate::simulation::Simulation;

fn default_lambda0() -> f64 {
    0.8e-6
}

/// Injection mechanism. Only antenna emission belongs to this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectionMethod {
    #[default]
    Antenna,
}

/// Physical description of a Gaussian laser pulse, in lab-frame units.
///
/// Immutable once registered; the antenna re-evaluates the analytic
/// profile from this descriptor at every step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaserParams {
    /// Peak normalized vector potential.
    pub a0: f64,
    /// Waist (m).
    pub w0: f64,
    /// Pulse duration as a length c·τ (m).
    pub ctau: f64,
    /// Pulse-center position at t = 0 (m).
    pub z0: f64,
    /// Focal plane (m). Retained for interface parity; the envelope is
    /// evaluated at-waist because the Rayleigh length exceeds the simulated
    /// propagation by orders of magnitude.
    #[serde(default)]
    pub zf: f64,
    /// Central wavelength (m).
    #[serde(default = "default_lambda0")]
    pub lambda0: f64,
    /// Antenna plane position (m).
    pub z0_antenna: f64,
    /// Polarization angle w.r.t. x (rad).
    #[serde(default)]
    pub theta_pol: f64,
    #[serde(default)]
    pub method: InjectionMethod,
    /// Must match the simulation's working frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma_boost: Option<f64>,
}

impl LaserParams {
    pub fn validate(&self) -> PicResult<()> {
        if !self.a0.is_finite() || self.a0 <= 0.0 {
            return Err(PicError::InvalidParameter(format!(
                "a0 = {} must be finite and > 0",
                self.a0
            )));
        }
        for (name, value) in [("w0", self.w0), ("ctau", self.ctau), ("lambda0", self.lambda0)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PicError::InvalidParameter(format!(
                    "{name} = {value} must be finite and > 0"
                )));
            }
        }
        if !self.z0.is_finite() || !self.zf.is_finite() || !self.z0_antenna.is_finite() {
            return Err(PicError::InvalidParameter(
                "z0, zf and z0_antenna must be finite".to_string(),
            ));
        }
        if let Some(gamma) = self.gamma_boost {
            if !gamma.is_finite() || gamma < 1.0 {
                return Err(PicError::InvalidParameter(format!(
                    "gamma_boost = {gamma} must be finite and >= 1"
                )));
            }
        }
        Ok(())
    }
}

/// Peak field E0 = a0·(m_e c²)·k0/q_e for a wavelength λ0.
pub fn peak_field(a0: f64, lambda0: f64) -> f64 {
    let k0 = 2.0 * std::f64::consts::PI / lambda0;
    a0 * M_ELECTRON * C_LIGHT * C_LIGHT * k0 / Q_ELECTRON
}

/// Analytic traveling Gaussian-laser field.
///
/// E(z, r) = E0·exp(−r²/w0² − (z − z0_prop)²/ctau²)·cos(k0·(z − z0_phase)),
/// with z0_prop the current pulse-center position and z0_phase the carrier
/// phase origin. All arguments in working-frame units.
#[allow(clippy::too_many_arguments)]
pub fn gaussian_laser_field(
    z: f64,
    r: f64,
    a0: f64,
    z0_phase: f64,
    z0_prop: f64,
    ctau: f64,
    lambda0: f64,
    w0: f64,
) -> f64 {
    let k0 = 2.0 * std::f64::consts::PI / lambda0;
    let envelope =
        (-r * r / (w0 * w0) - (z - z0_prop) * (z - z0_prop) / (ctau * ctau)).exp();
    peak_field(a0, lambda0) * envelope * (k0 * (z - z0_phase)).cos()
}

/// Register a laser pulse against the simulation, emitted by an antenna.
///
/// Validates the descriptor eagerly and checks frame/grid compatibility
/// before any state is touched.
pub fn add_laser(sim: &mut Simulation, params: &LaserParams) -> PicResult<()> {
    params.validate()?;

    let sim_gamma = sim.gamma_boost();
    if params.gamma_boost != sim_gamma {
        return Err(PicError::ConfigMismatch(format!(
            "laser gamma_boost {:?} does not match simulation frame {:?}",
            params.gamma_boost, sim_gamma
        )));
    }
    if sim.n_modes() < 2 {
        return Err(PicError::ConfigMismatch(format!(
            "a linearly polarized antenna drives azimuthal mode 1; the grid holds {} mode(s)",
            sim.n_modes()
        )));
    }
    if params.z0_antenna < sim.lab_zmin() || params.z0_antenna > sim.lab_zmax() {
        return Err(PicError::ConfigMismatch(format!(
            "z0_antenna = {} lies outside the box [{}, {}]",
            params.z0_antenna,
            sim.lab_zmin(),
            sim.lab_zmax()
        )));
    }

    let antenna = LaserAntenna::new(params, sim.boost(), sim.particle_shape())?;
    sim.register_antenna(antenna);
    Ok(())
}
