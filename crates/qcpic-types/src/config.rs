// ─────────────────────────────────────────────────────────────────────
// QCPIC — Configuration
// License: BSD-3-Clause
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{PicError, PicResult};

/// Particle-shape weighting kernel for source deposition.
///
/// Parsed once at construction; the deposition path dispatches on the
/// variant, never on the string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleShape {
    /// Two-cell linear weighting.
    Linear,
    /// Four-cell cubic B-spline weighting.
    Cubic,
    /// Linear weighting with unsynchronized parallel accumulation.
    ///
    /// Relaxed-consistency variant: correct only when the deposition
    /// pattern produces no colliding writes within a step.
    LinearNonAtomic,
}

impl ParticleShape {
    /// Number of cells touched along each axis.
    pub fn support(&self) -> usize {
        match self {
            ParticleShape::Linear | ParticleShape::LinearNonAtomic => 2,
            ParticleShape::Cubic => 4,
        }
    }
}

impl FromStr for ParticleShape {
    type Err = PicError;

    fn from_str(s: &str) -> PicResult<Self> {
        match s {
            "linear" => Ok(ParticleShape::Linear),
            "cubic" => Ok(ParticleShape::Cubic),
            "linear_non_atomic" => Ok(ParticleShape::LinearNonAtomic),
            other => Err(PicError::InvalidParameter(format!(
                "unknown particle shape '{other}' (expected linear, cubic or linear_non_atomic)"
            ))),
        }
    }
}

/// Longitudinal boundary treatment.
///
/// Only absorbing guard-cell boundaries are supported by this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundaries {
    #[default]
    Open,
}

impl FromStr for Boundaries {
    type Err = PicError;

    fn from_str(s: &str) -> PicResult<Self> {
        match s {
            "open" => Ok(Boundaries::Open),
            other => Err(PicError::InvalidParameter(format!(
                "unsupported boundaries '{other}' (this core only implements 'open')"
            ))),
        }
    }
}

fn default_n_guard() -> usize {
    64
}

/// Top-level simulation configuration.
///
/// Lengths in metres, dt in seconds. When `gamma_boost` is set, the
/// longitudinal box and the time step are interpreted as lab-frame values
/// and converted at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Longitudinal cell count.
    pub nz: usize,
    /// Longitudinal box edges (m).
    pub zmin: f64,
    pub zmax: f64,
    /// Radial cell count.
    pub nr: usize,
    /// Radial box edge (m); the axis is at r = 0.
    pub rmax: f64,
    /// Number of azimuthal modes.
    pub nm: usize,
    /// Time step (s).
    pub dt: f64,
    #[serde(default)]
    pub boundaries: Boundaries,
    /// Lorentz factor of the working frame; `None` means lab frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma_boost: Option<f64>,
    pub particle_shape: ParticleShape,
    /// Damped guard cells at each longitudinal end.
    #[serde(default = "default_n_guard")]
    pub n_guard: usize,
}

impl SimulationParams {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> PicResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&contents)?;
        params.validate()?;
        Ok(params)
    }

    /// Eager validation; every constructor goes through this.
    pub fn validate(&self) -> PicResult<()> {
        if self.nz == 0 || self.nr == 0 {
            return Err(PicError::InvalidParameter(
                "grid must have nz >= 1 and nr >= 1".to_string(),
            ));
        }
        if self.nm == 0 {
            return Err(PicError::InvalidParameter(
                "at least one azimuthal mode is required".to_string(),
            ));
        }
        if !self.zmin.is_finite() || !self.zmax.is_finite() || self.zmax <= self.zmin {
            return Err(PicError::InvalidParameter(format!(
                "longitudinal box [{}, {}] must be finite with zmax > zmin",
                self.zmin, self.zmax
            )));
        }
        if !self.rmax.is_finite() || self.rmax <= 0.0 {
            return Err(PicError::InvalidParameter(format!(
                "rmax = {} must be finite and > 0",
                self.rmax
            )));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(PicError::InvalidParameter(format!(
                "dt = {} must be finite and > 0",
                self.dt
            )));
        }
        if let Some(gamma) = self.gamma_boost {
            if !gamma.is_finite() || gamma < 1.0 {
                return Err(PicError::InvalidParameter(format!(
                    "gamma_boost = {gamma} must be finite and >= 1"
                )));
            }
        }
        if 2 * self.n_guard >= self.nz {
            return Err(PicError::InvalidParameter(format!(
                "2 * n_guard = {} leaves no physical cells out of nz = {}",
                2 * self.n_guard,
                self.nz
            )));
        }
        Ok(())
    }
}
