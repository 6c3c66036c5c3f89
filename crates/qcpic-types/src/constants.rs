// ─────────────────────────────────────────────────────────────────────
// QCPIC — Physical Constants
// License: BSD-3-Clause
// ─────────────────────────────────────────────────────────────────────
//! SI values, CODATA 2018.

/// Speed of light in vacuum (m/s), exact.
pub const C_LIGHT: f64 = 299_792_458.0;

/// Elementary charge (C), exact.
pub const Q_ELECTRON: f64 = 1.602_176_634e-19;

/// Electron mass (kg).
pub const M_ELECTRON: f64 = 9.109_383_701_5e-31;

/// Vacuum permittivity (F/m).
pub const EPSILON_0: f64 = 8.854_187_812_8e-12;

/// Vacuum permeability (H/m).
pub const MU_0: f64 = 1.256_637_062_12e-6;
