// ─────────────────────────────────────────────────────────────────────
// QCPIC — Laser Antenna Emission Tests
// License: BSD-3-Clause
// ─────────────────────────────────────────────────────────────────────
//! Emission of a Gaussian pulse by the laser antenna, checked against the
//! analytic traveling-wave profile in the lab frame and in a γ = 10
//! boosted frame, for every particle shape.
//!
//! The checks per transverse field component {Er, Et, Br, Bt} of mode 1:
//! - the half of the complex array that carries no information stays at
//!   numerical-noise level (≤ 1e-6 of the informative peak);
//! - the peak normalized amplitude extracted by a nonlinear fit of the
//!   on-axis profile matches the requested a0 within 5%;
//! - the full 2-D (z, r) profile matches the analytic form within 3% of
//!   the peak.
//!
//! Emission amplitude is sensitive to the longitudinal resolution; below
//! ~30 cells per laser wavelength the emitted a0 drops several percent,
//! which is why the box is fixed at 32 cells per wavelength here.

use ndarray::s;
use qcpic_core::laser::{add_laser, gaussian_laser_field, LaserParams};
use qcpic_core::{BoostConverter, Simulation};
use qcpic_math::fit::fit_amplitude_origin;
use qcpic_types::config::{Boundaries, ParticleShape, SimulationParams};
use qcpic_types::constants::C_LIGHT;
use qcpic_types::state::FieldComponent;

// Simulation box
const NZ: usize = 800;
const ZMIN: f64 = -10.0e-6;
const ZMAX: f64 = 10.0e-6;
const NR: usize = 25;
const RMAX: f64 = 400.0e-6;
const NM: usize = 2;

// Laser pulse
const W0: f64 = 128.0e-6;
const CTAU: f64 = 5.0e-6;
const A0: f64 = 1.0;
const LAMBDA0: f64 = 0.8e-6;
const Z0_ANTENNA: f64 = 0.0;
const ZF: f64 = 0.0;
const Z0: f64 = -5.0e-6;

// Propagation
const LPROP: f64 = 10.5e-6;
const N_SHOW: usize = 3;

const GAMMA_BOOST: f64 = 10.0;

fn lab_dt() -> f64 {
    (ZMAX - ZMIN) / NZ as f64 / C_LIGHT
}

fn simulation_params(gamma: Option<f64>, shape: ParticleShape) -> SimulationParams {
    SimulationParams {
        nz: NZ,
        zmin: ZMIN,
        zmax: ZMAX,
        nr: NR,
        rmax: RMAX,
        nm: NM,
        dt: lab_dt(),
        boundaries: Boundaries::Open,
        gamma_boost: gamma,
        particle_shape: shape,
        n_guard: 64,
    }
}

fn laser_params(gamma: Option<f64>) -> LaserParams {
    LaserParams {
        a0: A0,
        w0: W0,
        ctau: CTAU,
        z0: Z0,
        zf: ZF,
        lambda0: LAMBDA0,
        z0_antenna: Z0_ANTENNA,
        theta_pol: 0.0,
        method: Default::default(),
        gamma_boost: gamma,
    }
}

/// Run the emission loop for LPROP of laser travel and return the finished
/// simulation.
fn run_emission(gamma: Option<f64>, shape: ParticleShape) -> Simulation {
    let mut sim = Simulation::new(&simulation_params(gamma, shape)).unwrap();
    add_laser(&mut sim, &laser_params(gamma)).unwrap();

    let n_total = (LPROP / (C_LIGHT * lab_dt())).round() as usize;
    let n_step = (n_total as f64 / N_SHOW as f64).round() as usize;
    // Interleaved calls, as a driver with periodic diagnostics would issue.
    for _ in 0..N_SHOW {
        sim.advance(n_step);
    }
    sim.advance(n_total - N_SHOW * n_step);
    sim.check_finite().unwrap();
    sim
}

fn run_and_check_laser_antenna(gamma: Option<f64>, shape: ParticleShape) {
    let sim = run_emission(gamma, shape);
    let grid = sim.mode(1).unwrap();

    // Sample the forward-emitted half of the box, guards excluded.
    let lo = NZ / 2 + 2;
    let hi = NZ - sim.n_guard();
    let z: Vec<f64> = grid.z.slice(s![lo..hi]).to_vec();
    let r: Vec<f64> = grid.r.to_vec();

    // The factor scales each component to an electric-field-like quantity;
    // mode-1 arrays store half the physical on-axis amplitude.
    for (component, info_in_real_part, factor) in [
        (FieldComponent::Er, true, 2.0),
        (FieldComponent::Et, false, 2.0),
        (FieldComponent::Br, false, 2.0 * C_LIGHT),
        (FieldComponent::Bt, true, 2.0 * C_LIGHT),
    ] {
        let window = grid.field(component).slice(s![lo..hi, ..]);
        let scaled = window.mapv(|c| c * factor);
        check_field(&scaled, &z, &r, info_in_real_part, gamma);
    }
}

/// Check one scaled mode-1 component against the analytic profile.
fn check_field(
    field: &ndarray::Array2<num_complex::Complex64>,
    z: &[f64],
    r: &[f64],
    info_in_real_part: bool,
    gamma: Option<f64>,
) {
    let info = field.mapv(|c| if info_in_real_part { c.re } else { c.im });
    let zero_part = field.mapv(|c| if info_in_real_part { c.im } else { c.re });

    let info_max = info.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    // The complementary half of the packing carries no signal.
    let zero_max = zero_part
        .iter()
        .map(|v| v.abs())
        .fold(0.0_f64, f64::max);
    assert!(
        zero_max <= 1.0e-6 * info_max,
        "non-informative part at {zero_max:.3e} vs peak {info_max:.3e}"
    );

    // Predicted pulse parameters in the working frame.
    let boost = BoostConverter::new(gamma.unwrap_or(1.0)).unwrap();
    let converted = boost.copropag_length(&[CTAU, LAMBDA0, LPROP, Z0]);
    let (ctau_b, lambda0_b, lprop_b, z0_b) =
        (converted[0], converted[1], converted[2], converted[3]);
    let z0_prop = z0_b + lprop_b;

    // Extract a0 from the on-axis profile.
    let on_axis: Vec<f64> = (0..z.len()).map(|iz| info[[iz, 0]]).collect();
    let model =
        |zv: f64, z0_phase: f64| gaussian_laser_field(zv, r[0], 1.0, z0_phase, z0_prop, ctau_b, lambda0_b, W0);
    let fit = fit_amplitude_origin(z, &on_axis, model, z0_prop, 0.5 * lambda0_b, 401);

    assert!(
        (fit.amplitude.abs() - A0).abs() / A0 < 0.05,
        "fitted a0 = {} vs requested {A0}",
        fit.amplitude
    );

    // Full 2-D profile against the analytic form at the fitted parameters.
    let tol = 3.0e-2 * info_max;
    for (iz, &zv) in z.iter().enumerate() {
        for (ir, &rv) in r.iter().enumerate() {
            let predicted = gaussian_laser_field(
                zv,
                rv,
                fit.amplitude,
                fit.origin,
                z0_prop,
                ctau_b,
                lambda0_b,
                W0,
            );
            let diff = (predicted - info[[iz, ir]]).abs();
            assert!(
                diff <= tol,
                "profile deviates by {diff:.3e} (tol {tol:.3e}) at z = {zv:.3e}, r = {rv:.3e}"
            );
        }
    }
}

#[test]
fn antenna_labframe_linear() {
    run_and_check_laser_antenna(None, ParticleShape::Linear);
    run_and_check_laser_antenna(None, ParticleShape::LinearNonAtomic);
}

#[test]
fn antenna_labframe_cubic() {
    run_and_check_laser_antenna(None, ParticleShape::Cubic);
}

#[test]
fn antenna_boostedframe_linear() {
    run_and_check_laser_antenna(Some(GAMMA_BOOST), ParticleShape::Linear);
    run_and_check_laser_antenna(Some(GAMMA_BOOST), ParticleShape::LinearNonAtomic);
}

#[test]
fn antenna_boostedframe_cubic() {
    run_and_check_laser_antenna(Some(GAMMA_BOOST), ParticleShape::Cubic);
}

/// The relaxed-consistency deposition must reproduce the synchronized
/// linear result; with ring-to-column ownership there are no colliding
/// writes, so the two runs agree to round-off.
#[test]
fn non_atomic_deposition_matches_linear() {
    let mut a = Simulation::new(&simulation_params(None, ParticleShape::Linear)).unwrap();
    let mut b =
        Simulation::new(&simulation_params(None, ParticleShape::LinearNonAtomic)).unwrap();
    add_laser(&mut a, &laser_params(None)).unwrap();
    add_laser(&mut b, &laser_params(None)).unwrap();
    a.advance(60);
    b.advance(60);

    let ga = a.mode(1).unwrap();
    let gb = b.mode(1).unwrap();
    let peak = ga.er.iter().map(|c| c.norm()).fold(0.0_f64, f64::max);
    for (x, y) in ga.er.iter().zip(gb.er.iter()) {
        assert!((x - y).norm() <= 1e-12 * peak);
    }
    for (x, y) in ga.bt.iter().zip(gb.bt.iter()) {
        assert!((x - y).norm() <= 1e-12 * peak);
    }
}
