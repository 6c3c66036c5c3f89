// ─────────────────────────────────────────────────────────────────────
// QCPIC — Laser Antenna
// License: BSD-3-Clause
// ─────────────────────────────────────────────────────────────────────
//! Macroparticle-free laser injection through a virtual current sheet.
//!
//! A sheet current K(r,t) on the antenna plane radiates symmetrically; a
//! plane moving with longitudinal velocity β_a·c emits forward with
//! amplitude −μ0·c·K/(2·(1−β_a)). Setting
//!     K(r,t) = −2·ε0·c·(1−β_a)·E_des(r,t)
//! with E_des the prescribed pulse field evaluated at the plane therefore
//! reproduces the desired forward-traveling wave exactly; the mirror pulse
//! emitted backward leaves through the open boundary. In the boosted frame
//! the plane drifts at −β·c and the same expressions hold with the
//! contracted pulse parameters.
//!
//! A linearly polarized pulse maps onto azimuthal mode 1:
//! jr += (K/2)·e^{iθ_pol}, jt += −i·(K/2)·e^{iθ_pol}. One virtual ring per
//! radial cell carries the sheet; the shape kernel spreads each ring over
//! the neighboring z cells (the plane sits between cell centers) and over
//! radial cells (trivially for the linear kernel, since rings sit on cell
//! centers). Radial kernel wings crossing the axis fold onto their mirror
//! cell with the parity of the transverse components, (−1)^(m+1).

use ndarray::Axis;
use num_complex::Complex64;
use rayon::prelude::*;

use qcpic_types::config::ParticleShape;
use qcpic_types::constants::{C_LIGHT, EPSILON_0};
use qcpic_types::error::PicResult;
use qcpic_types::state::FieldGrid;

use crate::boost::BoostConverter;
use crate::laser::{peak_field, LaserParams};

/// Azimuthal mode driven by a linearly polarized pulse.
const DRIVEN_MODE: usize = 1;

#[derive(Debug, Clone)]
pub struct LaserAntenna {
    /// Working-frame peak field (V/m).
    e0: f64,
    /// Working-frame carrier wavenumber (rad/m).
    k0: f64,
    w0: f64,
    /// Working-frame pulse length (m).
    ctau: f64,
    /// Working-frame pulse-center position at t = 0 (m).
    z0: f64,
    /// Plane position at t = 0 in the working frame (m).
    z_plane0: f64,
    /// Plane velocity / c (0 in the lab frame, −β in the boosted frame).
    beta_drift: f64,
    /// Polarization phase e^{iθ_pol}.
    pol: Complex64,
    shape: ParticleShape,
}

impl LaserAntenna {
    /// Build the antenna in the simulation's working frame.
    pub fn new(
        params: &LaserParams,
        boost: Option<&BoostConverter>,
        shape: ParticleShape,
    ) -> PicResult<Self> {
        let (ctau, lambda0, z0, z_plane0, beta_drift) = match boost {
            Some(b) => {
                let v = b.copropag_length(&[params.ctau, params.lambda0, params.z0]);
                let plane = b.static_length(&[params.z0_antenna])[0];
                (v[0], v[1], v[2], plane, -b.beta())
            }
            None => (
                params.ctau,
                params.lambda0,
                params.z0,
                params.z0_antenna,
                0.0,
            ),
        };
        Ok(LaserAntenna {
            e0: peak_field(params.a0, lambda0),
            k0: 2.0 * std::f64::consts::PI / lambda0,
            w0: params.w0,
            ctau,
            z0,
            z_plane0,
            beta_drift,
            pol: Complex64::from_polar(1.0, params.theta_pol),
            shape,
        })
    }

    /// Current plane position in the working frame.
    pub fn plane_position(&self, t: f64) -> f64 {
        self.z_plane0 + self.beta_drift * C_LIGHT * t
    }

    /// Prescribed transverse field at the plane, on-axis amplitude.
    fn field_at_plane(&self, t: f64) -> f64 {
        let psi = self.plane_position(t) - self.z0 - C_LIGHT * t;
        self.e0 * (-psi * psi / (self.ctau * self.ctau)).exp() * (self.k0 * psi).cos()
    }

    /// Deposit this step's current onto the driven mode, at time `t`
    /// (mid-step; the solver consumes the deposit in the same step).
    pub fn deposit(&self, grids: &mut [FieldGrid], t: f64) {
        debug_assert!(grids.len() > DRIVEN_MODE);
        let grid = &mut grids[DRIVEN_MODE];

        let za = self.plane_position(t);
        let x = (za - grid.zmin) / grid.dz - 0.5;
        let i0 = x.floor() as isize;
        let f = x - i0 as f64;

        // Longitudinal kernel weights around the plane; stop emitting once
        // the support would leave the box.
        let mut z_cells = [(0usize, 0.0f64); 4];
        let n_z = match self.shape {
            ParticleShape::Linear | ParticleShape::LinearNonAtomic => {
                if i0 < 0 || i0 + 1 >= grid.nz as isize {
                    return;
                }
                z_cells[0] = (i0 as usize, 1.0 - f);
                z_cells[1] = (i0 as usize + 1, f);
                2
            }
            ParticleShape::Cubic => {
                if i0 - 1 < 0 || i0 + 2 >= grid.nz as isize {
                    return;
                }
                let f2 = f * f;
                let f3 = f2 * f;
                z_cells[0] = ((i0 - 1) as usize, (1.0 - f).powi(3) / 6.0);
                z_cells[1] = (i0 as usize, (3.0 * f3 - 6.0 * f2 + 4.0) / 6.0);
                z_cells[2] = (i0 as usize + 1, (-3.0 * f3 + 3.0 * f2 + 3.0 * f + 1.0) / 6.0);
                z_cells[3] = (i0 as usize + 2, f3 / 6.0);
                4
            }
        };
        let z_cells = &z_cells[..n_z];

        // Sheet current K(r) = −2ε0c(1−β_a)·E_des(r); mode-1 coefficient
        // K/2, converted to a volume density by 1/dz.
        let ampl = -2.0 * EPSILON_0 * C_LIGHT * (1.0 - self.beta_drift) * self.field_at_plane(t);
        let coef = self.pol * Complex64::new(0.5 * ampl / grid.dz, 0.0);
        let minus_i = Complex64::new(0.0, -1.0);
        let inv_w2 = 1.0 / (self.w0 * self.w0);

        match self.shape {
            ParticleShape::Linear => {
                for j in 0..grid.nr {
                    let r = grid.r[j];
                    let cj = coef * (-r * r * inv_w2).exp();
                    for &(iz, wz) in z_cells {
                        grid.jr[[iz, j]] += cj * wz;
                        grid.jt[[iz, j]] += minus_i * cj * wz;
                    }
                }
            }
            ParticleShape::Cubic => {
                // Transverse components are even across the axis for mode 1.
                let fold = if (grid.m + 1) % 2 == 0 { 1.0 } else { -1.0 };
                for j in 0..grid.nr {
                    let r = grid.r[j];
                    let cj = coef * (-r * r * inv_w2).exp();
                    let wings = [
                        (j as isize - 1, 1.0 / 6.0),
                        (j as isize, 4.0 / 6.0),
                        (j as isize + 1, 1.0 / 6.0),
                    ];
                    for (jr_cell, wr) in wings {
                        let (target, sign) = if jr_cell < 0 {
                            ((-jr_cell - 1) as usize, fold)
                        } else {
                            (jr_cell as usize, 1.0)
                        };
                        if target >= grid.nr {
                            continue;
                        }
                        let c = cj * (wr * sign);
                        for &(iz, wz) in z_cells {
                            grid.jr[[iz, target]] += c * wz;
                            grid.jt[[iz, target]] += minus_i * c * wz;
                        }
                    }
                }
            }
            ParticleShape::LinearNonAtomic => {
                // Relaxed-consistency path: rings deposit concurrently with
                // no synchronization. Sound only because the linear kernel
                // at ring centers confines ring j's writes to radial column
                // j — concurrent units never collide on a cell.
                let r = grid.r.clone();
                let mut columns: Vec<_> = grid
                    .jr
                    .axis_iter_mut(Axis(1))
                    .zip(grid.jt.axis_iter_mut(Axis(1)))
                    .collect();
                columns
                    .par_iter_mut()
                    .enumerate()
                    .for_each(|(j, (col_r, col_t))| {
                        let cj = coef * (-r[j] * r[j] * inv_w2).exp();
                        for &(iz, wz) in z_cells {
                            col_r[iz] += cj * wz;
                            col_t[iz] += minus_i * cj * wz;
                        }
                    });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::laser::InjectionMethod;

    fn grids(nz: usize, nr: usize) -> Vec<FieldGrid> {
        (0..2)
            .map(|m| FieldGrid::new(m, nz, -10.0e-6, 10.0e-6, nr, 400.0e-6, 4))
            .collect()
    }

    fn laser(shape_gamma: Option<f64>) -> LaserParams {
        LaserParams {
            a0: 1.0,
            w0: 128.0e-6,
            ctau: 5.0e-6,
            z0: -5.0e-6,
            zf: 0.0,
            lambda0: 0.8e-6,
            z0_antenna: 0.0,
            theta_pol: 0.0,
            method: InjectionMethod::Antenna,
            gamma_boost: shape_gamma,
        }
    }

    fn antenna(shape: ParticleShape) -> LaserAntenna {
        LaserAntenna::new(&laser(None), None, shape).unwrap()
    }

    /// At t = 0 the carrier sits exactly on a zero crossing at the plane;
    /// advance a quarter period so the deposit is finite.
    const T_QUARTER: f64 = 0.2e-6 / C_LIGHT;

    #[test]
    fn linear_deposit_spans_two_z_cells_with_unit_weight() {
        let mut g = grids(64, 8);
        let ant = antenna(ParticleShape::Linear);
        ant.deposit(&mut g, T_QUARTER);

        // Mode 0 must stay untouched.
        assert!(g[0].jr.iter().all(|c| c.norm() == 0.0));

        // The plane z = 0 sits between two cell centers; summing the
        // deposited density over z recovers the full sheet current.
        let grid = &g[1];
        let occupied: Vec<usize> = (0..grid.nz)
            .filter(|&iz| grid.jr[[iz, 0]].norm() > 0.0)
            .collect();
        assert_eq!(occupied.len(), 2);
        assert_eq!(occupied[1], occupied[0] + 1);

        let summed: Complex64 = occupied.iter().map(|&iz| grid.jr[[iz, 0]]).sum();
        let expect = -2.0 * EPSILON_0 * C_LIGHT * ant.field_at_plane(T_QUARTER)
            * (-grid.r[0] * grid.r[0] / (128.0e-6_f64 * 128.0e-6)).exp()
            * 0.5
            / grid.dz;
        assert!((summed.re - expect).abs() < 1e-9 * expect.abs());
        assert!(summed.im.abs() < 1e-12 * expect.abs());
    }

    #[test]
    fn transverse_currents_keep_mode_packing() {
        // jr real, jt = −i·jr for θ_pol = 0: the packing invariant at the
        // source level.
        let mut g = grids(32, 6);
        antenna(ParticleShape::Cubic).deposit(&mut g, 1.0e-15);
        let grid = &g[1];
        for (r, t) in grid.jr.iter().zip(grid.jt.iter()) {
            assert!((t - Complex64::new(0.0, -1.0) * r).norm() < 1e-12 * r.norm().max(1e-300));
            assert!(r.im.abs() < 1e-12 * r.re.abs().max(1e-300));
        }
    }

    #[test]
    fn cubic_deposit_spans_four_z_cells_and_folds_on_axis() {
        let mut g = grids(64, 8);
        antenna(ParticleShape::Cubic).deposit(&mut g, T_QUARTER);
        let grid = &g[1];
        let occupied: Vec<usize> = (0..grid.nz)
            .filter(|&iz| grid.jr[[iz, 0]].norm() > 0.0)
            .collect();
        assert_eq!(occupied.len(), 4);

        // Column 0 receives its own ring's 4/6 + 1/6 folded across the axis
        // plus ring 1's lower wing; the near-axis current must not be
        // suppressed relative to the smooth profile (even continuation).
        let iz = occupied[1];
        let profile0 = (-grid.r[0] * grid.r[0] / (128.0e-6_f64 * 128.0e-6)).exp();
        let own_weight = grid.jr[[iz, 0]].re
            / (grid.jr[[iz, 3]].re / (-grid.r[3] * grid.r[3] / (128.0e-6_f64 * 128.0e-6)).exp());
        assert!(
            (own_weight / profile0 - 1.0).abs() < 0.01,
            "near-axis weight ratio {own_weight}"
        );
    }

    #[test]
    fn non_atomic_matches_linear_exactly() {
        let mut ga = grids(64, 8);
        let mut gb = grids(64, 8);
        antenna(ParticleShape::Linear).deposit(&mut ga, 2.0e-15);
        antenna(ParticleShape::LinearNonAtomic).deposit(&mut gb, 2.0e-15);
        for (a, b) in ga[1].jr.iter().zip(gb[1].jr.iter()) {
            assert_eq!(a, b);
        }
        for (a, b) in ga[1].jt.iter().zip(gb[1].jt.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn plane_outside_the_box_is_silent() {
        let mut g = grids(64, 8);
        let mut params = laser(None);
        params.z0_antenna = 10.5e-6;
        let ant = LaserAntenna::new(&params, None, ParticleShape::Linear).unwrap();
        ant.deposit(&mut g, 0.0);
        assert!(g[1].jr.iter().all(|c| c.norm() == 0.0));
    }

    #[test]
    fn boosted_antenna_drifts_backward() {
        let boost = BoostConverter::new(10.0).unwrap();
        let ant = LaserAntenna::new(&laser(Some(10.0)), Some(&boost), ParticleShape::Linear)
            .unwrap();
        let t = 1.0e-14;
        assert!(ant.plane_position(t) < ant.plane_position(0.0));
        let expect = -boost.beta() * C_LIGHT * t;
        assert!((ant.plane_position(t) - expect).abs() < 1e-20);
    }
}
