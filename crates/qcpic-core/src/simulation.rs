// ─────────────────────────────────────────────────────────────────────
// QCPIC — Simulation Context
// License: BSD-3-Clause
// ─────────────────────────────────────────────────────────────────────
//! Owned simulation value: per-mode grids, transforms, PSATD tables,
//! boundary damper and registered antennas. No global state; the
//! orchestration layer owns this and passes it by reference.

use rayon::prelude::*;

use qcpic_types::config::{ParticleShape, SimulationParams};
use qcpic_types::error::{PicError, PicResult};
use qcpic_types::state::{FieldComponent, FieldGrid};

use crate::antenna::LaserAntenna;
use crate::boost::BoostConverter;
use crate::boundary::GuardDamper;
use crate::psatd::{PsatdCoeffs, SpectralFields};
use crate::transform::ModeTransform;

pub struct Simulation {
    /// Lab-frame parameters as supplied by the caller.
    params: SimulationParams,
    boost: Option<BoostConverter>,
    /// Working-frame step.
    dt: f64,
    time: f64,
    grids: Vec<FieldGrid>,
    spectral: Vec<SpectralFields>,
    transforms: Vec<ModeTransform>,
    coeffs: Vec<PsatdCoeffs>,
    damper: GuardDamper,
    antennas: Vec<LaserAntenna>,
}

impl Simulation {
    /// Validate the configuration and allocate all per-mode state.
    ///
    /// With `gamma_boost` set, zmin, zmax and c·dt convert through the
    /// co-propagating length transform, which preserves the
    /// points-per-wavelength of the contracted pulse.
    pub fn new(params: &SimulationParams) -> PicResult<Self> {
        params.validate()?;
        let boost = match params.gamma_boost {
            Some(gamma) => Some(BoostConverter::new(gamma)?),
            None => None,
        };

        let (zmin, zmax, dt) = match &boost {
            Some(b) => {
                let z = b.copropag_length(&[params.zmin, params.zmax]);
                (z[0], z[1], b.boosted_dt(params.dt))
            }
            None => (params.zmin, params.zmax, params.dt),
        };

        let dz = (zmax - zmin) / params.nz as f64;
        let mut grids = Vec::with_capacity(params.nm);
        let mut spectral = Vec::with_capacity(params.nm);
        let mut transforms = Vec::with_capacity(params.nm);
        let mut coeffs = Vec::with_capacity(params.nm);
        for m in 0..params.nm {
            let grid = FieldGrid::new(
                m,
                params.nz,
                zmin,
                zmax,
                params.nr,
                params.rmax,
                params.n_guard,
            );
            let transform = ModeTransform::new(m, params.nz, dz, params.nr, params.rmax)?;
            let co = PsatdCoeffs::with_current_smoothing(
                transform.kz().as_slice().expect("kz grid is contiguous"),
                transform.kr().as_slice().expect("kr grid is contiguous"),
                dt,
                dz,
            );
            spectral.push(SpectralFields::new(params.nz, transform.n_spect()));
            grids.push(grid);
            transforms.push(transform);
            coeffs.push(co);
        }

        Ok(Simulation {
            params: params.clone(),
            boost,
            dt,
            time: 0.0,
            grids,
            spectral,
            transforms,
            coeffs,
            damper: GuardDamper::new(params.n_guard),
            antennas: Vec::new(),
        })
    }

    /// Advance the fields by `n_steps`.
    ///
    /// Each step: zero sources, antenna deposition at the mid-step time,
    /// per-mode spectral advance (independent modes, in parallel), guard
    /// damping. Calling this k times with n_1..n_k steps performs the same
    /// operation sequence as one call with Σn_i.
    pub fn advance(&mut self, n_steps: usize) {
        for _ in 0..n_steps {
            for grid in &mut self.grids {
                grid.zero_sources();
            }
            let t_half = self.time + 0.5 * self.dt;
            for antenna in &self.antennas {
                antenna.deposit(&mut self.grids, t_half);
            }

            self.grids
                .par_iter_mut()
                .zip(self.spectral.par_iter_mut())
                .zip(self.transforms.par_iter())
                .zip(self.coeffs.par_iter())
                .for_each(|(((grid, spect), transform), co)| {
                    step_mode(grid, spect, transform, co);
                });

            for grid in &mut self.grids {
                self.damper.apply(grid);
            }
            self.time += self.dt;
        }
    }

    pub fn register_antenna(&mut self, antenna: LaserAntenna) {
        self.antennas.push(antenna);
    }

    /// Scan all field arrays for non-finite values.
    ///
    /// Not called inside the step loop; invoke periodically from the
    /// driver. A hit is fatal — the state is not retryable.
    pub fn check_finite(&self) -> PicResult<()> {
        for grid in &self.grids {
            for component in FieldComponent::ALL {
                if let Some(bad) = grid
                    .field(component)
                    .iter()
                    .find(|c| !c.re.is_finite() || !c.im.is_finite())
                {
                    return Err(PicError::NumericalInstability {
                        mode: grid.m,
                        component: component.name().to_string(),
                        message: format!("encountered {bad} at t = {:.6e} s", self.time),
                    });
                }
            }
        }
        Ok(())
    }

    /// Per-mode field state, for diagnostics.
    pub fn mode(&self, m: usize) -> PicResult<&FieldGrid> {
        self.grids.get(m).ok_or_else(|| {
            PicError::InvalidParameter(format!(
                "mode {m} out of range (the grid holds {} modes)",
                self.grids.len()
            ))
        })
    }

    pub fn n_modes(&self) -> usize {
        self.grids.len()
    }

    pub fn n_guard(&self) -> usize {
        self.params.n_guard
    }

    /// Working-frame time step.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Working-frame elapsed time.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn particle_shape(&self) -> ParticleShape {
        self.params.particle_shape
    }

    pub fn gamma_boost(&self) -> Option<f64> {
        self.params.gamma_boost
    }

    pub fn boost(&self) -> Option<&BoostConverter> {
        self.boost.as_ref()
    }

    /// Lab-frame box edges, as configured.
    pub fn lab_zmin(&self) -> f64 {
        self.params.zmin
    }

    pub fn lab_zmax(&self) -> f64 {
        self.params.zmax
    }
}

/// One PSATD step of a single azimuthal mode: transform E, B, J to
/// spectral space, advance, transform E, B back. The round trip through
/// real space is what lets the guard damping act on the propagating state.
fn step_mode(
    grid: &mut FieldGrid,
    spect: &mut SpectralFields,
    transform: &ModeTransform,
    co: &PsatdCoeffs,
) {
    let (jp, jm) = transform.forward_pm(&grid.jr, &grid.jt);
    spect.jp = jp;
    spect.jm = jm;
    spect.jz = transform.forward_z(&grid.jz);

    let (ep, em) = transform.forward_pm(&grid.er, &grid.et);
    spect.ep = ep;
    spect.em = em;
    spect.ez = transform.forward_z(&grid.ez);

    let (bp, bm) = transform.forward_pm(&grid.br, &grid.bt);
    spect.bp = bp;
    spect.bm = bm;
    spect.bz = transform.forward_z(&grid.bz);

    spect.push(co);

    let (er, et) = transform.inverse_pm(&spect.ep, &spect.em);
    grid.er = er;
    grid.et = et;
    grid.ez = transform.inverse_z(&spect.ez);

    let (br, bt) = transform.inverse_pm(&spect.bp, &spect.bm);
    grid.br = br;
    grid.bt = bt;
    grid.bz = transform.inverse_z(&spect.bz);
}
