//! Boltzmann quasiparticle gas with a temperature-dependent mass.
//!
//! `m(T) = sqrt(m0^2 + kappa^2 T^2)`. The ideal-gas pressure and energy at
//! that mass are corrected by a mean field B(T),
//!
//! ```text
//! p = p_id(T, m) - B(T),   e = e_id(T, m) + B(T),
//! dB/dT = (dp_id/dm) dm/dT = -(g / 2 pi^2) m^2 T K1(m/T) dm/dT,
//! ```
//!
//! which keeps s = dp/dT = (e + p)/T. B is integrated once at construction on
//! a logarithmic temperature grid, with B(t_min) = 0.

use std::f64::consts::PI;

use bf_core::units::{GEV_TO_INVERSE_FM, gev, inverse_fm};
use tracing::warn;

use crate::bessel::{bessel_k, shear_moment};
use crate::error::{EosError, EosResult};
use crate::model::{EquationOfState, validation};

/// Parameters of the quasiparticle gas, natural units (fm^-1).
#[derive(Clone, Debug, PartialEq)]
pub struct QuasiparticleParams {
    /// Degeneracy g of the Boltzmann gas
    pub degeneracy: f64,
    /// Vacuum mass m0 [fm^-1]
    pub mass: f64,
    /// Thermal mass slope kappa: m -> kappa T at high temperature
    pub thermal_mass_ratio: f64,
    /// Lowest tabulated temperature [fm^-1]
    pub t_min: f64,
    /// Highest tabulated temperature [fm^-1]
    pub t_max: f64,
    /// Number of grid points for the mean-field table
    pub table_points: usize,
}

impl Default for QuasiparticleParams {
    fn default() -> Self {
        Self {
            degeneracy: 40.0,
            mass: inverse_fm(gev(0.2)),
            thermal_mass_ratio: 0.8,
            t_min: 0.02 * GEV_TO_INVERSE_FM,
            t_max: 4.0 * GEV_TO_INVERSE_FM,
            table_points: 400,
        }
    }
}

/// Mean field tabulated on a logarithmic temperature grid.
#[derive(Clone, Debug)]
struct BagTable {
    t_min: f64,
    t_max: f64,
    log_step: f64,
    values: Vec<f64>,
}

impl BagTable {
    fn build(params: &QuasiparticleParams, dbdt: impl Fn(f64) -> f64) -> Self {
        let n = params.table_points;
        let log_step = (params.t_max / params.t_min).ln() / (n - 1) as f64;
        let mut values = Vec::with_capacity(n);
        values.push(0.0);
        let mut t_prev = params.t_min;
        for i in 1..n {
            let t = params.t_min * (i as f64 * log_step).exp();
            let mid = 0.5 * (t_prev + t);
            // Simpson on each interval
            let inc = (t - t_prev) / 6.0 * (dbdt(t_prev) + 4.0 * dbdt(mid) + dbdt(t));
            values.push(values[i - 1] + inc);
            t_prev = t;
        }
        Self {
            t_min: params.t_min,
            t_max: params.t_max,
            log_step,
            values,
        }
    }

    fn node(&self, i: usize) -> f64 {
        self.t_min * (i as f64 * self.log_step).exp()
    }

    fn contains(&self, t: f64) -> bool {
        t >= self.t_min * (1.0 - 1e-12) && t <= self.t_max * (1.0 + 1e-12)
    }

    fn eval(&self, t: f64) -> EosResult<f64> {
        if !self.contains(t) {
            return Err(EosError::OutOfRange {
                what: "temperature outside the mean-field table",
                value: t,
            });
        }
        let last = self.values.len() - 2;
        let i = (((t / self.t_min).ln() / self.log_step).floor().max(0.0) as usize).min(last);
        let (t0, t1) = (self.node(i), self.node(i + 1));
        let w = (t - t0) / (t1 - t0);
        Ok(self.values[i] + w * (self.values[i + 1] - self.values[i]))
    }
}

/// Bessel functions at one temperature, shared by the thermodynamic functions.
struct Moments {
    m: f64,
    z: f64,
    k1: f64,
    k2: f64,
    k3: f64,
}

/// Boltzmann quasiparticle equation of state.
#[derive(Clone, Debug)]
pub struct QuasiparticleGas {
    params: QuasiparticleParams,
    /// g / (2 pi^2)
    prefactor: f64,
    bag: BagTable,
    /// e(t_min), e(t_max)
    energy_range: (f64, f64),
}

impl QuasiparticleGas {
    /// Validate parameters and tabulate the mean field.
    pub fn new(params: QuasiparticleParams) -> EosResult<Self> {
        if !params.degeneracy.is_finite() || params.degeneracy <= 0.0 {
            return Err(EosError::InvalidArg {
                what: "degeneracy must be positive",
            });
        }
        if !params.mass.is_finite() || params.mass < 0.0 {
            return Err(EosError::InvalidArg {
                what: "mass must be non-negative",
            });
        }
        if !params.thermal_mass_ratio.is_finite() || params.thermal_mass_ratio < 0.0 {
            return Err(EosError::InvalidArg {
                what: "thermal mass ratio must be non-negative",
            });
        }
        if params.mass == 0.0 && params.thermal_mass_ratio == 0.0 {
            return Err(EosError::InvalidArg {
                what: "massless gas has no conformal breaking",
            });
        }
        if !(params.t_min > 0.0 && params.t_max > params.t_min && params.t_max.is_finite()) {
            return Err(EosError::InvalidArg {
                what: "temperature table needs 0 < t_min < t_max",
            });
        }
        if params.table_points < 2 {
            return Err(EosError::InvalidArg {
                what: "temperature table needs at least two points",
            });
        }

        let prefactor = params.degeneracy / (2.0 * PI * PI);
        let mass = params.mass;
        let kappa = params.thermal_mass_ratio;
        let dbdt = |t: f64| {
            let m = (mass * mass + kappa * kappa * t * t).sqrt();
            -prefactor * m * t * bessel_k(1, m / t) * kappa * kappa * t
        };
        let bag = BagTable::build(&params, dbdt);

        let mut gas = Self {
            params,
            prefactor,
            bag,
            energy_range: (0.0, 0.0),
        };
        gas.energy_range = (
            gas.energy_density(gas.params.t_min)?,
            gas.energy_density(gas.params.t_max)?,
        );
        Ok(gas)
    }

    pub fn params(&self) -> &QuasiparticleParams {
        &self.params
    }

    /// Energy densities at the ends of the tabulated temperature range.
    pub fn energy_range(&self) -> (f64, f64) {
        self.energy_range
    }

    /// Quasiparticle mass m(T) [fm^-1].
    pub fn mass(&self, t: f64) -> f64 {
        let m0 = self.params.mass;
        let kappa = self.params.thermal_mass_ratio;
        (m0 * m0 + kappa * kappa * t * t).sqrt()
    }

    fn check_range(&self, t: f64) -> EosResult<()> {
        validation::validate_temperature(t)?;
        if !self.bag.contains(t) {
            return Err(EosError::OutOfRange {
                what: "temperature outside the tabulated range",
                value: t,
            });
        }
        Ok(())
    }

    fn moments(&self, t: f64) -> EosResult<Moments> {
        self.check_range(t)?;
        let m = self.mass(t);
        let z = m / t;
        let k1 = bessel_k(1, z);
        let k2 = bessel_k(2, z);
        Ok(Moments {
            m,
            z,
            k1,
            k2,
            k3: k1 + 4.0 / z * k2,
        })
    }

    /// Entropy density and its temperature derivative, s = (g/2pi^2) m^3 K3(m/T).
    fn entropy_and_slope(&self, t: f64) -> EosResult<(f64, f64)> {
        let Moments { m, z, k2, k3, .. } = self.moments(t)?;
        let dm_dt = self.params.thermal_mass_ratio.powi(2) * t / m;
        let dz_dt = (dm_dt - z) / t;
        let s = self.prefactor * m.powi(3) * k3;
        // K3'(z) = -K2 - 3 K3 / z
        let ds_dt =
            self.prefactor * (3.0 * m * m * dm_dt * k3 + m.powi(3) * (-k2 - 3.0 * k3 / z) * dz_dt);
        Ok((s, ds_dt))
    }

    fn initial_guess(&self, e: f64) -> f64 {
        // massless Boltzmann gas: e = 3 g T^4 / pi^2
        (e * PI * PI / (3.0 * self.params.degeneracy)).powf(0.25)
    }
}

impl EquationOfState for QuasiparticleGas {
    fn name(&self) -> &str {
        "quasiparticle"
    }

    fn energy_density(&self, t: f64) -> EosResult<f64> {
        let Moments { z, k1, k2, .. } = self.moments(t)?;
        let e_id = self.prefactor * t.powi(4) * (3.0 * z * z * k2 + z.powi(3) * k1);
        let e = e_id + self.bag.eval(t)?;
        validation::validate_positive(e, "energy density must be positive and finite")
    }

    fn pressure(&self, t: f64) -> EosResult<f64> {
        let Moments { z, k2, .. } = self.moments(t)?;
        let p_id = self.prefactor * t.powi(4) * z * z * k2;
        let p = p_id - self.bag.eval(t)?;
        validation::validate_positive(p, "pressure must be positive and finite")
    }

    fn entropy_density(&self, t: f64) -> EosResult<f64> {
        let (s, _) = self.entropy_and_slope(t)?;
        validation::validate_positive(s, "entropy density must be positive and finite")
    }

    fn speed_of_sound_squared(&self, t: f64) -> EosResult<f64> {
        let (s, ds_dt) = self.entropy_and_slope(t)?;
        let cs2 = s / (t * ds_dt);
        validation::validate_cs2(cs2)?;
        Ok(cs2)
    }

    fn temperature(&self, e: f64) -> EosResult<f64> {
        const MAX_ITER: usize = 100;
        const REL_TOL: f64 = 1e-12;

        validation::validate_energy_density(e)?;
        let mut lo = self.params.t_min;
        let mut hi = self.params.t_max;
        let (e_min, e_max) = self.energy_range;
        if e < e_min || e > e_max {
            return Err(EosError::OutOfRange {
                what: "energy density outside the tabulated temperature range",
                value: e,
            });
        }

        let mut t = self.initial_guess(e).clamp(lo, hi);
        for _ in 0..MAX_ITER {
            let residual = self.energy_density(t)? - e;
            if residual.abs() <= REL_TOL * e {
                return Ok(t);
            }
            if residual > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            if hi - lo <= 1e-14 * hi {
                return Ok(0.5 * (lo + hi));
            }

            // de/dT = T ds/dT
            let (_, ds_dt) = self.entropy_and_slope(t)?;
            let next = t - residual / (t * ds_dt);
            t = if next.is_finite() && next > lo && next < hi {
                next
            } else {
                0.5 * (lo + hi)
            };
        }

        warn!(e, "temperature inversion did not converge");
        Err(EosError::ConvergenceFailed {
            what: "temperature from energy density",
        })
    }

    fn mass_ratio(&self, t: f64) -> EosResult<f64> {
        self.check_range(t)?;
        Ok(self.mass(t) / t)
    }

    fn mass_derivative(&self, t: f64) -> EosResult<f64> {
        self.check_range(t)?;
        Ok(self.params.thermal_mass_ratio.powi(2) * t)
    }

    fn bag_function(&self, t: f64) -> EosResult<f64> {
        self.check_range(t)?;
        self.bag.eval(t)
    }

    fn beta_shear(&self, t: f64) -> EosResult<f64> {
        let Moments { m, z, .. } = self.moments(t)?;
        // I_42^(1) / T = g/(2 pi^2) / (15 T) * int dp p^6 / E^2 exp(-E/T)
        let beta = self.prefactor / (15.0 * t) * m.powi(5) * shear_moment(z);
        validation::validate_positive(beta, "beta_shear must be positive and finite")
    }

    fn beta_bulk(&self, t: f64) -> EosResult<f64> {
        let Moments { z, k2, k3, .. } = self.moments(t)?;
        let (s, _) = self.entropy_and_slope(t)?;
        // sound speed of a gas held at the local mass
        let cs2_fixed_mass = k3 / (z * k2 + 3.0 * k3);
        let beta = 5.0 / 3.0 * self.beta_shear(t)? - t * s * cs2_fixed_mass;
        validation::validate_positive(beta, "beta_bulk must be positive and finite")
    }
}
