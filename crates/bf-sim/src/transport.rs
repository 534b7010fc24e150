//! Auxiliary transport scalars evaluated from the local primitives.

use bf_eos::Medium;

use crate::closure::RelaxationClosure;
use crate::error::SimResult;

/// Temperature, relaxation times, Navier-Stokes targets and the
/// quasiparticle mean field at one proper time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transport {
    /// Effective temperature [fm^-1]
    pub temperature: f64,
    pub cs2: f64,
    /// (e + p) / T [fm^-3]
    pub entropy_density: f64,
    /// [fm]
    pub tau_pi: f64,
    /// [fm]
    pub tau_bulk: f64,
    /// Navier-Stokes shear, 4 s (eta/s) / (3 tau)
    pub pi_ns: f64,
    /// Navier-Stokes bulk, -s (zeta/s) / tau
    pub bulk_ns: f64,
    /// Equilibrium mean field B_eq(T)
    pub b_eq: f64,
    /// Second-order bulk correction to the mean field
    pub db_2nd: f64,
}

impl Transport {
    pub fn evaluate(
        medium: &Medium,
        closure: RelaxationClosure,
        e: f64,
        p: f64,
        bulk: f64,
        tau: f64,
    ) -> SimResult<Self> {
        let eos = medium.eos.as_ref();
        let t = eos.temperature(e)?;
        let cs2 = eos.speed_of_sound_squared(t)?;
        let s = (e + p) / t;
        let times = closure.relaxation_times(medium, t, e, p)?;

        let pi_ns = 4.0 * s * medium.viscosity.shear(t) / (3.0 * tau);
        let bulk_ns = -s * medium.viscosity.bulk(t) / tau;

        let z = eos.mass_ratio(t)?;
        let mdmdt = eos.mass_derivative(t)?;
        let db_2nd = -3.0 * times.bulk * mdmdt / (z * z) * cs2 * bulk / (tau * t);

        Ok(Self {
            temperature: t,
            cs2,
            entropy_density: s,
            tau_pi: times.shear,
            tau_bulk: times.bulk,
            pi_ns,
            bulk_ns,
            b_eq: eos.bag_function(t)?,
            db_2nd,
        })
    }

    /// Full mean field B = B_eq + dB_2nd.
    pub fn b(&self) -> f64 {
        self.b_eq + self.db_2nd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bf_core::units::GEV_TO_INVERSE_FM;

    #[test]
    fn navier_stokes_targets() {
        let medium = Medium::standard().unwrap();
        let t = 0.3 * GEV_TO_INVERSE_FM;
        let e = medium.eos.energy_density(t).unwrap();
        let p = medium.eos.pressure(t).unwrap();
        let tau = 2.0;

        let tr = Transport::evaluate(&medium, RelaxationClosure::FixedMass, e, p, 0.0, tau).unwrap();
        assert!((tr.temperature - t).abs() / t < 1e-9);
        assert!((tr.pi_ns - 4.0 * tr.entropy_density * 0.2 / (3.0 * tau)).abs() < 1e-12);
        assert!(tr.bulk_ns < 0.0);
        // no bulk pressure, no correction
        assert_eq!(tr.db_2nd, 0.0);
        assert_eq!(tr.b(), tr.b_eq);
    }

    #[test]
    fn mean_field_correction_follows_bulk_sign() {
        let medium = Medium::standard().unwrap();
        let t = 0.3 * GEV_TO_INVERSE_FM;
        let e = medium.eos.energy_density(t).unwrap();
        let p = medium.eos.pressure(t).unwrap();
        let tr = Transport::evaluate(&medium, RelaxationClosure::Kinetic, e, p, -0.1, 1.0).unwrap();
        assert!(tr.db_2nd > 0.0);
    }
}
