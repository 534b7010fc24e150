//! Specific shear and bulk viscosities.

use bf_core::units::GEV_TO_INVERSE_FM;

use crate::error::{EosError, EosResult};

/// Temperature-dependent eta/s and zeta/s.
///
/// Shear is constant. Bulk is a Lorentzian peaked near the crossover:
/// `zeta/s = peak * w^2 / ((T - T_peak)^2 + w^2)`.
#[derive(Clone, Debug, PartialEq)]
pub struct SpecificViscosity {
    pub shear_over_entropy: f64,
    pub bulk_peak: f64,
    /// [fm^-1]
    pub bulk_peak_temperature: f64,
    /// [fm^-1]
    pub bulk_width: f64,
}

impl Default for SpecificViscosity {
    fn default() -> Self {
        Self {
            shear_over_entropy: 0.2,
            bulk_peak: 0.08,
            bulk_peak_temperature: 0.18 * GEV_TO_INVERSE_FM,
            bulk_width: 0.03 * GEV_TO_INVERSE_FM,
        }
    }
}

impl SpecificViscosity {
    pub fn validate(&self) -> EosResult<()> {
        if !self.shear_over_entropy.is_finite() || self.shear_over_entropy <= 0.0 {
            return Err(EosError::InvalidArg {
                what: "eta/s must be positive",
            });
        }
        if !self.bulk_peak.is_finite() || self.bulk_peak <= 0.0 {
            return Err(EosError::InvalidArg {
                what: "bulk viscosity peak must be positive",
            });
        }
        if !self.bulk_peak_temperature.is_finite() || self.bulk_peak_temperature <= 0.0 {
            return Err(EosError::InvalidArg {
                what: "bulk peak temperature must be positive",
            });
        }
        if !self.bulk_width.is_finite() || self.bulk_width <= 0.0 {
            return Err(EosError::InvalidArg {
                what: "bulk width must be positive",
            });
        }
        Ok(())
    }

    /// eta/s at temperature T.
    pub fn shear(&self, _t: f64) -> f64 {
        self.shear_over_entropy
    }

    /// zeta/s at temperature T.
    pub fn bulk(&self, t: f64) -> f64 {
        let w2 = self.bulk_width * self.bulk_width;
        let dt = t - self.bulk_peak_temperature;
        self.bulk_peak * w2 / (dt * dt + w2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_peaks_at_crossover() {
        let v = SpecificViscosity::default();
        let tp = v.bulk_peak_temperature;
        assert!((v.bulk(tp) - 0.08).abs() < 1e-15);
        assert!(v.bulk(tp + v.bulk_width) < v.bulk(tp));
        assert!((v.bulk(tp + v.bulk_width) - 0.04).abs() < 1e-12);
        assert!((v.bulk(tp - v.bulk_width) - v.bulk(tp + v.bulk_width)).abs() < 1e-15);
    }

    #[test]
    fn shear_is_constant() {
        let v = SpecificViscosity::default();
        assert_eq!(v.shear(1.0), v.shear(10.0));
    }

    #[test]
    fn validate_rejects_non_positive() {
        let v = SpecificViscosity {
            shear_over_entropy: 0.0,
            ..SpecificViscosity::default()
        };
        assert!(v.validate().is_err());
        let v = SpecificViscosity {
            bulk_width: f64::NAN,
            ..SpecificViscosity::default()
        };
        assert!(v.validate().is_err());
        assert!(SpecificViscosity::default().validate().is_ok());
    }
}
