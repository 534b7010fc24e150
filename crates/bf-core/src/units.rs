// bf-core/src/units.rs
//
// The evolution runs in natural units (hbar = c = k_B = 1) with lengths in fm:
// temperature in fm^-1, proper time in fm, energy density in fm^-4. uom has no
// natural-unit system, so quantities are typed only where they enter or leave
// the program (configuration, reports) and unwrapped to f64 below that.

use uom::si::f64::{Energy as UomEnergy, Length as UomLength};

// Public canonical unit types (SI, f64)
pub type Energy = UomEnergy;
pub type Length = UomLength;

/// hbar*c in GeV fm, inverted: 1 GeV = 5.067731 fm^-1.
pub const GEV_TO_INVERSE_FM: f64 = 5.067731;

#[inline]
pub fn gev(v: f64) -> Energy {
    use uom::si::energy::gigaelectronvolt;
    Energy::new::<gigaelectronvolt>(v)
}

#[inline]
pub fn fm(v: f64) -> Length {
    use uom::si::length::femtometer;
    Length::new::<femtometer>(v)
}

/// Energy (temperature, mass) in fm^-1.
#[inline]
pub fn inverse_fm(e: Energy) -> f64 {
    use uom::si::energy::gigaelectronvolt;
    e.get::<gigaelectronvolt>() * GEV_TO_INVERSE_FM
}

/// Length (proper time) in fm.
#[inline]
pub fn in_fm(l: Length) -> f64 {
    use uom::si::length::femtometer;
    l.get::<femtometer>()
}

/// fm^-1 back to GeV, for reporting.
#[inline]
pub fn to_gev(inverse_fm: f64) -> f64 {
    inverse_fm / GEV_TO_INVERSE_FM
}
