//! bf-eos: equation of state and transport coefficients of the medium.
//!
//! Provides:
//! - The [`EquationOfState`] trait and [`ThermoPack`]
//! - [`QuasiparticleGas`], a Boltzmann gas with a temperature-dependent mass
//! - [`SpecificViscosity`] (eta/s, zeta/s) and the combined [`Medium`]
//!
//! All quantities are in natural units: temperature in fm^-1, energy density
//! and pressure in fm^-4.

pub mod bessel;
pub mod error;
pub mod medium;
pub mod model;
pub mod quasiparticle;
pub mod viscosity;

pub use error::{EosError, EosResult};
pub use medium::Medium;
pub use model::{EquationOfState, ThermoPack};
pub use quasiparticle::{QuasiparticleGas, QuasiparticleParams};
pub use viscosity::SpecificViscosity;
