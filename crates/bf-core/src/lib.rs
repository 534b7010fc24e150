//! bf-core: stable foundation for bjorkenflow.
//!
//! Contains:
//! - units (natural-unit conversions, uom quantities at the configuration boundary)
//! - numeric (fixed-step counting)
//! - state (the six-component conserved/dissipative state vector)

pub mod numeric;
pub mod state;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use numeric::*;
pub use state::StateVector;
pub use units::*;
