//! Primitive-variable recovery for the Milne-coordinate fluid.
//!
//! This crate turns the integrated `T^{tau mu}` components (plus the viscous
//! stresses) back into a four-velocity, energy density and pressure that are
//! consistent with the equation of state. The root is found by a scalar
//! Newton iteration kept inside a shrinking bracket.

pub mod error;
pub mod newton;
pub mod primitive;
pub mod reconstruct;

pub use error::{SolverError, SolverResult};
pub use newton::{NewtonConfig, NewtonResult, bracketed_newton};
pub use primitive::{FourVelocity, MilneMetric, Primitives};
pub use reconstruct::{PrimitiveSolver, Reconstruct, ReconstructConfig};
