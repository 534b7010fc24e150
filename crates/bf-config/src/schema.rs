//! Run configuration schema.
//!
//! Physical inputs are given in GeV and fm. Every section has defaults, so a
//! file only needs the fields it changes:
//!
//! ```yaml
//! version: 1
//! name: glasma-kinetic
//! initial:
//!   temperature_gev: 0.5
//!   condition:
//!     type: glasma
//! closure: kinetic
//! evolution:
//!   tauf_fm: 20.0
//! ```

use serde::{Deserialize, Serialize};

pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub initial: InitialDef,
    #[serde(default)]
    pub evolution: EvolutionDef,
    #[serde(default)]
    pub closure: ClosureDef,
    #[serde(default)]
    pub medium: MediumDef,
    #[serde(default)]
    pub viscosity: ViscosityDef,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            name: default_name(),
            initial: InitialDef::default(),
            evolution: EvolutionDef::default(),
            closure: ClosureDef::default(),
            medium: MediumDef::default(),
            viscosity: ViscosityDef::default(),
        }
    }
}

fn default_version() -> u32 {
    CURRENT_VERSION
}

fn default_name() -> String {
    "bjorken".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InitialDef {
    pub temperature_gev: f64,
    pub tau0_fm: f64,
    pub condition: ConditionDef,
}

impl Default for InitialDef {
    fn default() -> Self {
        Self {
            temperature_gev: 0.5,
            tau0_fm: 0.25,
            condition: ConditionDef::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConditionDef {
    #[default]
    Equilibrium,
    Glasma {
        #[serde(default = "default_pl_ratio")]
        pl_ratio: f64,
        #[serde(default = "default_pt_ratio")]
        pt_ratio: f64,
    },
}

impl ConditionDef {
    pub fn glasma() -> Self {
        ConditionDef::Glasma {
            pl_ratio: default_pl_ratio(),
            pt_ratio: default_pt_ratio(),
        }
    }
}

fn default_pl_ratio() -> f64 {
    0.014925
}

fn default_pt_ratio() -> f64 {
    1.4925
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EvolutionDef {
    pub tauf_fm: f64,
    pub dtau_fm: f64,
    pub steps_per_sample: usize,
}

impl Default for EvolutionDef {
    fn default() -> Self {
        Self {
            tauf_fm: 100.0,
            dtau_fm: 0.01,
            steps_per_sample: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClosureDef {
    #[default]
    FixedMass,
    Kinetic,
}

/// Quasiparticle gas parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MediumDef {
    pub degeneracy: f64,
    pub mass_gev: f64,
    pub thermal_mass_ratio: f64,
}

impl Default for MediumDef {
    fn default() -> Self {
        Self {
            degeneracy: 40.0,
            mass_gev: 0.2,
            thermal_mass_ratio: 0.8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViscosityDef {
    pub shear_over_entropy: f64,
    pub bulk_peak: f64,
    pub bulk_peak_temperature_gev: f64,
    pub bulk_width_gev: f64,
}

impl Default for ViscosityDef {
    fn default() -> Self {
        Self {
            shear_over_entropy: 0.2,
            bulk_peak: 0.08,
            bulk_peak_temperature_gev: 0.18,
            bulk_width_gev: 0.03,
        }
    }
}
