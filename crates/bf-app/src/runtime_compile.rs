//! Runtime compilation of a RunConfig into the medium and evolution settings.
//!
//! Configuration speaks GeV and fm; everything below this point is in
//! natural units (fm^-1, fm).

use bf_config::{ClosureDef, ConditionDef, RunConfig};
use bf_core::units::{Energy, Length, in_fm, inverse_fm};
use bf_eos::{Medium, QuasiparticleParams, SpecificViscosity};
use bf_sim::{EvolutionSettings, InitialCondition, IntegratorType, RelaxationClosure};
use uom::si::energy::gigaelectronvolt;
use uom::si::length::femtometer;

use crate::error::{AppError, AppResult};

fn temperature(value_gev: f64) -> f64 {
    inverse_fm(Energy::new::<gigaelectronvolt>(value_gev))
}

fn proper_time(value_fm: f64) -> f64 {
    in_fm(Length::new::<femtometer>(value_fm))
}

/// Build the quasiparticle medium described by the config.
pub fn compile_medium(config: &RunConfig) -> AppResult<Medium> {
    let params = QuasiparticleParams {
        degeneracy: config.medium.degeneracy,
        mass: temperature(config.medium.mass_gev),
        thermal_mass_ratio: config.medium.thermal_mass_ratio,
        ..QuasiparticleParams::default()
    };
    let viscosity = SpecificViscosity {
        shear_over_entropy: config.viscosity.shear_over_entropy,
        bulk_peak: config.viscosity.bulk_peak,
        bulk_peak_temperature: temperature(config.viscosity.bulk_peak_temperature_gev),
        bulk_width: temperature(config.viscosity.bulk_width_gev),
    };
    Ok(Medium::quasiparticle(params, viscosity)?)
}

pub fn compile_closure(closure: ClosureDef) -> RelaxationClosure {
    match closure {
        ClosureDef::FixedMass => RelaxationClosure::FixedMass,
        ClosureDef::Kinetic => RelaxationClosure::Kinetic,
    }
}

pub fn compile_initial(condition: &ConditionDef) -> InitialCondition {
    match *condition {
        ConditionDef::Equilibrium => InitialCondition::Equilibrium,
        ConditionDef::Glasma { pl_ratio, pt_ratio } => {
            InitialCondition::Glasma { pl_ratio, pt_ratio }
        }
    }
}

/// Evolution settings in natural units, validated.
pub fn compile_settings(config: &RunConfig) -> AppResult<EvolutionSettings> {
    let settings = EvolutionSettings {
        temperature: temperature(config.initial.temperature_gev),
        tau0: proper_time(config.initial.tau0_fm),
        tauf: proper_time(config.evolution.tauf_fm),
        dtau: proper_time(config.evolution.dtau_fm),
        steps_per_sample: config.evolution.steps_per_sample,
        closure: compile_closure(config.closure),
        initial: compile_initial(&config.initial.condition),
        integrator: IntegratorType::Heun,
    };
    settings
        .validate()
        .map_err(|e| AppError::Compile(e.to_string()))?;
    Ok(settings)
}
