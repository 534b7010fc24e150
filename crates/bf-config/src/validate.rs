//! Configuration validation logic.

use crate::schema::{CURRENT_VERSION, ConditionDef, RunConfig};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(field, value, "must be positive and finite"));
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field, value, "must be non-negative and finite"));
    }
    Ok(())
}

pub fn validate_config(config: &RunConfig) -> Result<(), ValidationError> {
    if config.version == 0 || config.version > CURRENT_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }
    if config.name.trim().is_empty() {
        return Err(invalid("name", &config.name, "must not be empty"));
    }

    let initial = &config.initial;
    positive("initial.temperature_gev", initial.temperature_gev)?;
    positive("initial.tau0_fm", initial.tau0_fm)?;
    if let ConditionDef::Glasma { pl_ratio, pt_ratio } = initial.condition {
        non_negative("initial.condition.pl_ratio", pl_ratio)?;
        positive("initial.condition.pt_ratio", pt_ratio)?;
    }

    let evolution = &config.evolution;
    positive("evolution.dtau_fm", evolution.dtau_fm)?;
    if !evolution.tauf_fm.is_finite() {
        return Err(invalid("evolution.tauf_fm", evolution.tauf_fm, "must be finite"));
    }
    if evolution.tauf_fm < initial.tau0_fm {
        return Err(invalid(
            "evolution.tauf_fm",
            evolution.tauf_fm,
            "must not precede initial.tau0_fm",
        ));
    }
    if evolution.steps_per_sample == 0 {
        return Err(invalid("evolution.steps_per_sample", 0, "must be at least 1"));
    }

    let medium = &config.medium;
    positive("medium.degeneracy", medium.degeneracy)?;
    non_negative("medium.mass_gev", medium.mass_gev)?;
    non_negative("medium.thermal_mass_ratio", medium.thermal_mass_ratio)?;
    if medium.mass_gev == 0.0 && medium.thermal_mass_ratio == 0.0 {
        return Err(invalid(
            "medium.mass_gev",
            medium.mass_gev,
            "mass and thermal mass ratio cannot both vanish",
        ));
    }

    let viscosity = &config.viscosity;
    positive("viscosity.shear_over_entropy", viscosity.shear_over_entropy)?;
    positive("viscosity.bulk_peak", viscosity.bulk_peak)?;
    positive(
        "viscosity.bulk_peak_temperature_gev",
        viscosity.bulk_peak_temperature_gev,
    )?;
    positive("viscosity.bulk_width_gev", viscosity.bulk_width_gev)?;

    Ok(())
}
