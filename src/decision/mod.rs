//! Launch decision engine.
//!
//! `evaluate` is a pure function from an `Observation` to an
//! `EvaluationResult`. It applies the safety overrides first and otherwise
//! classifies each crew against the risk chart independently.
//!
//! Submodules:
//! - `overrides` — thunder, fog and whitecap conditions that prohibit all crews.

pub mod overrides;

use crate::chart;
use crate::logging;
use crate::model::{CrewCategory, CrewVerdict, EvaluationResult, InputError, Observation, Verdict};
use crate::validate::{self, RawObservation};

pub use overrides::{SafetyOverride, first_override};

/// Evaluates a translated observation. Never fails, and touches no shared
/// state: callers log the outcome if they want it logged.
pub fn evaluate(observation: &Observation) -> EvaluationResult {
    match first_override(observation) {
        Some(o) => EvaluationResult {
            prohibited: true,
            reason: Some(o.reason().to_string()),
            crews: CrewCategory::ALL.map(|crew| CrewVerdict::new(crew, Verdict::Prohibited)),
        },
        None => EvaluationResult {
            prohibited: false,
            reason: None,
            crews: CrewCategory::ALL.map(|crew| {
                let level = chart::lookup(
                    observation.wave,
                    observation.water_temp,
                    crew,
                    observation.wind_speed,
                );
                CrewVerdict::new(crew, level.verdict())
            }),
        },
    }
}

/// Validates, translates and evaluates raw caller input in one step.
///
/// No result is produced unless all five fields are present.
pub fn assess(raw: &RawObservation) -> Result<EvaluationResult, InputError> {
    let validation = validate::validate(raw);
    if !validation.ok {
        logging::log_validation_failure(&validation.field_errors);
        return Err(InputError::MissingFields(validation.field_errors.missing()));
    }
    let observation = raw.to_observation()?;
    let result = evaluate(&observation);
    logging::log_evaluation_summary(&observation, &result);
    Ok(result)
}
