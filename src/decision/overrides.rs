//! Safety overrides.
//!
//! Conditions that prohibit every crew outright, checked before the chart.
//! Order matters: the first matching override supplies the reason.

use serde::{Deserialize, Serialize};

use crate::model::{Fog, Observation, Thunder, Wave};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyOverride {
    Thunder,
    Fog,
    Whitecaps,
}

impl SafetyOverride {
    /// Overrides in priority order.
    pub const PRIORITY: [SafetyOverride; 3] = [
        SafetyOverride::Thunder,
        SafetyOverride::Fog,
        SafetyOverride::Whitecaps,
    ];

    pub fn applies(self, observation: &Observation) -> bool {
        match self {
            SafetyOverride::Thunder => observation.thunder == Thunder::AudibleOrWarning,
            SafetyOverride::Fog => observation.fog == Fog::FogIslandNotVisible,
            SafetyOverride::Whitecaps => observation.wave == Wave::WhitecapEverywhere,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            SafetyOverride::Thunder => "thunder audible or thunder advisory in effect",
            SafetyOverride::Fog => "fog present, reference landmark not visible",
            SafetyOverride::Whitecaps => "whitecaps observed everywhere",
        }
    }
}

/// Returns the highest-priority override that applies, if any.
pub fn first_override(observation: &Observation) -> Option<SafetyOverride> {
    SafetyOverride::PRIORITY
        .into_iter()
        .find(|o| o.applies(observation))
}
