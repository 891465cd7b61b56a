//! Core data types for the rowing launch safety check.
//!
//! This module defines the shared domain model imported by all other modules:
//! the observation enums, crew categories, risk levels, verdicts and the
//! evaluation result. It contains no evaluation logic and no I/O.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Observation fields
// ---------------------------------------------------------------------------

/// Water temperature band, split at 15 °C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterTemp {
    Below15,
    AtOrAbove15,
}

/// Surface state of the water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wave {
    /// No waves, or only very slight ones.
    Calm,
    /// Waves present but no whitecaps.
    WaveNoWhitecap,
    /// Whitecaps visible everywhere. Always an override.
    WhitecapEverywhere,
}

/// Fog state, judged by whether the reference island can be seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fog {
    None,
    FogIslandVisible,
    FogIslandNotVisible,
}

/// Thunder state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Thunder {
    None,
    /// Thunder is audible, or a thunder advisory has been issued.
    AudibleOrWarning,
}

/// Ties an enum to its fixed option set: the published chart label shown to
/// rowers and a stable snake_case key for files and flags.
pub trait ObservationOption: Sized + Copy + 'static {
    /// Field name used in error messages.
    const FIELD: FieldName;
    /// Every option, in display order.
    const ALL: &'static [Self];

    fn key(self) -> &'static str;
    fn label(self) -> &'static str;

    /// Matches either the key or the label. Surrounding whitespace is ignored.
    fn from_option(raw: &str) -> Result<Self, InputError> {
        let trimmed = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|o| o.key() == trimmed || o.label() == trimmed)
            .ok_or_else(|| InputError::UnrecognizedOption {
                field: Self::FIELD,
                value: raw.to_string(),
            })
    }
}

impl ObservationOption for WaterTemp {
    const FIELD: FieldName = FieldName::WaterTemp;
    const ALL: &'static [Self] = &[WaterTemp::Below15, WaterTemp::AtOrAbove15];

    fn key(self) -> &'static str {
        match self {
            WaterTemp::Below15 => "below_15",
            WaterTemp::AtOrAbove15 => "at_or_above_15",
        }
    }

    fn label(self) -> &'static str {
        match self {
            WaterTemp::Below15 => "15℃未満",
            WaterTemp::AtOrAbove15 => "15℃以上",
        }
    }
}

impl ObservationOption for Wave {
    const FIELD: FieldName = FieldName::Wave;
    const ALL: &'static [Self] = &[Wave::Calm, Wave::WaveNoWhitecap, Wave::WhitecapEverywhere];

    fn key(self) -> &'static str {
        match self {
            Wave::Calm => "calm",
            Wave::WaveNoWhitecap => "wave_no_whitecap",
            Wave::WhitecapEverywhere => "whitecap_everywhere",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Wave::Calm => "波がない、もしくは微弱",
            Wave::WaveNoWhitecap => "波はあるが、白波はない",
            Wave::WhitecapEverywhere => "白波がいたるところでみられる",
        }
    }
}

impl ObservationOption for Fog {
    const FIELD: FieldName = FieldName::Fog;
    const ALL: &'static [Self] = &[Fog::None, Fog::FogIslandNotVisible, Fog::FogIslandVisible];

    fn key(self) -> &'static str {
        match self {
            Fog::None => "none",
            Fog::FogIslandVisible => "fog_island_visible",
            Fog::FogIslandNotVisible => "fog_island_not_visible",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Fog::None => "霧が出ていない",
            Fog::FogIslandVisible => "霧が出ており、中島を確認できる",
            Fog::FogIslandNotVisible => "霧が出ており、中島を確認できない",
        }
    }
}

impl ObservationOption for Thunder {
    const FIELD: FieldName = FieldName::Thunder;
    const ALL: &'static [Self] = &[Thunder::None, Thunder::AudibleOrWarning];

    fn key(self) -> &'static str {
        match self {
            Thunder::None => "none",
            Thunder::AudibleOrWarning => "audible_or_warning",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Thunder::None => "雷鳴が聞こえない・雷注意報は出ていない",
            Thunder::AudibleOrWarning => "雷鳴が聞こえる・雷注意報が出ている",
        }
    }
}

macro_rules! option_traits {
    ($($ty:ty),*) => {$(
        impl FromStr for $ty {
            type Err = InputError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as ObservationOption>::from_option(s)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }
    )*};
}

option_traits!(WaterTemp, Wave, Fog, Thunder);

// ---------------------------------------------------------------------------
// Observation
// ---------------------------------------------------------------------------

/// A complete, translated set of conditions at launch time.
///
/// `wind_speed` is whole metres per second, already floored. It is signed
/// because a negative raw measurement floors below zero; the chart treats
/// that as off-chart (RED) rather than rejecting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation {
    pub wind_speed: i64,
    pub water_temp: WaterTemp,
    pub wave: Wave,
    pub fog: Fog,
    pub thunder: Thunder,
}

// ---------------------------------------------------------------------------
// Crews, risk and verdicts
// ---------------------------------------------------------------------------

/// Crew composition by share of experienced rowers (two or more years).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrewCategory {
    NoExperiencedRower,
    HalfOrFewerExperienced,
    MoreThanHalfExperienced,
}

impl CrewCategory {
    /// All categories in the fixed result order.
    pub const ALL: [CrewCategory; 3] = [
        CrewCategory::NoExperiencedRower,
        CrewCategory::HalfOrFewerExperienced,
        CrewCategory::MoreThanHalfExperienced,
    ];

    /// Stable snake_case key, identical to the serialized name.
    pub fn key(self) -> &'static str {
        match self {
            CrewCategory::NoExperiencedRower => "no_experienced_rower",
            CrewCategory::HalfOrFewerExperienced => "half_or_fewer_experienced",
            CrewCategory::MoreThanHalfExperienced => "more_than_half_experienced",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CrewCategory::NoExperiencedRower => "no rower with 2+ years of experience",
            CrewCategory::HalfOrFewerExperienced => "half or fewer rowers with 2+ years",
            CrewCategory::MoreThanHalfExperienced => "more than half rowers with 2+ years",
        }
    }
}

impl fmt::Display for CrewCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Chart colour, in ascending order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Blue,
    Yellow,
    Red,
}

impl RiskLevel {
    pub fn verdict(self) -> Verdict {
        match self {
            RiskLevel::Blue => Verdict::Allowed,
            RiskLevel::Yellow => Verdict::Restricted,
            RiskLevel::Red => Verdict::Prohibited,
        }
    }
}

/// What a crew may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Allowed,
    Restricted,
    Prohibited,
}

const RESTRICTED_MESSAGE: &str =
    "small boats prohibited; large boats may proceed on a restricted course if requested";

impl Verdict {
    /// Fixed advisory shown alongside the verdict.
    pub fn message(self) -> &'static str {
        match self {
            Verdict::Allowed => "boating permitted",
            Verdict::Restricted => RESTRICTED_MESSAGE,
            Verdict::Prohibited => "boating prohibited",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Verdict::Allowed => "ALLOWED",
            Verdict::Restricted => "RESTRICTED",
            Verdict::Prohibited => "PROHIBITED",
        };
        f.pad(text)
    }
}

/// One crew's line in the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewVerdict {
    pub crew: CrewCategory,
    pub verdict: Verdict,
    pub message: String,
}

impl CrewVerdict {
    pub fn new(crew: CrewCategory, verdict: Verdict) -> Self {
        Self {
            crew,
            verdict,
            message: verdict.message().to_string(),
        }
    }
}

/// Outcome of one evaluation.
///
/// `prohibited` is true only when a safety override fired; in that case
/// `reason` carries the override text and every crew is `Prohibited`. A
/// table-derived all-red result still has `prohibited == false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub prohibited: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub crews: [CrewVerdict; 3],
}

// ---------------------------------------------------------------------------
// Field names and errors
// ---------------------------------------------------------------------------

/// The five required input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    WindSpeed,
    WaterTemp,
    Wave,
    Fog,
    Thunder,
}

impl FieldName {
    pub const ALL: [FieldName; 5] = [
        FieldName::WindSpeed,
        FieldName::WaterTemp,
        FieldName::Wave,
        FieldName::Fog,
        FieldName::Thunder,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::WindSpeed => "wind_speed",
            FieldName::WaterTemp => "water_temp",
            FieldName::Wave => "wave",
            FieldName::Fog => "fog",
            FieldName::Thunder => "thunder",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while turning raw caller input into an `Observation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// One or more required fields were absent or empty.
    MissingFields(Vec<FieldName>),
    /// A field held text outside its fixed option set.
    UnrecognizedOption { field: FieldName, value: String },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::MissingFields(fields) => {
                let names: Vec<&str> = fields.iter().map(|n| n.as_str()).collect();
                write!(f, "Missing required fields: {}", names.join(", "))
            }
            InputError::UnrecognizedOption { field, value } => {
                write!(f, "Unrecognized value for {}: '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for InputError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Blue < RiskLevel::Yellow);
        assert!(RiskLevel::Yellow < RiskLevel::Red);
    }

    #[test]
    fn test_risk_level_maps_to_verdict() {
        assert_eq!(RiskLevel::Blue.verdict(), Verdict::Allowed);
        assert_eq!(RiskLevel::Yellow.verdict(), Verdict::Restricted);
        assert_eq!(RiskLevel::Red.verdict(), Verdict::Prohibited);
    }

    #[test]
    fn test_restricted_message_mentions_both_boat_sizes() {
        let msg = Verdict::Restricted.message();
        assert!(msg.contains("small boats prohibited"));
        assert!(msg.contains("restricted course"));
    }

    #[test]
    fn test_options_parse_from_key_and_label() {
        assert_eq!("calm".parse::<Wave>(), Ok(Wave::Calm));
        assert_eq!("波はあるが、白波はない".parse::<Wave>(), Ok(Wave::WaveNoWhitecap));
        assert_eq!(" below_15 ".parse::<WaterTemp>(), Ok(WaterTemp::Below15));
        assert_eq!(
            "霧が出ており、中島を確認できない".parse::<Fog>(),
            Ok(Fog::FogIslandNotVisible)
        );
        assert_eq!(
            "audible_or_warning".parse::<Thunder>(),
            Ok(Thunder::AudibleOrWarning)
        );
    }

    #[test]
    fn test_unknown_option_reports_field() {
        let err = "stormy".parse::<Wave>().unwrap_err();
        assert_eq!(
            err,
            InputError::UnrecognizedOption {
                field: FieldName::Wave,
                value: "stormy".to_string(),
            }
        );
        assert!(err.to_string().contains("wave"));
    }

    #[test]
    fn test_every_option_round_trips_through_its_label() {
        for w in Wave::ALL {
            assert_eq!(w.label().parse::<Wave>(), Ok(*w));
        }
        for t in WaterTemp::ALL {
            assert_eq!(t.label().parse::<WaterTemp>(), Ok(*t));
        }
        for f in Fog::ALL {
            assert_eq!(f.label().parse::<Fog>(), Ok(*f));
        }
        for t in Thunder::ALL {
            assert_eq!(t.label().parse::<Thunder>(), Ok(*t));
        }
    }

    #[test]
    fn test_crew_keys_match_serialized_names() {
        for crew in CrewCategory::ALL {
            let json = serde_json::to_value(crew).expect("crew should serialize");
            assert_eq!(json, crew.key());
        }
    }
}
