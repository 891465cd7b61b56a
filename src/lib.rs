//! Launch safety check for rowing crews.
//!
//! Given the conditions on the water, decides for each crew category
//! whether boating is allowed, restricted to large boats on a shortened
//! course, or prohibited. Decisions come from a fixed risk chart plus three
//! overrides (thunder, fog hiding the reference island, whitecaps
//! everywhere) that prohibit every crew.
//!
//! ```
//! use rowing_safety::{assess, RawObservation, Verdict};
//!
//! let raw = RawObservation {
//!     wind_speed: Some("4".to_string()),
//!     water_temp: Some("at_or_above_15".to_string()),
//!     wave: Some("wave_no_whitecap".to_string()),
//!     fog: Some("none".to_string()),
//!     thunder: Some("none".to_string()),
//! };
//! let result = assess(&raw).unwrap();
//! assert_eq!(result.crews[2].verdict, Verdict::Allowed);
//! ```

pub mod chart;
pub mod config;
pub mod decision;
pub mod logging;
pub mod model;
pub mod report;
pub mod validate;

pub use decision::{SafetyOverride, assess, evaluate};
pub use model::{
    CrewCategory, CrewVerdict, EvaluationResult, FieldName, Fog, InputError, Observation,
    ObservationOption, RiskLevel, Thunder, Verdict, WaterTemp, Wave,
};
pub use validate::{FieldErrors, RawObservation, Validation, WindSpeed, validate};
