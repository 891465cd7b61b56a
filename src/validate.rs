//! Input validation and translation.
//!
//! `validate` is a presence check over the five raw fields and nothing more:
//! it does not check option membership and does not range-check wind speed.
//! `RawObservation::to_observation` then translates the validated strings
//! into the closed enums the engine works with.

use serde::{Deserialize, Deserializer, Serialize};

use crate::logging::{self, Component};
use crate::model::{
    FieldName, Fog, InputError, Observation, ObservationOption, Thunder, WaterTemp, Wave,
};

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// The five fields exactly as the caller received them.
///
/// `None` and `Some("")` both count as missing. In observation files the
/// wind speed may be written as a TOML number or a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawObservation {
    #[serde(default, deserialize_with = "text_or_number")]
    pub wind_speed: Option<String>,
    #[serde(default)]
    pub water_temp: Option<String>,
    #[serde(default)]
    pub wave: Option<String>,
    #[serde(default)]
    pub fog: Option<String>,
    #[serde(default)]
    pub thunder: Option<String>,
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<TextOrNumber>::deserialize(deserializer)?.map(|v| match v {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Int(i) => i.to_string(),
        TextOrNumber::Float(f) => float_text(f),
    }))
}

/// Spells a TOML float so `WindSpeed::parse` reads it back. Rust writes
/// infinity as `inf`, which has no numeric prefix and would collapse to 0.
fn float_text(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f == f64::INFINITY {
        "Infinity".to_string()
    } else if f == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        f.to_string()
    }
}

impl RawObservation {
    /// Translates validated fields into an `Observation`.
    ///
    /// Fails with `MissingFields` if validation does not pass, or with
    /// `UnrecognizedOption` if an enum field is outside its option set.
    /// A non-numeric wind speed does not fail; see `WindSpeed::parse`.
    pub fn to_observation(&self) -> Result<Observation, InputError> {
        let validation = validate(self);
        if !validation.ok {
            return Err(InputError::MissingFields(validation.field_errors.missing()));
        }

        let wind = WindSpeed::parse(self.wind_speed.as_deref().unwrap_or_default());
        if !wind.numeric {
            logging::warn(
                Component::Validator,
                Some(FieldName::WindSpeed.as_str()),
                &format!(
                    "Non-numeric wind speed {:?} treated as 0 m/s",
                    self.wind_speed.as_deref().unwrap_or_default()
                ),
            );
        }

        Ok(Observation {
            wind_speed: wind.value,
            water_temp: parse_option::<WaterTemp>(self.water_temp.as_deref())?,
            wave: parse_option::<Wave>(self.wave.as_deref())?,
            fog: parse_option::<Fog>(self.fog.as_deref())?,
            thunder: parse_option::<Thunder>(self.thunder.as_deref())?,
        })
    }
}

fn parse_option<T: ObservationOption>(raw: Option<&str>) -> Result<T, InputError> {
    match raw {
        Some(value) => T::from_option(value),
        None => Err(InputError::MissingFields(vec![T::FIELD])),
    }
}

// ---------------------------------------------------------------------------
// Presence validation
// ---------------------------------------------------------------------------

/// Per-field error flags. `true` means the field is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    pub wind_speed: bool,
    pub water_temp: bool,
    pub wave: bool,
    pub fog: bool,
    pub thunder: bool,
}

impl FieldErrors {
    pub fn get(&self, name: FieldName) -> bool {
        match name {
            FieldName::WindSpeed => self.wind_speed,
            FieldName::WaterTemp => self.water_temp,
            FieldName::Wave => self.wave,
            FieldName::Fog => self.fog,
            FieldName::Thunder => self.thunder,
        }
    }

    /// Flagged fields, in form order.
    pub fn missing(&self) -> Vec<FieldName> {
        FieldName::ALL.into_iter().filter(|n| self.get(*n)).collect()
    }

    pub fn any(&self) -> bool {
        FieldName::ALL.iter().any(|n| self.get(*n))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub ok: bool,
    pub field_errors: FieldErrors,
}

fn is_missing(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

/// Checks that all five fields are present.
pub fn validate(raw: &RawObservation) -> Validation {
    let field_errors = FieldErrors {
        wind_speed: is_missing(raw.wind_speed.as_deref()),
        water_temp: is_missing(raw.water_temp.as_deref()),
        wave: is_missing(raw.wave.as_deref()),
        fog: is_missing(raw.fog.as_deref()),
        thunder: is_missing(raw.thunder.as_deref()),
    };

    if field_errors.any() {
        logging::debug(
            Component::Validator,
            None,
            &format!("{} of 5 fields missing", field_errors.missing().len()),
        );
    }

    Validation {
        ok: !field_errors.any(),
        field_errors,
    }
}

// ---------------------------------------------------------------------------
// Wind speed
// ---------------------------------------------------------------------------

/// A floored wind speed and whether the raw text actually held a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindSpeed {
    pub value: i64,
    pub numeric: bool,
}

impl WindSpeed {
    /// Parses a raw wind-speed field the way the club's form always has.
    ///
    /// Leading whitespace is skipped and the longest numeric prefix is used,
    /// so `"3.7m/s"` reads as 3.7. The value is floored, not rounded. Text
    /// with no numeric prefix becomes 0 with `numeric == false`. Infinite and
    /// out-of-range values saturate.
    pub fn parse(raw: &str) -> WindSpeed {
        match numeric_prefix(raw) {
            Some(v) if !v.is_nan() => WindSpeed {
                // Float-to-int `as` saturates at the i64 bounds.
                value: v.floor() as i64,
                numeric: true,
            },
            _ => WindSpeed {
                value: 0,
                numeric: false,
            },
        }
    }
}

/// Parses the longest leading decimal literal in `raw`.
fn numeric_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        let sign = if s.starts_with('-') { -1.0 } else { 1.0 };
        return Some(sign * f64::INFINITY);
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when it has at least one digit.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
