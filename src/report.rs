//! Plain-text rendering for the command-line caller.

use std::fmt::Write;

use crate::chart::RISK_CHART;
use crate::model::{EvaluationResult, FieldName, ObservationOption};
use crate::validate::FieldErrors;

pub fn render_result(result: &EvaluationResult) -> String {
    let mut out = String::new();

    if let Some(reason) = result.reason.as_deref().filter(|_| result.prohibited) {
        let _ = writeln!(out, "LAUNCH PROHIBITED: {}", reason);
    }

    for crew in &result.crews {
        let _ = writeln!(out, "{:<10} {} ({})", crew.verdict, crew.crew, crew.message);
    }
    out
}

pub fn render_field_errors(errors: &FieldErrors) -> String {
    let mut out = String::new();
    for name in errors.missing() {
        let _ = writeln!(out, "missing required field: {}", name);
    }
    out
}

/// The risk chart as an aligned table, for auditing against the printed chart.
pub fn render_chart() -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<18} {:<16} {:<28} {:>5} {:>7}",
        "wave", "water_temp", "crew", "blue", "yellow"
    );
    for entry in RISK_CHART {
        let _ = writeln!(
            out,
            "{:<18} {:<16} {:<28} {:>5} {:>7}",
            entry.wave.key(),
            entry.water_temp.key(),
            entry.crew.key(),
            format!("0-{}", entry.band.blue_max),
            format!("{}-{}", entry.band.blue_max + 1, entry.band.yellow_max),
        );
    }
    out
}

/// Names of the fields, for help text.
pub fn field_list() -> String {
    FieldName::ALL.map(FieldName::as_str).join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::evaluate;
    use crate::model::{Fog, Observation, Thunder, WaterTemp, Wave};

    #[test]
    fn test_override_headline() {
        let result = evaluate(&Observation {
            wind_speed: 0,
            water_temp: WaterTemp::Below15,
            wave: Wave::Calm,
            fog: Fog::None,
            thunder: Thunder::AudibleOrWarning,
        });
        let text = render_result(&result);
        assert!(text.starts_with("LAUNCH PROHIBITED: thunder"), "got: {}", text);
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_chart_has_a_line_per_row() {
        assert_eq!(render_chart().lines().count(), RISK_CHART.len() + 1);
    }

    #[test]
    fn test_chart_names_crews_by_key() {
        let chart = render_chart();
        assert!(chart.contains("no_experienced_rower"), "got: {}", chart);
        assert!(chart.contains("more_than_half_experienced"), "got: {}", chart);
        assert!(!chart.contains("NoExperiencedRower"), "got: {}", chart);
    }

    #[test]
    fn test_field_errors_list_each_missing_field() {
        let errors = FieldErrors {
            wave: true,
            thunder: true,
            ..FieldErrors::default()
        };
        let text = render_field_errors(&errors);
        assert!(text.contains("wave"));
        assert!(text.contains("thunder"));
        assert_eq!(text.lines().count(), 2);
    }
}
