//! Launch decision scenarios, exercised through the public API the way a
//! form or front end would drive it: raw fields in, per-crew verdicts out.

use rowing_safety::{
    CrewCategory, EvaluationResult, FieldName, Fog, InputError, Observation, RawObservation,
    Thunder, Verdict, WaterTemp, Wave, assess, evaluate, validate,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn observation(wind_speed: i64, water_temp: WaterTemp, wave: Wave) -> Observation {
    Observation {
        wind_speed,
        water_temp,
        wave,
        fog: Fog::None,
        thunder: Thunder::None,
    }
}

fn raw(wind: &str, temp: &str, wave: &str, fog: &str, thunder: &str) -> RawObservation {
    RawObservation {
        wind_speed: Some(wind.to_string()),
        water_temp: Some(temp.to_string()),
        wave: Some(wave.to_string()),
        fog: Some(fog.to_string()),
        thunder: Some(thunder.to_string()),
    }
}

fn verdicts(result: &EvaluationResult) -> Vec<Verdict> {
    result.crews.iter().map(|c| c.verdict).collect()
}

fn all_observations() -> Vec<Observation> {
    let mut out = Vec::new();
    for wind_speed in 0..=10 {
        for water_temp in [WaterTemp::Below15, WaterTemp::AtOrAbove15] {
            for wave in [Wave::Calm, Wave::WaveNoWhitecap, Wave::WhitecapEverywhere] {
                for fog in [Fog::None, Fog::FogIslandVisible, Fog::FogIslandNotVisible] {
                    for thunder in [Thunder::None, Thunder::AudibleOrWarning] {
                        out.push(Observation {
                            wind_speed,
                            water_temp,
                            wave,
                            fog,
                            thunder,
                        });
                    }
                }
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Result shape
// ---------------------------------------------------------------------------

#[test]
fn test_every_result_has_three_crews_in_order() {
    for obs in all_observations() {
        let result = evaluate(&obs);
        let crews: Vec<CrewCategory> = result.crews.iter().map(|c| c.crew).collect();
        assert_eq!(crews, CrewCategory::ALL.to_vec(), "crew order for {:?}", obs);
    }
}

#[test]
fn test_prohibited_flag_implies_reason_and_all_prohibited() {
    for obs in all_observations() {
        let result = evaluate(&obs);
        if result.prohibited {
            assert!(
                result.reason.as_deref().is_some_and(|r| !r.is_empty()),
                "override without reason for {:?}",
                obs
            );
            assert_eq!(verdicts(&result), vec![Verdict::Prohibited; 3]);
        } else {
            assert_eq!(result.reason, None, "reason without override for {:?}", obs);
        }
    }
}

#[test]
fn test_evaluation_is_idempotent() {
    for obs in all_observations() {
        assert_eq!(evaluate(&obs), evaluate(&obs));
    }
}

#[test]
fn test_messages_match_verdicts() {
    for obs in all_observations() {
        for crew in evaluate(&obs).crews {
            assert_eq!(crew.message, crew.verdict.message());
        }
    }
}

// ---------------------------------------------------------------------------
// Overrides
// ---------------------------------------------------------------------------

#[test]
fn test_thunder_prohibits_regardless_of_other_fields() {
    for obs in all_observations() {
        let obs = Observation {
            thunder: Thunder::AudibleOrWarning,
            ..obs
        };
        let result = evaluate(&obs);
        assert!(result.prohibited);
        assert_eq!(
            result.reason.as_deref(),
            Some("thunder audible or thunder advisory in effect")
        );
    }
}

#[test]
fn test_fog_hiding_island_beats_calm_windless_water() {
    let obs = Observation {
        fog: Fog::FogIslandNotVisible,
        ..observation(0, WaterTemp::AtOrAbove15, Wave::Calm)
    };
    let result = evaluate(&obs);
    assert!(result.prohibited);
    assert_eq!(
        result.reason.as_deref(),
        Some("fog present, reference landmark not visible")
    );
}

#[test]
fn test_whitecaps_prohibit_even_without_wind() {
    let result = evaluate(&observation(0, WaterTemp::AtOrAbove15, Wave::WhitecapEverywhere));
    assert!(result.prohibited);
    assert_eq!(result.reason.as_deref(), Some("whitecaps observed everywhere"));
}

#[test]
fn test_visible_island_fog_uses_chart() {
    let obs = Observation {
        fog: Fog::FogIslandVisible,
        ..observation(0, WaterTemp::AtOrAbove15, Wave::Calm)
    };
    let result = evaluate(&obs);
    assert!(!result.prohibited);
    assert_eq!(verdicts(&result), vec![Verdict::Allowed; 3]);
}

// ---------------------------------------------------------------------------
// Chart scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_calm_cold_novice_boundaries() {
    let at = |ws| evaluate(&observation(ws, WaterTemp::Below15, Wave::Calm)).crews[0].verdict;
    assert_eq!(at(2), Verdict::Allowed);
    assert_eq!(at(3), Verdict::Restricted);
    assert_eq!(at(5), Verdict::Prohibited);
}

#[test]
fn test_crews_are_judged_independently() {
    let result = evaluate(&observation(5, WaterTemp::Below15, Wave::Calm));
    assert!(!result.prohibited);
    assert_eq!(
        verdicts(&result),
        vec![Verdict::Prohibited, Verdict::Prohibited, Verdict::Restricted]
    );
}

#[test]
fn test_warm_water_with_waves_at_four() {
    let result = evaluate(&observation(4, WaterTemp::AtOrAbove15, Wave::WaveNoWhitecap));
    assert_eq!(
        verdicts(&result),
        vec![Verdict::Restricted, Verdict::Restricted, Verdict::Allowed]
    );
}

#[test]
fn test_verdicts_never_improve_as_wind_rises() {
    for water_temp in [WaterTemp::Below15, WaterTemp::AtOrAbove15] {
        for wave in [Wave::Calm, Wave::WaveNoWhitecap] {
            let mut previous = vec![Verdict::Allowed; 3];
            for ws in 0..=12 {
                let current = verdicts(&evaluate(&observation(ws, water_temp, wave)));
                for (p, c) in previous.iter().zip(&current) {
                    assert!(c >= p, "{:?}/{:?}: verdict improved at {} m/s", water_temp, wave, ws);
                }
                previous = current;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

#[test]
fn test_missing_field_blocks_evaluation() {
    let mut input = raw("3", "below_15", "calm", "none", "none");
    input.fog = Some(String::new());

    let validation = validate(&input);
    assert!(!validation.ok);
    assert!(validation.field_errors.fog);
    assert_eq!(assess(&input), Err(InputError::MissingFields(vec![FieldName::Fog])));
}

#[test]
fn test_decimal_wind_is_floored() {
    // 2.9 floors to 2: still blue for a novice crew in calm cold water.
    let result = assess(&raw("2.9", "below_15", "calm", "none", "none")).expect("should evaluate");
    assert_eq!(result.crews[0].verdict, Verdict::Allowed);
}

#[test]
fn test_non_numeric_wind_is_treated_as_calm() {
    let input = raw("gusty", "below_15", "calm", "none", "none");
    let result = assess(&input).expect("should evaluate");
    assert_eq!(verdicts(&result), vec![Verdict::Allowed; 3]);
}

#[test]
fn test_unknown_option_is_rejected_before_evaluation() {
    let err = assess(&raw("1", "lukewarm", "calm", "none", "none")).unwrap_err();
    assert!(matches!(
        err,
        InputError::UnrecognizedOption { field: FieldName::WaterTemp, .. }
    ));
}

#[test]
fn test_result_serializes_for_front_ends() {
    let result = evaluate(&observation(3, WaterTemp::Below15, Wave::Calm));
    let json = serde_json::to_value(&result).expect("result should serialize");
    assert_eq!(json["prohibited"], false);
    assert!(json.get("reason").is_none());
    assert_eq!(json["crews"][0]["crew"], "no_experienced_rower");
    assert_eq!(json["crews"][0]["verdict"], "restricted");
}
