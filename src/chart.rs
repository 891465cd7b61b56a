//! Risk chart for launch decisions.
//!
//! Defines the fixed wind-speed bands from the published rowing risk chart,
//! keyed by wave state, water temperature band and crew category. This is
//! the single source of truth for thresholds. Nothing else in the crate
//! should hardcode a wind speed.
//!
//! Bands are inclusive on their upper bound:
//!   blue   = 0 ..= blue_max
//!   yellow = blue_max + 1 ..= yellow_max
//!   red    = anything above yellow_max

use crate::model::{CrewCategory, RiskLevel, WaterTemp, Wave};

// ---------------------------------------------------------------------------
// Chart rows
// ---------------------------------------------------------------------------

/// Upper wind-speed bounds (m/s, whole numbers) for one chart cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindBand {
    pub blue_max: i64,
    pub yellow_max: i64,
}

impl WindBand {
    /// Colour for a floored wind speed.
    ///
    /// Negative speeds fall outside every band and are RED.
    pub fn classify(&self, wind_speed: i64) -> RiskLevel {
        if wind_speed < 0 {
            RiskLevel::Red
        } else if wind_speed <= self.blue_max {
            RiskLevel::Blue
        } else if wind_speed <= self.yellow_max {
            RiskLevel::Yellow
        } else {
            RiskLevel::Red
        }
    }
}

/// One row of the risk chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartEntry {
    pub wave: Wave,
    pub water_temp: WaterTemp,
    pub crew: CrewCategory,
    pub band: WindBand,
}

const fn row(
    wave: Wave,
    water_temp: WaterTemp,
    crew: CrewCategory,
    blue_max: i64,
    yellow_max: i64,
) -> ChartEntry {
    ChartEntry {
        wave,
        water_temp,
        crew,
        band: WindBand {
            blue_max,
            yellow_max,
        },
    }
}

const NONE: CrewCategory = CrewCategory::NoExperiencedRower;
const HALF: CrewCategory = CrewCategory::HalfOrFewerExperienced;
const MOST: CrewCategory = CrewCategory::MoreThanHalfExperienced;
const COLD: WaterTemp = WaterTemp::Below15;
const WARM: WaterTemp = WaterTemp::AtOrAbove15;

/// Every tabulated cell. Whitecaps everywhere has no rows: it is always an
/// override and never reaches the chart.
#[rustfmt::skip]
pub static RISK_CHART: &[ChartEntry] = &[
    // wave                  temp  crew  blue yellow
    row(Wave::Calm,           COLD, NONE, 2, 4),
    row(Wave::Calm,           COLD, HALF, 3, 4),
    row(Wave::Calm,           COLD, MOST, 4, 7),
    row(Wave::Calm,           WARM, NONE, 3, 5),
    row(Wave::Calm,           WARM, HALF, 4, 5),
    row(Wave::Calm,           WARM, MOST, 5, 7),
    row(Wave::WaveNoWhitecap, COLD, NONE, 1, 4),
    row(Wave::WaveNoWhitecap, COLD, HALF, 3, 4),
    row(Wave::WaveNoWhitecap, COLD, MOST, 3, 5),
    row(Wave::WaveNoWhitecap, WARM, NONE, 2, 4),
    row(Wave::WaveNoWhitecap, WARM, HALF, 3, 4),
    row(Wave::WaveNoWhitecap, WARM, MOST, 4, 5),
];

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Looks up the band for a chart cell. Returns `None` for cells the chart
/// does not define.
pub fn find_band(wave: Wave, water_temp: WaterTemp, crew: CrewCategory) -> Option<WindBand> {
    RISK_CHART
        .iter()
        .find(|e| e.wave == wave && e.water_temp == water_temp && e.crew == crew)
        .map(|e| e.band)
}

/// Risk colour for one crew under the given conditions.
///
/// Cells missing from the chart fall back to RED.
pub fn lookup(
    wave: Wave,
    water_temp: WaterTemp,
    crew: CrewCategory,
    wind_speed: i64,
) -> RiskLevel {
    match find_band(wave, water_temp, crew) {
        Some(band) => band.classify(wind_speed),
        None => RiskLevel::Red,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
