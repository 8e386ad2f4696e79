use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Fysiologiske standardverdier når utøveren ikke har oppgitt egne.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysiologyDefaults {
    pub max_hr: u32,
    pub resting_hr: u32,
    pub default_rpe: f64,
}

impl Default for PhysiologyDefaults {
    fn default() -> Self {
        Self { max_hr: 190, resting_hr: 60, default_rpe: 5.0 }
    }
}

/// Høydeglatting ved innlesing (window/threshold) og batch-terskel for retroaktiv korrigering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevationTuning {
    pub smoothing_window: usize,
    pub noise_threshold_m: f64,
    pub batch_threshold_m: f64,
}

impl Default for ElevationTuning {
    fn default() -> Self {
        Self { smoothing_window: 3, noise_threshold_m: 0.3, batch_threshold_m: 3.0 }
    }
}

/// Fartsgrenser (km/t) for grov klassifisering av aktivitetstype.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationThresholds {
    pub cycling_above_kmh: f64,
    pub walking_below_kmh: f64,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self { cycling_above_kmh: 20.0, walking_below_kmh: 8.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyThresholds {
    pub monotony_warning: f64,
    pub monotony_danger: f64,
    pub strain_danger: f64,
    pub inactivity_days: i64,
    pub high_hr_bpm: u32,
    pub high_hr_occurrences: usize,
}

impl Default for AnomalyThresholds {
    fn default() -> Self {
        Self {
            monotony_warning: 1.5,
            monotony_danger: 2.0,
            strain_danger: 6000.0,
            inactivity_days: 7,
            high_hr_bpm: 170,
            high_hr_occurrences: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub physiology: PhysiologyDefaults,
    pub elevation: ElevationTuning,
    pub classification: ClassificationThresholds,
    pub anomalies: AnomalyThresholds,
}

/// Gyldig inaktivitetsgrense i dager (opptil ti år).
pub const INACTIVITY_DAYS_RANGE: std::ops::RangeInclusive<i64> = 1..=3650;

impl EngineConfig {
    /// Tolerant JSON-inngang: manglende seksjoner/felt faller tilbake til standard.
    pub fn from_json_str(txt: &str) -> Result<Self, EngineError> {
        let mut de = serde_json::Deserializer::from_str(txt);
        let cfg: EngineConfig =
            serde_path_to_error::deserialize(&mut de).map_err(EngineError::from_path_error)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.elevation.smoothing_window == 0 {
            return Err(EngineError::Config("elevation.smoothing_window must be >= 1".into()));
        }
        if self.physiology.max_hr <= self.physiology.resting_hr {
            return Err(EngineError::Config(format!(
                "physiology.max_hr ({}) must exceed resting_hr ({})",
                self.physiology.max_hr, self.physiology.resting_hr
            )));
        }
        if self.anomalies.monotony_warning > self.anomalies.monotony_danger {
            return Err(EngineError::Config(
                "anomalies.monotony_warning must not exceed monotony_danger".into(),
            ));
        }
        if !INACTIVITY_DAYS_RANGE.contains(&self.anomalies.inactivity_days) {
            return Err(EngineError::Config(format!(
                "anomalies.inactivity_days ({}) must be within {}..={}",
                self.anomalies.inactivity_days,
                INACTIVITY_DAYS_RANGE.start(),
                INACTIVITY_DAYS_RANGE.end()
            )));
        }
        Ok(())
    }
}
