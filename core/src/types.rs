use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ett GPS-punkt fra sporloggen, i opptaksrekkefølge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,              // meter
    pub heart_rate: Option<u32>,             // bpm
    pub timestamp: Option<DateTime<Utc>>,
}

impl TrackPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude, elevation: None, heart_rate: None, timestamp: None }
    }
}

/// Rå-sporet slik parseren ser det: valgfritt navn + punkter.
#[derive(Debug, Clone, Default)]
pub struct Track {
    pub name: Option<String>,
    pub points: Vec<TrackPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Running,
    Cycling,
    Walking,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Running => "running",
            ActivityType::Cycling => "cycling",
            ActivityType::Walking => "walking",
        }
    }

    /// "Running" / "Cycling" / "Walking" – brukes i syntetiserte titler.
    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityType::Running => "Running",
            ActivityType::Cycling => "Cycling",
            ActivityType::Walking => "Walking",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedActivity {
    pub activity_type: ActivityType,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub duration_seconds: u64,
    pub distance_km: f64,
    pub elevation_gain_m: f64,
    pub avg_heart_rate: Option<u32>,
    pub max_heart_rate: Option<u32>,
    /// "M:SS" per km
    pub avg_pace_min_per_km: Option<String>,
    pub avg_speed_kmh: Option<f64>,
    pub calories: Option<u32>,
    /// true når tittelen ble laget av aktivitetstypen (ingen <name> i loggen)
    #[serde(skip)]
    pub title_synthesized: bool,
}

/// Økt-input fra økt/feedback-delsystemet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionInput {
    pub duration_min: f64,
    #[serde(default)]
    pub avg_heart_rate: Option<u32>,
    #[serde(default)]
    pub max_heart_rate: Option<u32>,
    #[serde(default)]
    pub resting_heart_rate: Option<u32>,
    /// Opplevd anstrengelse 1–10
    #[serde(default, alias = "rpe")]
    pub perceived_exertion: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrainingMetrics {
    pub trimp: f64,
    pub session_rpe: f64,
    pub combined_load: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyLoad {
    pub week_label: String,
    pub combined_load: f64,
}

impl WeeklyLoad {
    pub fn new(week_label: impl Into<String>, combined_load: f64) -> Self {
        Self { week_label: week_label.into(), combined_load }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[default]
    Optimal,
    Low,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Optimal => "optimal",
            RiskLevel::Low => "low",
            RiskLevel::High => "high",
            RiskLevel::VeryHigh => "very_high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AcwrResult {
    pub acwr: f64,
    pub risk: RiskLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadSummary {
    pub acwr: f64,
    pub risk: RiskLevel,
    pub monotony: f64,
    pub strain: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    AcwrVeryHigh,
    AcwrHigh,
    AcwrLow,
    HighMonotony,
    HighStrain,
    Inactivity,
    RecurringHighHeartRate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<String>,
}

/// Nylig aktivitet for inaktivitet/høy-puls-sjekkene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentActivity {
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub avg_heart_rate: Option<u32>,
}

/// Én fullført økt med ferdig beregnet kombinert last (til ukesbøtting).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLoad {
    pub date: DateTime<Utc>,
    pub combined_load: f64,
}
