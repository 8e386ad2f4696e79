pub mod activity;
pub mod anomaly;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod load;
pub mod rolling;
pub mod storage;
pub mod telemetry;
pub mod track;
pub mod types;
pub mod weekly;

#[cfg(feature = "python")]
mod py;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use activity::{classify_activity, parse_activity, parse_activity_at};
pub use anomaly::detect_anomalies;
pub use config::EngineConfig;
pub use error::{EngineError, ParseError};
pub use geometry::{
    elevation_gain_batch, elevation_gain_smoothed, haversine_km, recalculate_elevation_gain,
    RoundTo,
};
pub use load::{calculate_session_rpe, calculate_training_metrics, calculate_trimp};
pub use rolling::{calculate_acwr, calculate_monotony, calculate_strain, summarize_load};
pub use storage::{load_config, save_config};
pub use track::{parse_track, parse_track_points};
pub use types::*;
pub use weekly::weekly_loads;

// ──────────────────────────────────────────────────────────────────────────────
// JSON-innganger (brukes av Python-broen og trackreport)
// ──────────────────────────────────────────────────────────────────────────────

fn from_json<'de, T: Deserialize<'de>>(txt: &'de str) -> Result<T, EngineError> {
    let mut de = serde_json::Deserializer::from_str(txt);
    serde_path_to_error::deserialize(&mut de).map_err(EngineError::from_path_error)
}

fn resolve_cfg(cfg_json: Option<&str>) -> Result<EngineConfig, EngineError> {
    match cfg_json {
        Some(txt) if !txt.trim().is_empty() => EngineConfig::from_json_str(txt),
        _ => Ok(EngineConfig::default()),
    }
}

/// Rå sporlogg → ParsedActivity som JSON.
pub fn parse_activity_json(raw: &str, cfg_json: Option<&str>) -> Result<String, EngineError> {
    let cfg = resolve_cfg(cfg_json)?;
    let parsed = parse_activity(raw, &cfg);
    telemetry::record_parse(parsed.is_ok());
    Ok(serde_json::to_string(&parsed?)?)
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ElevationRecalculation {
    pub elevation_gain_m: f64,
}

/// Retroaktiv høydekorrigering av en lagret sporlogg (rå høyde, batch-terskel fra config).
pub fn recalculate_elevation_json(
    raw: &str,
    cfg_json: Option<&str>,
) -> Result<String, EngineError> {
    let cfg = resolve_cfg(cfg_json)?;
    let points = parse_track_points(raw)?;
    let elevation_gain_m = recalculate_elevation_gain(&points, &cfg.elevation).round_to(2);
    Ok(serde_json::to_string(&ElevationRecalculation { elevation_gain_m })?)
}

/// `SessionInput` (JSON) → `TrainingMetrics` (JSON).
pub fn session_metrics_json(
    input_json: &str,
    cfg_json: Option<&str>,
) -> Result<String, EngineError> {
    let cfg = resolve_cfg(cfg_json)?;
    let input: SessionInput = from_json(input_json)?;
    let metrics = calculate_training_metrics(&input, &cfg.physiology);
    Ok(serde_json::to_string(&metrics)?)
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrainingLoadRequest {
    pub weeks: Vec<WeeklyLoad>,
    #[serde(default)]
    pub recent_activities: Option<Vec<RecentActivity>>,
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingLoadReport {
    #[serde(flatten)]
    pub summary: LoadSummary,
    pub anomalies: Vec<Anomaly>,
}

/// Hele analyse-stegen: uke-historikk (+ nylige økter) → tall og funn.
pub fn analyze_training_load(req: &TrainingLoadRequest, cfg: &EngineConfig) -> TrainingLoadReport {
    let summary = summarize_load(&req.weeks);
    let as_of = req.as_of.unwrap_or_else(Utc::now);
    let recent = req.recent_activities.as_deref();
    let anomalies = detect_anomalies(&summary, recent, as_of, &cfg.anomalies);
    TrainingLoadReport { summary, anomalies }
}

/// `{weeks, recent_activities?, as_of?}` → `{acwr, risk, monotony, strain, anomalies}`.
pub fn training_load_json(input_json: &str, cfg_json: Option<&str>) -> Result<String, EngineError> {
    let cfg = resolve_cfg(cfg_json)?;
    let req: TrainingLoadRequest = from_json(input_json)?;
    let report = analyze_training_load(&req, &cfg);
    telemetry::record_anomalies(&report.anomalies);
    Ok(serde_json::to_string(&report)?)
}
