use chrono::{DateTime, Utc};

use crate::config::{ClassificationThresholds, EngineConfig};
use crate::error::ParseError;
use crate::geometry::{duration_seconds, elevation_gain_smoothed, total_distance_km, RoundTo};
use crate::track::parse_track;
use crate::types::{ActivityType, ParsedActivity, Track, TrackPoint};

/// Grov klassifisering på snittfart. Ingen fart (null varighet) → løping.
pub fn classify_activity(avg_speed_kmh: Option<f64>, t: &ClassificationThresholds) -> ActivityType {
    match avg_speed_kmh {
        Some(v) if v > t.cycling_above_kmh => ActivityType::Cycling,
        Some(v) if v < t.walking_below_kmh => ActivityType::Walking,
        _ => ActivityType::Running,
    }
}

/// Snitt (avrundet) og maks av tilstedeværende pulsverdier; begge None uten data.
pub fn heart_rate_summary(points: &[TrackPoint]) -> (Option<u32>, Option<u32>) {
    let mut sum = 0u64;
    let mut cnt = 0u64;
    let mut max: Option<u32> = None;
    for hr in points.iter().filter_map(|p| p.heart_rate) {
        sum += u64::from(hr);
        cnt += 1;
        max = Some(max.map_or(hr, |m| m.max(hr)));
    }
    if cnt == 0 {
        return (None, None);
    }
    let avg = (sum as f64 / cnt as f64).round() as u32;
    (Some(avg), max)
}

/// km/t; kun definert når varighet > 0.
pub fn average_speed_kmh(distance_km: f64, duration_s: u64) -> Option<f64> {
    if duration_s == 0 {
        return None;
    }
    Some(distance_km / (duration_s as f64 / 3600.0))
}

/// "M:SS" per km; kun definert når distanse > 0 og varighet > 0.
pub fn format_pace(distance_km: f64, duration_s: u64) -> Option<String> {
    if distance_km <= 0.0 || duration_s == 0 {
        return None;
    }
    let pace_min = (duration_s as f64 / 60.0) / distance_km;
    let mut minutes = pace_min.floor() as u64;
    let mut seconds = ((pace_min - minutes as f64) * 60.0).round() as u64;
    if seconds == 60 {
        minutes += 1;
        seconds = 0;
    }
    Some(format!("{minutes}:{seconds:02}"))
}

fn synthesized_title(kind: ActivityType) -> String {
    format!("{} Activity", kind.display_name())
}

/// Bygger ParsedActivity fra et allerede parset spor.
pub fn activity_from_track(
    track: &Track,
    fallback_start: DateTime<Utc>,
    cfg: &EngineConfig,
) -> ParsedActivity {
    let points = &track.points;

    // Avrund ved grensen; fart/tempo avledes fra rapportert (avrundet) distanse
    let distance_km = total_distance_km(points).round_to(2);
    let elevation_gain_m = elevation_gain_smoothed(
        points,
        cfg.elevation.smoothing_window,
        cfg.elevation.noise_threshold_m,
    )
    .round_to(2);
    let duration_seconds = duration_seconds(points);

    let (avg_heart_rate, max_heart_rate) = heart_rate_summary(points);
    let avg_speed_kmh = average_speed_kmh(distance_km, duration_seconds).map(|v| v.round_to(2));
    let avg_pace_min_per_km = format_pace(distance_km, duration_seconds);
    let activity_type = classify_activity(avg_speed_kmh, &cfg.classification);

    let start_time = points
        .iter()
        .find_map(|p| p.timestamp)
        .unwrap_or(fallback_start);

    let (title, title_synthesized) = match track.name.as_deref() {
        Some(name) if !name.trim().is_empty() => (name.trim().to_string(), false),
        _ => (synthesized_title(activity_type), true),
    };

    log::debug!(
        "activity: {} pkt, {distance_km} km, {elevation_gain_m} m+, {duration_seconds} s, type={}",
        points.len(),
        activity_type.as_str()
    );

    ParsedActivity {
        activity_type,
        title,
        start_time,
        duration_seconds,
        distance_km,
        elevation_gain_m,
        avg_heart_rate,
        max_heart_rate,
        avg_pace_min_per_km,
        avg_speed_kmh,
        calories: None,
        title_synthesized,
    }
}

/// Rå sporlogg → ParsedActivity. `fallback_start` brukes når ingen punkter har tid.
pub fn parse_activity_at(
    raw: &str,
    fallback_start: DateTime<Utc>,
    cfg: &EngineConfig,
) -> Result<ParsedActivity, ParseError> {
    let track = parse_track(raw)?;
    Ok(activity_from_track(&track, fallback_start, cfg))
}

/// Som `parse_activity_at`, med nåtid som reserve-starttid.
pub fn parse_activity(raw: &str, cfg: &EngineConfig) -> Result<ParsedActivity, ParseError> {
    parse_activity_at(raw, Utc::now(), cfg)
}

impl ParsedActivity {
    /// Overstyr heuristisk type. Syntetisert tittel følger med; eksplisitt navn beholdes.
    pub fn with_activity_type(mut self, kind: ActivityType) -> Self {
        self.activity_type = kind;
        if self.title_synthesized {
            self.title = synthesized_title(kind);
        }
        self
    }
}
