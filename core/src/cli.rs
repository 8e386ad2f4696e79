use std::fmt::Write;

use crate::types::{Anomaly, LoadSummary, ParsedActivity};

fn opt<T: std::fmt::Display>(v: &Option<T>) -> String {
    v.as_ref().map_or_else(|| "–".to_string(), |x| x.to_string())
}

pub fn render_activity_report(a: &ParsedActivity) -> String {
    let mut out = String::new();
    // write! til String feiler ikke
    let _ = writeln!(out, "--- {} ---", a.title);
    let _ = writeln!(out, "Type:       {}", a.activity_type.as_str());
    let _ = writeln!(out, "Start:      {}", a.start_time.to_rfc3339());
    let _ = writeln!(out, "Varighet:   {} s", a.duration_seconds);
    let _ = writeln!(out, "Distanse:   {:.2} km", a.distance_km);
    let _ = writeln!(out, "Høydemeter: {:.2} m", a.elevation_gain_m);
    let _ = writeln!(out, "Snittfart:  {} km/t", opt(&a.avg_speed_kmh));
    let _ = writeln!(out, "Tempo:      {} /km", opt(&a.avg_pace_min_per_km));
    let _ = writeln!(
        out,
        "Puls:       snitt {} / maks {}",
        opt(&a.avg_heart_rate),
        opt(&a.max_heart_rate)
    );
    out
}

pub fn render_load_report(summary: &LoadSummary, anomalies: &[Anomaly]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Belastning ---");
    let _ = writeln!(out, "ACWR:     {:.2} ({})", summary.acwr, summary.risk.as_str());
    let _ = writeln!(out, "Monotoni: {:.2}", summary.monotony);
    let _ = writeln!(out, "Strain:   {:.0}", summary.strain);
    if anomalies.is_empty() {
        let _ = writeln!(out, "Ingen funn.");
    }
    for a in anomalies {
        let _ = writeln!(out, "[{}] {}", a.severity.as_str(), a.message);
    }
    out
}
