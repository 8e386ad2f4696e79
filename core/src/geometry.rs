use std::collections::VecDeque;

use crate::config::ElevationTuning;
use crate::types::TrackPoint;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

// --- RoundTo trait (offentlig, brukt av activity.rs og lib.rs) ---
pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        if dp == 0 { return self.round(); }
        let factor = 10_f64.powi(dp as i32);
        (self * factor).round() / factor
    }
}

/// Storsirkel-avstand (haversine) i km.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // clamp: avrunding kan gi a litt over 1 for antipodiske punkter
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Sum over påfølgende punktpar; første punkt bidrar ikke.
pub fn total_distance_km(points: &[TrackPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| haversine_km(w[0].latitude, w[0].longitude, w[1].latitude, w[1].longitude))
        .sum()
}

/// Høydemeter ved innlesing: etterslepende glidende snitt (vindu `window`) over rå
/// høyde, og kun positive endringer i glattet høyde > `threshold_m` telles.
/// Endringer ≤ terskel forkastes helt (ikke akkumulert videre).
pub fn elevation_gain_smoothed(points: &[TrackPoint], window: usize, threshold_m: f64) -> f64 {
    let window = window.max(1);
    let mut buf: VecDeque<f64> = VecDeque::with_capacity(window);
    let mut prev_smoothed: Option<f64> = None;
    let mut gain = 0.0;

    for ele in points.iter().filter_map(|p| p.elevation) {
        if buf.len() == window {
            buf.pop_front();
        }
        buf.push_back(ele);
        let smoothed = buf.iter().sum::<f64>() / buf.len() as f64;

        if let Some(prev) = prev_smoothed {
            let delta = smoothed - prev;
            if delta > threshold_m {
                gain += delta;
            }
        }
        prev_smoothed = Some(smoothed);
    }

    gain
}

/// Retroaktiv korrigering (batch): uglattet, summerer rå positive endringer mellom
/// påfølgende høydeverdier som er strengt større enn `threshold_m`.
/// Bevisst et eget verktøy – skal ikke slås sammen med `elevation_gain_smoothed`.
pub fn elevation_gain_batch(elevations: &[f64], threshold_m: f64) -> f64 {
    elevations
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|d| *d > threshold_m)
        .sum()
}

/// Retroaktiv korrigering for et lagret spor med konfigurert batch-terskel.
/// Punkter uten høyde hoppes over.
pub fn recalculate_elevation_gain(points: &[TrackPoint], tuning: &ElevationTuning) -> f64 {
    let elevations: Vec<f64> = points.iter().filter_map(|p| p.elevation).collect();
    elevation_gain_batch(&elevations, tuning.batch_threshold_m)
}

/// Varighet i sekunder mellom første og siste punkt med tidsstempel.
pub fn duration_seconds(points: &[TrackPoint]) -> u64 {
    let mut stamps = points.iter().filter_map(|p| p.timestamp);
    let Some(first) = stamps.next() else { return 0 };
    let last = stamps.last().unwrap_or(first);
    (last - first).num_seconds().max(0) as u64
}
