use std::collections::BTreeMap;

use chrono::Datelike;

use crate::types::{SessionLoad, WeeklyLoad};

/// "2024-W07"
pub fn iso_week_label(year: i32, week: u32) -> String {
    format!("{year}-W{week:02}")
}

/// Grupperer økter per ISO-uke og summerer kombinert last, nyeste uke først.
/// Kun uker med økter tas med.
pub fn weekly_loads(sessions: &[SessionLoad]) -> Vec<WeeklyLoad> {
    let mut buckets: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for s in sessions {
        if !s.combined_load.is_finite() {
            log::warn!("hopper over økt {} med ugyldig last {}", s.date, s.combined_load);
            continue;
        }
        let iso = s.date.iso_week();
        *buckets.entry((iso.year(), iso.week())).or_insert(0.0) += s.combined_load;
    }

    buckets
        .into_iter()
        .rev()
        .map(|((year, week), load)| WeeklyLoad::new(iso_week_label(year, week), load))
        .collect()
}
