use chrono::{DateTime, Utc};

use crate::config::AnomalyThresholds;
use crate::types::{Anomaly, AnomalyKind, LoadSummary, RecentActivity, RiskLevel, Severity};

fn finding(
    kind: AnomalyKind,
    severity: Severity,
    message: String,
    value: Option<String>,
) -> Anomaly {
    Anomaly { kind, severity, message, value, details: None }
}

fn acwr_finding(summary: &LoadSummary) -> Option<Anomaly> {
    let v = format!("{:.2}", summary.acwr);
    let (kind, severity, message) = match summary.risk {
        RiskLevel::VeryHigh => (
            AnomalyKind::AcwrVeryHigh,
            Severity::Danger,
            format!("ACWR {v} – very high injury risk, load is spiking above chronic base"),
        ),
        RiskLevel::High => (
            AnomalyKind::AcwrHigh,
            Severity::Warning,
            format!("ACWR {v} – elevated injury risk, consider holding load steady"),
        ),
        RiskLevel::Low => (
            AnomalyKind::AcwrLow,
            Severity::Info,
            format!("ACWR {v} – load below chronic base, possible deconditioning"),
        ),
        RiskLevel::Optimal => return None,
    };
    let mut a = finding(kind, severity, message, Some(v));
    a.details = Some("acute = latest week, chronic = mean of latest 4 weeks".to_string());
    Some(a)
}

fn monotony_finding(monotony: f64, t: &AnomalyThresholds) -> Option<Anomaly> {
    let severity = if monotony > t.monotony_danger {
        Severity::Danger
    } else if monotony > t.monotony_warning {
        Severity::Warning
    } else {
        return None;
    };
    let v = format!("{monotony:.2}");
    Some(finding(
        AnomalyKind::HighMonotony,
        severity,
        format!("Training monotony {v} – too little variation between weeks"),
        Some(v),
    ))
}

fn strain_finding(strain: f64, t: &AnomalyThresholds) -> Option<Anomaly> {
    if strain <= t.strain_danger {
        return None;
    }
    let v = format!("{strain:.0}");
    Some(finding(
        AnomalyKind::HighStrain,
        Severity::Danger,
        format!("Training strain {v} exceeds {:.0} – overtraining risk", t.strain_danger),
        Some(v),
    ))
}

fn inactivity_finding(
    recent: &[RecentActivity],
    as_of: DateTime<Utc>,
    t: &AnomalyThresholds,
) -> Option<Anomaly> {
    let latest = recent.iter().map(|a| a.date).max()?;
    // hele døgn, samme tall som rapporteres
    let days = (as_of - latest).num_days();
    if days <= t.inactivity_days {
        return None;
    }
    let mut a = finding(
        AnomalyKind::Inactivity,
        Severity::Warning,
        format!("No recent activity – last session {days} days ago"),
        Some(format!("{days} days")),
    );
    a.details = Some(format!("last activity {}", latest.format("%Y-%m-%d")));
    Some(a)
}

fn high_hr_finding(recent: &[RecentActivity], t: &AnomalyThresholds) -> Option<Anomaly> {
    let count = recent
        .iter()
        .filter(|a| a.avg_heart_rate.is_some_and(|hr| hr > t.high_hr_bpm))
        .count();
    if count < t.high_hr_occurrences {
        return None;
    }
    Some(finding(
        AnomalyKind::RecurringHighHeartRate,
        Severity::Info,
        format!(
            "Recurring high heart rate – {count} recent sessions averaged above {} bpm",
            t.high_hr_bpm
        ),
        Some(count.to_string()),
    ))
}

/// Oversetter aggregatorens tall (+ valgfri liste med nylige økter) til funn.
/// Hver sjekk vurderes uavhengig; rekkefølge: ACWR, monotoni, strain, inaktivitet, puls.
/// Feiler aldri – manglende input slår bare av tilhørende sjekk.
pub fn detect_anomalies(
    summary: &LoadSummary,
    recent: Option<&[RecentActivity]>,
    as_of: DateTime<Utc>,
    t: &AnomalyThresholds,
) -> Vec<Anomaly> {
    let mut out: Vec<Anomaly> = [
        acwr_finding(summary),
        monotony_finding(summary.monotony, t),
        strain_finding(summary.strain, t),
    ]
    .into_iter()
    .flatten()
    .collect();

    if let Some(recent) = recent {
        out.extend(inactivity_finding(recent, as_of, t));
        out.extend(high_hr_finding(recent, t));
    }

    log::debug!("detect_anomalies: {} funn", out.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn summary(acwr: f64, risk: RiskLevel, monotony: f64, strain: f64) -> LoadSummary {
        LoadSummary { acwr, risk, monotony, strain }
    }

    fn load_only(s: LoadSummary) -> Vec<Anomaly> {
        detect_anomalies(&s, None, now(), &AnomalyThresholds::default())
    }

    fn with_recent(recent: &[RecentActivity], t: &AnomalyThresholds) -> Vec<Anomaly> {
        detect_anomalies(&LoadSummary::default(), Some(recent), now(), t)
    }

    fn ago(d: Duration) -> RecentActivity {
        RecentActivity { date: now() - d, avg_heart_rate: None }
    }

    #[test]
    fn quiet_summary_has_no_findings() {
        assert!(load_only(summary(1.0, RiskLevel::Optimal, 1.2, 3000.0)).is_empty());
    }

    #[test]
    fn acwr_severity_mapping_embeds_value() {
        let out = load_only(summary(1.6, RiskLevel::VeryHigh, 0.0, 0.0));
        assert_eq!(out[0].kind, AnomalyKind::AcwrVeryHigh);
        assert_eq!(out[0].severity, Severity::Danger);
        assert!(out[0].message.contains("1.60"));

        let out = load_only(summary(1.35, RiskLevel::High, 0.0, 0.0));
        assert_eq!(out[0].severity, Severity::Warning);

        let out = load_only(summary(0.5, RiskLevel::Low, 0.0, 0.0));
        assert_eq!(out[0].severity, Severity::Info);
        assert_eq!(out[0].value.as_deref(), Some("0.50"));
    }

    #[test]
    fn monotony_bands() {
        let sev = |m| {
            load_only(summary(1.0, RiskLevel::Optimal, m, 0.0))
                .first()
                .map(|a| a.severity)
        };
        assert_eq!(sev(2.1), Some(Severity::Danger));
        assert_eq!(sev(2.0), Some(Severity::Warning));
        assert_eq!(sev(1.6), Some(Severity::Warning));
        assert_eq!(sev(1.5), None);
    }

    #[test]
    fn strain_over_threshold_is_danger() {
        assert!(load_only(summary(1.0, RiskLevel::Optimal, 0.0, 6000.0)).is_empty());
        let out = load_only(summary(1.0, RiskLevel::Optimal, 0.0, 6000.5));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, AnomalyKind::HighStrain);
        assert_eq!(out[0].severity, Severity::Danger);
    }

    #[test]
    fn inactivity_uses_latest_date_regardless_of_order() {
        let t = AnomalyThresholds::default();
        let out = with_recent(&[ago(Duration::days(20)), ago(Duration::days(9))], &t);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, AnomalyKind::Inactivity);
        assert_eq!(out[0].value.as_deref(), Some("9 days"));

        // nøyaktig 7 dager er ikke > 7
        assert!(with_recent(&[ago(Duration::days(7))], &t).is_empty());
    }

    #[test]
    fn inactivity_counts_whole_days_like_the_message() {
        let t = AnomalyThresholds::default();
        // 7 døgn og 5 timer er fortsatt «7 days ago»
        assert!(with_recent(&[ago(Duration::days(7) + Duration::hours(5))], &t).is_empty());

        let out = with_recent(&[ago(Duration::days(8) + Duration::hours(1))], &t);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].message, "No recent activity – last session 8 days ago");
    }

    #[test]
    fn huge_inactivity_threshold_does_not_panic() {
        let t = AnomalyThresholds { inactivity_days: i64::MAX, ..Default::default() };
        assert!(with_recent(&[ago(Duration::days(30))], &t).is_empty());
    }

    #[test]
    fn recurring_high_hr_needs_three() {
        let t = AnomalyThresholds::default();
        let mk = |hr| RecentActivity { date: now(), avg_heart_rate: Some(hr) };
        assert!(with_recent(&[mk(175), mk(180), mk(170), mk(120)], &t).is_empty());

        let out = with_recent(&[mk(175), mk(180), mk(171)], &t);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, AnomalyKind::RecurringHighHeartRate);
        assert_eq!(out[0].severity, Severity::Info);
    }

    #[test]
    fn empty_recent_list_suppresses_checks() {
        assert!(with_recent(&[], &AnomalyThresholds::default()).is_empty());
    }
}
