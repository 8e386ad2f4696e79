// core/tests/test_training_load.rs
use chrono::{Duration, TimeZone, Utc};
use serde::Deserialize;

use trainload_core::config::AnomalyThresholds;
use trainload_core::{
    calculate_acwr, calculate_monotony, calculate_strain, calculate_training_metrics,
    calculate_trimp, detect_anomalies, summarize_load, weekly_loads, AnomalyKind, EngineConfig,
    RecentActivity, RiskLevel, SessionInput, SessionLoad, Severity, WeeklyLoad,
};

#[derive(Debug, Deserialize)]
struct Row {
    week_label: String,
    combined_load: f64,
}

fn fixture_weeks() -> Vec<WeeklyLoad> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/weekly_loads.csv");
    let mut rdr = csv::Reader::from_path(path).expect("fixture finnes");
    rdr.deserialize::<Row>()
        .map(|r| {
            let r = r.expect("gyldig rad");
            WeeklyLoad::new(r.week_label, r.combined_load)
        })
        .collect()
}

fn weeks(xs: &[f64]) -> Vec<WeeklyLoad> {
    xs.iter().enumerate().map(|(i, x)| WeeklyLoad::new(format!("uke {i}"), *x)).collect()
}

#[test]
fn trimp_zero_guards() {
    let d = EngineConfig::default().physiology;
    assert_eq!(calculate_trimp(0.0, Some(150), None, None, &d), 0.0);
    assert_eq!(calculate_trimp(60.0, Some(0), None, None, &d), 0.0);
}

#[test]
fn acwr_reference_cases() {
    let steady = calculate_acwr(&weeks(&[100.0, 100.0, 100.0, 100.0]));
    assert_eq!(steady.acwr, 1.0);
    assert_eq!(steady.risk, RiskLevel::Optimal);

    let spike = calculate_acwr(&weeks(&[200.0, 100.0, 100.0, 100.0]));
    assert_eq!(spike.risk, RiskLevel::VeryHigh);
    assert!(spike.acwr > 1.5);
}

#[test]
fn monotony_and_strain_need_four_weeks() {
    for xs in [&[][..], &[300.0][..], &[300.0, 10.0, 990.0][..]] {
        let w = weeks(xs);
        assert_eq!(calculate_monotony(&w), 0.0);
        assert_eq!(calculate_strain(&w), 0.0);
    }
}

#[test]
fn csv_history_produces_expected_findings() {
    let w = fixture_weeks();
    assert_eq!(w.len(), 6);
    assert_eq!(w[0].week_label, "2024-W24");

    let s = summarize_load(&w);
    // 980 / mean(980, 610, 640, 590) ≈ 1.39
    assert!((s.acwr - 980.0 / 705.0).abs() < 1e-9);
    assert_eq!(s.risk, RiskLevel::High);
    assert!(s.monotony > 2.0);
    assert!(s.strain > 6000.0);

    let as_of = Utc.with_ymd_and_hms(2024, 6, 16, 20, 0, 0).unwrap();
    let found = detect_anomalies(&s, None, as_of, &AnomalyThresholds::default());
    let kinds: Vec<_> = found.iter().map(|a| (a.kind, a.severity)).collect();
    assert_eq!(
        kinds,
        vec![
            (AnomalyKind::AcwrHigh, Severity::Warning),
            (AnomalyKind::HighMonotony, Severity::Danger),
            (AnomalyKind::HighStrain, Severity::Danger),
        ]
    );
    assert!(found[0].message.contains("1.39"));
}

#[test]
fn sessions_to_findings_pipeline() {
    let d = EngineConfig::default().physiology;
    let t0 = Utc.with_ymd_and_hms(2024, 5, 6, 7, 0, 0).unwrap(); // mandag

    // 5 uker, tre økter per uke, siste uke mye tyngre
    let mut sessions = Vec::new();
    for week in 0..5i64 {
        for day in [0i64, 2, 4] {
            let heavy = week == 4;
            let input = SessionInput {
                duration_min: if heavy { 120.0 } else { 45.0 },
                avg_heart_rate: Some(if heavy { 172 } else { 140 }),
                perceived_exertion: Some(if heavy { 9.0 } else { 5.0 }),
                ..Default::default()
            };
            let m = calculate_training_metrics(&input, &d);
            sessions.push(SessionLoad {
                date: t0 + Duration::days(week * 7 + day),
                combined_load: m.combined_load,
            });
        }
    }

    let w = weekly_loads(&sessions);
    assert_eq!(w.len(), 5);
    assert!(w[0].combined_load > w[1].combined_load);

    let s = summarize_load(&w);
    assert_eq!(s.risk, RiskLevel::VeryHigh);

    let recent: Vec<RecentActivity> = (0..3)
        .map(|i| RecentActivity {
            date: t0 + Duration::days(28 + i * 2),
            avg_heart_rate: Some(172),
        })
        .collect();
    let as_of = t0 + Duration::days(33);
    let found = detect_anomalies(&s, Some(recent.as_slice()), as_of, &AnomalyThresholds::default());

    assert_eq!(found[0].kind, AnomalyKind::AcwrVeryHigh);
    assert!(found.iter().any(|a| a.kind == AnomalyKind::RecurringHighHeartRate));
    assert!(!found.iter().any(|a| a.kind == AnomalyKind::Inactivity));
}

#[test]
fn new_athlete_gets_no_load_findings() {
    let s = summarize_load(&weeks(&[400.0, 120.0]));
    assert_eq!(s.acwr, 0.0);
    assert_eq!(s.risk, RiskLevel::Optimal);
    let found = detect_anomalies(&s, None, Utc::now(), &AnomalyThresholds::default());
    assert!(found.is_empty());
}
