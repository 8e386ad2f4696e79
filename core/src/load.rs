use crate::config::PhysiologyDefaults;
use crate::types::{SessionInput, TrainingMetrics};

/// Intensitetsvekt – båndede terskler på pulsreserve-andelen f.
fn intensity_weight(f: f64) -> f64 {
    match f {
        f if f >= 0.85 => 2.5,
        f if f >= 0.70 => 2.0,
        f if f >= 0.50 => 1.5,
        _ => 1.0,
    }
}

/// TRIMP (Banister): duration × f × vekt, f = (snitt − hvile) / (maks − hvile).
/// Gir 0 uten puls, uten varighet eller når maks ≤ hvile.
pub fn calculate_trimp(
    duration_min: f64,
    avg_hr: Option<u32>,
    max_hr: Option<u32>,
    resting_hr: Option<u32>,
    defaults: &PhysiologyDefaults,
) -> f64 {
    let avg = match avg_hr {
        Some(hr) if hr > 0 => f64::from(hr),
        _ => return 0.0,
    };
    if !duration_min.is_finite() || duration_min <= 0.0 {
        return 0.0;
    }

    let max = f64::from(max_hr.filter(|m| *m > 0).unwrap_or(defaults.max_hr));
    let rest = f64::from(resting_hr.filter(|r| *r > 0).unwrap_or(defaults.resting_hr));
    if max <= rest {
        return 0.0;
    }

    // snitt under hvilepuls gir ingen negativ belastning
    let f = ((avg - rest) / (max - rest)).max(0.0);
    duration_min * f * intensity_weight(f)
}

/// Session-RPE (Foster): duration × RPE (1–10, standard fra `defaults`).
pub fn calculate_session_rpe(
    duration_min: f64,
    rpe: Option<f64>,
    defaults: &PhysiologyDefaults,
) -> f64 {
    if !duration_min.is_finite() || duration_min <= 0.0 {
        return 0.0;
    }
    let rpe = rpe
        .filter(|r| r.is_finite())
        .unwrap_or(defaults.default_rpe)
        .clamp(1.0, 10.0);
    duration_min * rpe
}

/// TRIMP, sRPE og kombinert last (snittet av de to) for én fullført økt.
pub fn calculate_training_metrics(
    input: &SessionInput,
    defaults: &PhysiologyDefaults,
) -> TrainingMetrics {
    let trimp = calculate_trimp(
        input.duration_min,
        input.avg_heart_rate,
        input.max_heart_rate,
        input.resting_heart_rate,
        defaults,
    );
    let session_rpe = calculate_session_rpe(input.duration_min, input.perceived_exertion, defaults);
    let combined_load = (trimp + session_rpe) / 2.0;

    log::debug!("session load: trimp={trimp:.1} srpe={session_rpe:.1} combined={combined_load:.1}");

    TrainingMetrics { trimp, session_rpe, combined_load }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d() -> PhysiologyDefaults {
        PhysiologyDefaults::default()
    }

    #[test]
    fn trimp_zero_cases() {
        assert_eq!(calculate_trimp(0.0, Some(150), None, None, &d()), 0.0);
        assert_eq!(calculate_trimp(60.0, Some(0), None, None, &d()), 0.0);
        assert_eq!(calculate_trimp(60.0, None, None, None, &d()), 0.0);
        // maks ≤ hvile
        assert_eq!(calculate_trimp(60.0, Some(150), Some(60), Some(60), &d()), 0.0);
    }

    #[test]
    fn trimp_bands() {
        // f = (125-60)/130 = 0.5 → vekt 1.5
        let t = calculate_trimp(60.0, Some(125), None, None, &d());
        assert!((t - 60.0 * 0.5 * 1.5).abs() < 1e-9);

        // f = (151-60)/130 = 0.7 → vekt 2.0
        let t = calculate_trimp(60.0, Some(151), None, None, &d());
        assert!((t - 60.0 * 0.7 * 2.0).abs() < 1e-9);

        // f = (175-60)/130 ≈ 0.885 → vekt 2.5
        let f = 115.0 / 130.0;
        let t = calculate_trimp(30.0, Some(175), None, None, &d());
        assert!((t - 30.0 * f * 2.5).abs() < 1e-9);

        // f lav → vekt 1.0
        let f = 20.0 / 130.0;
        let t = calculate_trimp(30.0, Some(80), None, None, &d());
        assert!((t - 30.0 * f).abs() < 1e-9);
    }

    #[test]
    fn trimp_below_resting_is_zero() {
        assert_eq!(calculate_trimp(45.0, Some(50), None, None, &d()), 0.0);
    }

    #[test]
    fn session_rpe_defaults_and_clamps() {
        assert_eq!(calculate_session_rpe(60.0, None, &d()), 300.0);
        assert_eq!(calculate_session_rpe(60.0, Some(7.0), &d()), 420.0);
        assert_eq!(calculate_session_rpe(60.0, Some(14.0), &d()), 600.0);
        assert_eq!(calculate_session_rpe(0.0, Some(7.0), &d()), 0.0);
    }

    #[test]
    fn combined_is_mean() {
        let input = SessionInput {
            duration_min: 60.0,
            avg_heart_rate: Some(125),
            perceived_exertion: Some(6.0),
            ..Default::default()
        };
        let m = calculate_training_metrics(&input, &d());
        assert!((m.trimp - 45.0).abs() < 1e-9);
        assert_eq!(m.session_rpe, 360.0);
        assert!((m.combined_load - (45.0 + 360.0) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn manual_log_without_hr_still_has_load() {
        let input = SessionInput { duration_min: 40.0, ..Default::default() };
        let m = calculate_training_metrics(&input, &d());
        assert_eq!(m.trimp, 0.0);
        assert_eq!(m.session_rpe, 200.0);
        assert_eq!(m.combined_load, 100.0);
    }
}
