use crate::types::{AcwrResult, LoadSummary, RiskLevel, WeeklyLoad};

/// Minste antall uker før ACWR/monotoni/strain gir mening.
pub const MIN_WEEKS: usize = 4;
/// Kronisk vindu (uker) for ACWR.
pub const CHRONIC_WEEKS: usize = 4;

fn loads(weeks: &[WeeklyLoad]) -> impl Iterator<Item = f64> + '_ {
    weeks.iter().map(|w| w.combined_load)
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Populasjons-standardavvik (n i nevneren).
fn population_std_dev(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let m = mean(xs);
    let var = xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / xs.len() as f64;
    var.sqrt()
}

pub fn classify_acwr(acwr: f64, acute: f64) -> RiskLevel {
    if acwr > 1.5 {
        RiskLevel::VeryHigh
    } else if acwr > 1.3 {
        RiskLevel::High
    } else if acwr < 0.8 && acute > 0.0 {
        RiskLevel::Low
    } else {
        RiskLevel::Optimal
    }
}

/// ACWR (Gabbett): uke 0 / snitt av uke 0–3. Indeks 0 = nyeste uke.
/// For kort historikk → {0.0, optimal}; det er «lite data», ikke et funn.
pub fn calculate_acwr(weeks: &[WeeklyLoad]) -> AcwrResult {
    if weeks.len() < MIN_WEEKS {
        return AcwrResult::default();
    }
    let acute = weeks[0].combined_load;
    let chronic: Vec<f64> = loads(&weeks[..CHRONIC_WEEKS]).collect();
    let chronic = mean(&chronic);
    if !(chronic > 0.0) || !acute.is_finite() {
        return AcwrResult::default();
    }

    let acwr = acute / chronic;
    AcwrResult { acwr, risk: classify_acwr(acwr, acute) }
}

/// Monotoni (Foster): snitt / populasjons-std over ALLE uker.
pub fn calculate_monotony(weeks: &[WeeklyLoad]) -> f64 {
    if weeks.len() < MIN_WEEKS {
        return 0.0;
    }
    let xs: Vec<f64> = loads(weeks).collect();
    let m = mean(&xs);
    let sd = population_std_dev(&xs);
    if m == 0.0 || sd == 0.0 || !m.is_finite() || !sd.is_finite() {
        return 0.0;
    }
    m / sd
}

/// Strain (Foster): sum(uker) × monotoni.
pub fn calculate_strain(weeks: &[WeeklyLoad]) -> f64 {
    if weeks.len() < MIN_WEEKS {
        return 0.0;
    }
    loads(weeks).sum::<f64>() * calculate_monotony(weeks)
}

pub fn summarize_load(weeks: &[WeeklyLoad]) -> LoadSummary {
    let AcwrResult { acwr, risk } = calculate_acwr(weeks);
    let monotony = calculate_monotony(weeks);
    let strain = calculate_strain(weeks);
    log::debug!(
        "load summary over {} uker: acwr={acwr:.2} ({}) monotony={monotony:.2} strain={strain:.0}",
        weeks.len(),
        risk.as_str()
    );
    LoadSummary { acwr, risk, monotony, strain }
}
