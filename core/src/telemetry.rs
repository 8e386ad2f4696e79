use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::types::Anomaly;

/// Prosess-globale tellere. Kun JSON/Python-inngangene teller; kalkulatorene er rene.
pub struct Metrics {
    pub registry: Registry,
    pub tracks_parsed_total: IntCounter,
    pub track_parse_failures_total: IntCounter,
    pub anomalies_total: IntCounterVec,
}

impl Metrics {
    fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let tracks_parsed_total =
            IntCounter::new("trainload_tracks_parsed_total", "Track logs parsed into activities")?;
        let track_parse_failures_total = IntCounter::new(
            "trainload_track_parse_failures_total",
            "Track logs rejected by the parser",
        )?;
        let anomalies_total = IntCounterVec::new(
            Opts::new("trainload_anomalies_total", "Anomaly findings emitted"),
            &["severity"],
        )?;

        registry.register(Box::new(tracks_parsed_total.clone()))?;
        registry.register(Box::new(track_parse_failures_total.clone()))?;
        registry.register(Box::new(anomalies_total.clone()))?;

        Ok(Self { registry, tracks_parsed_total, track_parse_failures_total, anomalies_total })
    }
}

static METRICS: Lazy<Option<Metrics>> = Lazy::new(|| match Metrics::new() {
    Ok(m) => Some(m),
    Err(e) => {
        log::warn!("telemetry utilgjengelig: {e}");
        None
    }
});

pub fn metrics() -> Option<&'static Metrics> {
    METRICS.as_ref()
}

pub(crate) fn record_parse(ok: bool) {
    if let Some(m) = metrics() {
        if ok {
            m.tracks_parsed_total.inc();
        } else {
            m.track_parse_failures_total.inc();
        }
    }
}

pub(crate) fn record_anomalies(found: &[Anomaly]) {
    if let Some(m) = metrics() {
        for a in found {
            m.anomalies_total.with_label_values(&[a.severity.as_str()]).inc();
        }
    }
}

/// Prometheus tekstformat for alle tellere.
pub fn gather_text() -> String {
    let Some(m) = metrics() else { return String::new() };
    let mut buf = Vec::new();
    if let Err(e) = TextEncoder::new().encode(&m.registry.gather(), &mut buf) {
        log::warn!("kunne ikke kode metrikker: {e}");
        return String::new();
    }
    String::from_utf8_lossy(&buf).into_owned()
}
