// Python-bro: JSON-streng inn, JSON-streng ut. Feil blir ValueError med json-sti.
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::error::EngineError;

fn to_py_err(e: EngineError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Rå sporlogg (GPX-tekst) → ParsedActivity-JSON. Tomt spor → ValueError.
#[pyfunction]
#[pyo3(signature = (raw, cfg_json = None))]
fn parse_activity(raw: &str, cfg_json: Option<&str>) -> PyResult<String> {
    crate::parse_activity_json(raw, cfg_json).map_err(to_py_err)
}

/// SessionInput-JSON → TrainingMetrics-JSON. Feiler kun på ugyldig JSON.
#[pyfunction]
#[pyo3(signature = (input_json, cfg_json = None))]
fn session_metrics(input_json: &str, cfg_json: Option<&str>) -> PyResult<String> {
    crate::session_metrics_json(input_json, cfg_json).map_err(to_py_err)
}

#[pyfunction]
#[pyo3(signature = (input_json, cfg_json = None))]
fn training_load(input_json: &str, cfg_json: Option<&str>) -> PyResult<String> {
    crate::training_load_json(input_json, cfg_json).map_err(to_py_err)
}

#[pyfunction]
#[pyo3(signature = (raw, cfg_json = None))]
fn recalculate_elevation(raw: &str, cfg_json: Option<&str>) -> PyResult<String> {
    crate::recalculate_elevation_json(raw, cfg_json).map_err(to_py_err)
}

/// Prometheus-tekst for prosessens tellere (for vertens /metrics).
#[pyfunction]
fn metrics_text() -> String {
    crate::telemetry::gather_text()
}

#[pymodule]
fn trainload_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(parse_activity, m)?)?;
    m.add_function(wrap_pyfunction!(session_metrics, m)?)?;
    m.add_function(wrap_pyfunction!(training_load, m)?)?;
    m.add_function(wrap_pyfunction!(recalculate_elevation, m)?)?;
    m.add_function(wrap_pyfunction!(metrics_text, m)?)?;
    Ok(())
}
