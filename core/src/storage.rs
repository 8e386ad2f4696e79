use std::path::Path;

use crate::config::EngineConfig;
use crate::error::EngineError;

/// Leser inn motor-konfig fra disk (JSON).
/// Hvis filen ikke finnes, returneres standardverdiene.
pub fn load_config(path: impl AsRef<Path>) -> Result<EngineConfig, EngineError> {
    let path = path.as_ref();
    if path.exists() {
        let contents = std::fs::read_to_string(path)?;
        let cfg = EngineConfig::from_json_str(&contents)?;
        log::info!("config lastet fra {}", path.display());
        Ok(cfg)
    } else {
        log::warn!("fant ikke config på {}, bruker standardverdier", path.display());
        Ok(EngineConfig::default())
    }
}

/// Lagrer konfig til disk som JSON (pretty-print).
pub fn save_config(cfg: &EngineConfig, path: impl AsRef<Path>) -> Result<(), EngineError> {
    let path = path.as_ref();
    cfg.validate()?;
    let json = serde_json::to_string_pretty(cfg)?;
    std::fs::write(path, json)?;
    log::info!("config lagret til {}", path.display());
    Ok(())
}
