use thiserror::Error;

/// Fatal feil fra sporparseren. Alt annet (manglende puls, kort historikk) gir
/// definerte null-/nøytralverdier, ikke feil.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("track log contains no trackpoints")]
    NoTrackPoints,
    #[error("malformed track log at byte {position}: {message}")]
    Malformed { position: usize, message: String },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("json parse at {path}: {message}")]
    Json { path: String, message: String },
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("config: {0}")]
    Config(String),
}

impl EngineError {
    pub(crate) fn from_path_error(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
        EngineError::Json { path: e.path().to_string(), message: e.inner().to_string() }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Json { path: ".".to_string(), message: e.to_string() }
    }
}
