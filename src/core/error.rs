use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the dependency-setup backend.
/// Every module returns `Result<T, SetupError>`.
#[derive(Debug, Error)]
pub enum SetupError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed for {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Games ───────────────────────────────────────────
    #[error("Game not found: {0}")]
    GameNotFound(String),

    // ── Compatibility layer ─────────────────────────────
    #[error("Compatibility layer '{0}' not found")]
    CompatLayerNotFound(String),

    #[error("Cannot translate guest path '{0}'")]
    PathTranslation(String),

    #[error("{program} exited with code {code:?}: {stderr}")]
    Execution {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    // ── Generic ─────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type SetupResult<T> = Result<T, SetupError>;

impl From<std::io::Error> for SetupError {
    fn from(source: std::io::Error) -> Self {
        SetupError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

/// Failure of the cache fetcher. Kept apart from [`SetupError`] so the
/// installer can degrade on it without matching unrelated variants.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("download of {url} failed: {source}")]
    Download {
        url: String,
        source: Box<SetupError>,
    },

    #[error("cache write at {path:?} failed: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

// Errors travel to frontends as plain strings.
impl serde::Serialize for SetupError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_error_mentions_program_and_code() {
        let err = SetupError::Execution {
            program: "winetricks".into(),
            code: Some(1),
            stderr: "boom".into(),
        };
        let text = err.to_string();
        assert!(text.contains("winetricks"));
        assert!(text.contains("Some(1)"));
        assert!(text.contains("boom"));
    }

    #[test]
    fn serializes_as_display_string() {
        let err = SetupError::GameNotFound("Pineapple".into());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Game not found: Pineapple\"");
    }
}
