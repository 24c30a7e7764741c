use thiserror::Error;

/// Startup-fatal engine errors.
///
/// Everything here is raised before the first frame. The per-frame path
/// never fails: degenerate geometry is corrected in place by the caller.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("texture not found in asset manifest: {0}")]
    MissingTexture(String),
    #[error("shader program failed to build: {0}")]
    ShaderProgram(String),
    #[error("malformed manifest or config JSON: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_texture_names_the_asset() {
        let err = EngineError::MissingTexture("io".into());
        assert_eq!(err.to_string(), "texture not found in asset manifest: io");
    }

    #[test]
    fn manifest_error_converts_from_serde() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: EngineError = parse.into();
        assert!(matches!(err, EngineError::Manifest(_)));
    }
}
