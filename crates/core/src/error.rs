use std::io;
use std::path::PathBuf;

/// Errors that can occur during liberty-dev operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("XML error: {0}")]
    XmlError(#[from] roxmltree::Error),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("No project is registered for {}", .0.display())]
    ProjectNotFound(PathBuf),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for liberty-dev operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ConfigError("maven.executable must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: maven.executable must not be empty"
        );

        let err = Error::ProjectNotFound(PathBuf::from("/ws/app/pom.xml"));
        assert_eq!(err.to_string(), "No project is registered for /ws/app/pom.xml");
    }
}
