use thiserror::Error;

/// gridcal error types
#[derive(Error, Debug)]
pub enum GridcalError {
    /// Failed to parse an event file or a CLI value
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for GridcalError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type alias for gridcal
pub type Result<T> = std::result::Result<T, GridcalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GridcalError::Parse("invalid json".into());
        assert_eq!(err.to_string(), "parse error: invalid json");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GridcalError = io_err.into();
        assert!(err.to_string().contains("io error"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u64>("nope").unwrap_err();
        let err: GridcalError = json_err.into();
        assert!(matches!(err, GridcalError::Parse(_)));
    }
}
