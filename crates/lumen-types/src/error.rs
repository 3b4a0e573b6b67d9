//! Error types for LUMEN.

use std::io;

/// Errors produced by the LUMEN framework.
#[derive(Debug, thiserror::Error)]
pub enum LumenError {
    #[error("config error: {0}")]
    Config(String),

    #[error("content not found: {0}")]
    Content(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("banner error: {0}")]
    Banner(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, LumenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let e = LumenError::Config("missing key".into());
        assert_eq!(format!("{e}"), "config error: missing key");
    }

    #[test]
    fn content_error_display() {
        let e = LumenError::Content("content/about.md".into());
        assert_eq!(format!("{e}"), "content not found: content/about.md");
    }

    #[test]
    fn command_error_display() {
        let e = LumenError::Command("handler exploded".into());
        assert_eq!(format!("{e}"), "command error: handler exploded");
    }

    #[test]
    fn invalid_argument_display() {
        let e = LumenError::InvalidArgument("banana".into());
        assert_eq!(format!("{e}"), "invalid argument: banana");
    }

    #[test]
    fn banner_error_display() {
        let e = LumenError::Banner("font missing".into());
        assert_eq!(format!("{e}"), "banner error: font missing");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: LumenError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: LumenError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }

    #[test]
    fn error_is_debug() {
        let e = LumenError::Command("test".into());
        assert!(format!("{e:?}").contains("Command"));
    }

    #[test]
    fn result_alias_ok() {
        let r: Result<i32> = Ok(42);
        assert_eq!(r.unwrap(), 42);
    }

    #[test]
    fn result_alias_err() {
        let r: Result<i32> = Err(LumenError::Config("oops".into()));
        assert!(r.is_err());
    }
}
