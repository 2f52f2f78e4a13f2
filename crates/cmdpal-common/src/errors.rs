use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("clipboard error: {0}")]
    ClipboardError(String),

    #[error("path error: {0}")]
    PathError(String),

    #[error("navigation error: {0}")]
    NavigationError(String),

    #[error("prompt error: {0}")]
    PromptError(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

/// Failures of the page registration bridge.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("bridge message parse error: {0}")]
    Parse(String),

    #[error("bridge message rejected: {0}")]
    Rejected(String),

    #[error("page channel closed for tab {0}")]
    ChannelClosed(u32),
}

/// Error returned by a command's trigger action.
#[derive(Debug, thiserror::Error)]
pub enum TriggerError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CmdpalError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Trigger(#[from] TriggerError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("palette.recent_bookmarks = 0".into());
        assert_eq!(
            err.to_string(),
            "config validation error: palette.recent_bookmarks = 0"
        );
    }

    #[test]
    fn platform_error_display() {
        let err = PlatformError::ClipboardError("window not focused".into());
        assert_eq!(err.to_string(), "clipboard error: window not focused");

        let err = PlatformError::NotSupported("bookmark search".into());
        assert_eq!(err.to_string(), "not supported: bookmark search");
    }

    #[test]
    fn bridge_error_display() {
        let err = BridgeError::ChannelClosed(7);
        assert_eq!(err.to_string(), "page channel closed for tab 7");

        let err = BridgeError::Rejected("execute is host-to-page only".into());
        assert!(err.to_string().contains("host-to-page"));
    }

    #[test]
    fn trigger_error_from_platform_is_transparent() {
        let err: TriggerError = PlatformError::ClipboardError("denied".into()).into();
        assert!(matches!(err, TriggerError::Platform(_)));
        assert_eq!(err.to_string(), "clipboard error: denied");
    }

    #[test]
    fn cmdpal_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: CmdpalError = config_err.into();
        assert!(matches!(err, CmdpalError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn cmdpal_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "script missing");
        let err: CmdpalError = io_err.into();
        assert!(matches!(err, CmdpalError::Io(_)));
        assert!(err.to_string().contains("script missing"));
    }

    #[test]
    fn cmdpal_error_from_trigger() {
        let err: CmdpalError = TriggerError::Other("boom".into()).into();
        assert_eq!(err.to_string(), "boom");
    }
}
