use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PagebuilderError {
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    #[error("Error in config {}: {detail}", path.display())]
    ConfigError { path: PathBuf, detail: String },

    #[error("Unsplash API error: {0}")]
    ProviderError(String),

    #[error("Rate limit exceeded. Try again later or enable OAuth.")]
    RateLimited,

    #[error("Transport error: {0}")]
    TransportError(Box<dyn std::error::Error + Send + Sync>),

    #[error("Protocol error: {0}")]
    ProtocolError(String),

    #[error("Session store error: {0}")]
    StoreError(String),

    #[error("Timed out waiting for OAuth callback after {0}s")]
    CallbackTimeout(u64),

    #[error("Login failed: {0}")]
    LoginFailed(#[from] CallbackFailure),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PagebuilderError {
    /// Error code string for structured JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            PagebuilderError::MissingConfig(_) => "missing_config",
            PagebuilderError::ConfigError { .. } => "config_error",
            PagebuilderError::ProviderError(_) => "provider_error",
            PagebuilderError::RateLimited => "rate_limited",
            PagebuilderError::TransportError(_) => "transport_error",
            PagebuilderError::ProtocolError(_) => "parse_error",
            PagebuilderError::StoreError(_) => "store_error",
            PagebuilderError::CallbackTimeout(_) => "timeout",
            PagebuilderError::LoginFailed(_) => "login_failed",
            PagebuilderError::IoError(_) => "io_error",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut error = serde_json::json!({
            "message": self.to_string(),
            "code": self.code(),
        });
        if let PagebuilderError::LoginFailed(failure) = self {
            error["reason"] = failure.code().into();
        }
        serde_json::json!({ "error": error })
    }
}

/// Tagged failure returned by the OAuth callback handler. The handler never
/// surfaces [`PagebuilderError`]; every path resolves to `Ok(())` or one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallbackFailure {
    #[error("Invalid callback URL: {0}")]
    InvalidCallback(String),

    #[error("No authorization code received")]
    MissingCode,

    #[error("Authorization denied: {0}")]
    AuthorizationDenied(String),

    #[error("Missing PKCE state")]
    MissingPkceState,

    #[error("Invalid PKCE state: {0}")]
    InvalidPkceState(String),

    #[error("State mismatch - possible CSRF attack")]
    StateMismatch,

    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Token exchange error: {0}")]
    Transport(String),

    #[error("Could not store access token: {0}")]
    Storage(String),
}

impl CallbackFailure {
    pub fn code(&self) -> &'static str {
        match self {
            CallbackFailure::InvalidCallback(_) => "invalid_callback",
            CallbackFailure::MissingCode => "missing_code",
            CallbackFailure::AuthorizationDenied(_) => "access_denied",
            CallbackFailure::MissingPkceState => "missing_pkce_state",
            CallbackFailure::InvalidPkceState(_) => "invalid_pkce_state",
            CallbackFailure::StateMismatch => "state_mismatch",
            CallbackFailure::MissingConfig(_) => "missing_config",
            CallbackFailure::TokenExchange(_) => "token_exchange_failed",
            CallbackFailure::Transport(_) => "token_exchange_error",
            CallbackFailure::Storage(_) => "store_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_config() {
        let err = PagebuilderError::MissingConfig("unsplash.accessKey".into());
        assert_eq!(
            err.to_string(),
            "Missing configuration: unsplash.accessKey"
        );
    }

    #[test]
    fn display_config_error() {
        let err = PagebuilderError::ConfigError {
            path: PathBuf::from("/home/user/.pagebuilder/pagebuilder.json"),
            detail: "invalid JSON".into(),
        };
        assert_eq!(
            err.to_string(),
            "Error in config /home/user/.pagebuilder/pagebuilder.json: invalid JSON"
        );
    }

    #[test]
    fn rate_limited_recommends_oauth() {
        let msg = PagebuilderError::RateLimited.to_string();
        assert!(msg.contains("Rate limit"));
        assert!(msg.contains("OAuth"));
    }

    #[test]
    fn display_transport_error() {
        let err = PagebuilderError::TransportError("connection reset".into());
        assert_eq!(err.to_string(), "Transport error: connection reset");
    }

    #[test]
    fn error_code_mapping_all_variants() {
        assert_eq!(
            PagebuilderError::MissingConfig("x".into()).code(),
            "missing_config"
        );
        assert_eq!(
            PagebuilderError::ConfigError {
                path: PathBuf::from("/a"),
                detail: "d".into()
            }
            .code(),
            "config_error"
        );
        assert_eq!(
            PagebuilderError::ProviderError("e".into()).code(),
            "provider_error"
        );
        assert_eq!(PagebuilderError::RateLimited.code(), "rate_limited");
        assert_eq!(
            PagebuilderError::TransportError("e".into()).code(),
            "transport_error"
        );
        assert_eq!(PagebuilderError::ProtocolError("e".into()).code(), "parse_error");
        assert_eq!(PagebuilderError::StoreError("e".into()).code(), "store_error");
        assert_eq!(PagebuilderError::CallbackTimeout(60).code(), "timeout");
        assert_eq!(
            PagebuilderError::LoginFailed(CallbackFailure::MissingCode).code(),
            "login_failed"
        );
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "test");
        assert_eq!(PagebuilderError::IoError(io_err).code(), "io_error");
    }

    #[test]
    fn error_to_json_structure() {
        let err = PagebuilderError::ProviderError("OAuth error: invalid token".into());
        let json = err.to_json();
        let error_obj = json.get("error").expect("should have error key");
        assert_eq!(error_obj["code"], "provider_error");
        assert!(error_obj["message"]
            .as_str()
            .unwrap()
            .contains("invalid token"));
    }

    #[test]
    fn display_callback_failures() {
        assert_eq!(
            CallbackFailure::MissingCode.to_string(),
            "No authorization code received"
        );
        assert_eq!(
            CallbackFailure::StateMismatch.to_string(),
            "State mismatch - possible CSRF attack"
        );
        assert_eq!(
            CallbackFailure::TokenExchange("invalid_grant".into()).to_string(),
            "Token exchange failed: invalid_grant"
        );
    }

    #[test]
    fn login_failure_json_carries_reason() {
        let err = PagebuilderError::from(CallbackFailure::StateMismatch);
        let json = err.to_json();
        assert_eq!(json["error"]["code"], "login_failed");
        assert_eq!(json["error"]["reason"], "state_mismatch");
        assert!(json["error"]["message"].as_str().unwrap().contains("CSRF"));
    }
}
