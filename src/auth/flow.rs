use std::sync::Arc;

use reqwest::Url;

use crate::config::Settings;
use crate::error::{CallbackFailure, PagebuilderError};

use super::navigator::Navigator;
use super::pkce::{generate_pkce, PkceCrypto, PkceState, SystemCrypto};
use super::store::{SessionStore, PKCE_KEY, TOKEN_KEY};
use super::token::{exchange_code, TokenRequest};
use super::TokenSource;

pub const DEFAULT_SCOPE: &str = "public";

/// Client registration and endpoints for the authorization server.
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthSettings {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub oauth_url: String,
    pub scope: String,
}

impl OAuthSettings {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            client_id: settings.access_key.clone(),
            client_secret: settings.secret_key.clone(),
            redirect_uri: settings.redirect_uri.clone(),
            oauth_url: settings.oauth_url.clone(),
            scope: DEFAULT_SCOPE.to_string(),
        }
    }

    pub fn authorize_endpoint(&self) -> String {
        format!("{}/oauth/authorize", self.oauth_url)
    }

    pub fn token_endpoint(&self) -> String {
        format!("{}/oauth/token", self.oauth_url)
    }

    /// Client id and redirect URI, both of which every step of the flow needs.
    fn client(&self) -> Result<(&str, &str), String> {
        match (self.client_id.as_deref(), self.redirect_uri.as_deref()) {
            (Some(id), Some(uri)) => Ok((id, uri)),
            (None, _) => Err("unsplash.accessKey (OAuth client id) is not set".into()),
            (_, None) => Err("unsplash.redirectUri is not set".into()),
        }
    }
}

/// Authorization-code + PKCE login against Unsplash.
///
/// The token and the in-flight PKCE parameters live in the injected
/// [`SessionStore`], so the helper itself holds no mutable state.
pub struct PkceAuth {
    settings: OAuthSettings,
    store: Arc<dyn SessionStore>,
    crypto: Arc<dyn PkceCrypto>,
    http: reqwest::Client,
}

impl std::fmt::Debug for PkceAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PkceAuth")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

impl PkceAuth {
    pub fn new(settings: OAuthSettings, store: Arc<dyn SessionStore>) -> Self {
        Self {
            settings,
            store,
            crypto: Arc::new(SystemCrypto),
            http: reqwest::Client::new(),
        }
    }

    /// Replace the randomness/digest source, e.g. with a fixed one in tests.
    pub fn with_crypto(mut self, crypto: Arc<dyn PkceCrypto>) -> Self {
        self.crypto = crypto;
        self
    }

    pub fn settings(&self) -> &OAuthSettings {
        &self.settings
    }

    /// Start a login: persist fresh PKCE parameters, then send the user agent
    /// to the authorization endpoint.
    pub fn initiate_login(&self, navigator: &dyn Navigator) -> Result<(), PagebuilderError> {
        let pkce = generate_pkce(self.crypto.as_ref());
        let url = self.authorization_url(&pkce)?;

        let blob = serde_json::to_string(&pkce).map_err(|e| {
            PagebuilderError::StoreError(format!("Failed to serialize PKCE state: {e}"))
        })?;
        self.store.set(PKCE_KEY, &blob)?;
        tracing::debug!("Stored PKCE state, redirecting to {}", self.settings.authorize_endpoint());

        navigator.navigate(&url)
    }

    /// Authorization URL carrying the challenge and state of `pkce`.
    pub fn authorization_url(&self, pkce: &PkceState) -> Result<Url, PagebuilderError> {
        let (client_id, redirect_uri) = self
            .settings
            .client()
            .map_err(PagebuilderError::MissingConfig)?;

        let endpoint = self.settings.authorize_endpoint();
        let mut url = Url::parse(&endpoint).map_err(|e| PagebuilderError::ConfigError {
            path: "<config>".into(),
            detail: format!("Invalid OAuth URL '{endpoint}': {e}"),
        })?;
        url.query_pairs_mut()
            .append_pair("client_id", client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.settings.scope)
            .append_pair("code_challenge", &pkce.code_challenge)
            .append_pair("code_challenge_method", "S256")
            .append_pair("state", &pkce.state);
        Ok(url)
    }

    /// Complete a login from the redirect the authorization server sent back.
    ///
    /// `callback_url` may be the full redirect URL, a path with a query, or a
    /// bare query string. The stored PKCE state is consumed whatever the
    /// outcome, so a callback can never be replayed.
    pub async fn handle_callback(&self, callback_url: &str) -> Result<(), CallbackFailure> {
        let stored = self.store.get(PKCE_KEY);
        if stored.is_some() {
            if let Err(e) = self.store.delete(PKCE_KEY) {
                tracing::warn!("Failed to clear PKCE state: {e}");
            }
        }

        let params = parse_callback_params(callback_url)?;

        let Some(code) = params.code else {
            return Err(match params.error {
                Some(error) => CallbackFailure::AuthorizationDenied(error),
                None => CallbackFailure::MissingCode,
            });
        };

        let stored = stored.ok_or(CallbackFailure::MissingPkceState)?;
        let pkce: PkceState = serde_json::from_str(&stored)
            .map_err(|e| CallbackFailure::InvalidPkceState(e.to_string()))?;

        if params.state.as_deref() != Some(pkce.state.as_str()) {
            tracing::warn!("OAuth callback state mismatch; discarding login attempt");
            return Err(CallbackFailure::StateMismatch);
        }

        let (client_id, redirect_uri) = self
            .settings
            .client()
            .map_err(CallbackFailure::MissingConfig)?;
        let request = TokenRequest::authorization_code(
            client_id,
            self.settings.client_secret.as_deref(),
            &code,
            redirect_uri,
            &pkce.code_verifier,
        );
        let token = exchange_code(&self.http, &self.settings.token_endpoint(), &request).await?;

        self.store
            .set(TOKEN_KEY, &token.access_token)
            .map_err(|e| CallbackFailure::Storage(e.to_string()))?;
        tracing::debug!("OAuth login complete (scope: {:?})", token.scope);
        Ok(())
    }

    pub fn access_token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY)
    }

    /// Forget the token and any unfinished login.
    pub fn logout(&self) -> Result<(), PagebuilderError> {
        self.store.delete(TOKEN_KEY)?;
        self.store.delete(PKCE_KEY)
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }
}

impl TokenSource for PkceAuth {
    fn access_token(&self) -> Option<String> {
        PkceAuth::access_token(self)
    }
}

fn parse_callback_params(input: &str) -> Result<CallbackParams, CallbackFailure> {
    let input = input.trim();
    let parsed = if input.contains("://") {
        Url::parse(input)
    } else {
        let query = input.split_once('?').map_or(input, |(_, q)| q);
        Url::parse(&format!("http://localhost/?{query}"))
    };
    let url = parsed.map_err(|e| CallbackFailure::InvalidCallback(format!("{input}: {e}")))?;

    let mut params = CallbackParams::default();
    for (key, value) in url.query_pairs() {
        let slot = match &*key {
            "code" => &mut params.code,
            "state" => &mut params.state,
            "error" => &mut params.error,
            _ => continue,
        };
        if slot.is_none() && !value.is_empty() {
            *slot = Some(value.into_owned());
        }
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::auth::store::MemoryStore;

    #[derive(Default)]
    struct RecordingNavigator {
        visited: Mutex<Vec<Url>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, url: &Url) -> Result<(), PagebuilderError> {
            self.visited.lock().unwrap().push(url.clone());
            Ok(())
        }
    }

    fn settings() -> OAuthSettings {
        OAuthSettings {
            client_id: Some("client-abc".into()),
            client_secret: None,
            redirect_uri: Some("http://localhost:8976/callback".into()),
            oauth_url: "https://unsplash.com".into(),
            scope: DEFAULT_SCOPE.into(),
        }
    }

    fn auth_with_store() -> (PkceAuth, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (PkceAuth::new(settings(), store.clone()), store)
    }

    #[test]
    fn parse_full_callback_url() {
        let params =
            parse_callback_params("http://localhost:8976/callback?code=abc%20123&state=xyz")
                .unwrap();
        assert_eq!(params.code.as_deref(), Some("abc 123"));
        assert_eq!(params.state.as_deref(), Some("xyz"));
    }

    #[test]
    fn parse_bare_query_and_path() {
        let params = parse_callback_params("?code=a&state=b").unwrap();
        assert_eq!(params.code.as_deref(), Some("a"));
        let params = parse_callback_params("/callback?code=c&state=d").unwrap();
        assert_eq!(params.state.as_deref(), Some("d"));
        let params = parse_callback_params("code=e").unwrap();
        assert_eq!(params.code.as_deref(), Some("e"));
    }

    #[test]
    fn parse_empty_code_is_missing() {
        let params = parse_callback_params("?code=&state=xyz").unwrap();
        assert!(params.code.is_none());
    }

    #[test]
    fn parse_error_param() {
        let params = parse_callback_params("?error=access_denied&state=xyz").unwrap();
        assert!(params.code.is_none());
        assert_eq!(params.error.as_deref(), Some("access_denied"));
    }

    #[test]
    fn initiate_login_stores_state_then_navigates() {
        let (auth, store) = auth_with_store();
        let nav = RecordingNavigator::default();
        auth.initiate_login(&nav).unwrap();

        let blob = store.get(PKCE_KEY).expect("PKCE state stored");
        let pkce: PkceState = serde_json::from_str(&blob).unwrap();

        let visited = nav.visited.lock().unwrap();
        assert_eq!(visited.len(), 1);
        let url = &visited[0];
        assert_eq!(url.path(), "/oauth/authorize");
        let pairs: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs["client_id"], "client-abc");
        assert_eq!(pairs["redirect_uri"], "http://localhost:8976/callback");
        assert_eq!(pairs["response_type"], "code");
        assert_eq!(pairs["scope"], "public");
        assert_eq!(pairs["code_challenge"], pkce.code_challenge);
        assert_eq!(pairs["code_challenge_method"], "S256");
        assert_eq!(pairs["state"], pkce.state);
    }

    #[test]
    fn initiate_login_requires_client_id_and_redirect() {
        let store = Arc::new(MemoryStore::new());
        let mut s = settings();
        s.redirect_uri = None;
        let auth = PkceAuth::new(s, store.clone());
        let nav = RecordingNavigator::default();

        let err = auth.initiate_login(&nav).unwrap_err();
        assert!(matches!(err, PagebuilderError::MissingConfig(_)));
        assert!(err.to_string().contains("redirectUri"));
        assert!(store.get(PKCE_KEY).is_none());
        assert!(nav.visited.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn callback_without_code_fails() {
        let (auth, _) = auth_with_store();
        let err = auth.handle_callback("?state=abc").await.unwrap_err();
        assert_eq!(err, CallbackFailure::MissingCode);
    }

    #[tokio::test]
    async fn callback_with_error_param_is_denied() {
        let (auth, _) = auth_with_store();
        let err = auth
            .handle_callback("?error=access_denied&state=abc")
            .await
            .unwrap_err();
        assert_eq!(err, CallbackFailure::AuthorizationDenied("access_denied".into()));
    }

    #[tokio::test]
    async fn callback_without_stored_state_fails() {
        let (auth, _) = auth_with_store();
        let err = auth.handle_callback("?code=c&state=s").await.unwrap_err();
        assert_eq!(err, CallbackFailure::MissingPkceState);
    }

    #[tokio::test]
    async fn callback_with_corrupt_state_fails() {
        let (auth, store) = auth_with_store();
        store.set(PKCE_KEY, "{not json").unwrap();
        let err = auth.handle_callback("?code=c&state=s").await.unwrap_err();
        assert!(matches!(err, CallbackFailure::InvalidPkceState(_)));
        assert!(store.get(PKCE_KEY).is_none());
    }

    #[tokio::test]
    async fn malformed_callback_still_consumes_state() {
        let (auth, store) = auth_with_store();
        auth.initiate_login(&RecordingNavigator::default()).unwrap();
        assert!(store.get(PKCE_KEY).is_some());

        let err = auth
            .handle_callback("http://[bad?code=x&state=y")
            .await
            .unwrap_err();
        assert!(matches!(err, CallbackFailure::InvalidCallback(_)));
        assert!(store.get(PKCE_KEY).is_none());
    }

    #[tokio::test]
    async fn state_mismatch_fails_without_token() {
        let (auth, store) = auth_with_store();
        auth.initiate_login(&RecordingNavigator::default()).unwrap();

        let err = auth
            .handle_callback("?code=c&state=forged")
            .await
            .unwrap_err();
        assert_eq!(err, CallbackFailure::StateMismatch);
        assert!(!auth.is_authenticated());
        assert!(store.get(PKCE_KEY).is_none());
    }

    #[test]
    fn logout_clears_everything_and_is_idempotent() {
        let (auth, store) = auth_with_store();
        store.set(TOKEN_KEY, "tok").unwrap();
        store.set(PKCE_KEY, "{}").unwrap();
        assert!(auth.is_authenticated());

        auth.logout().unwrap();
        assert!(!auth.is_authenticated());
        assert!(store.get(PKCE_KEY).is_none());
        auth.logout().unwrap();
    }

    #[test]
    fn endpoints_follow_oauth_url() {
        let s = settings();
        assert_eq!(s.authorize_endpoint(), "https://unsplash.com/oauth/authorize");
        assert_eq!(s.token_endpoint(), "https://unsplash.com/oauth/token");
    }

    #[test]
    fn oauth_settings_from_resolved_settings() {
        let mut settings = Settings::default();
        settings.access_key = Some("key".into());
        settings.redirect_uri = Some("http://localhost/cb".into());
        let oauth = OAuthSettings::from_settings(&settings);
        assert_eq!(oauth.client_id.as_deref(), Some("key"));
        assert_eq!(oauth.scope, "public");
        assert_eq!(oauth.oauth_url, "https://unsplash.com");
    }
}
