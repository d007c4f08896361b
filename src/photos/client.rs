use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::auth::TokenSource;
use crate::config::Settings;
use crate::error::PagebuilderError;

use super::api::UnsplashApi;
use super::mock::MockPhotos;
use super::mode::{Credential, OperatingMode};
use super::source::PhotoSource;
use super::types::SearchResult;

pub const PER_PAGE: u32 = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    pub dummy_mode: bool,
    pub access_key: Option<String>,
    pub api_url: String,
    pub dummy_latency: Duration,
}

impl SearchSettings {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            dummy_mode: settings.dummy_mode,
            access_key: settings.access_key.clone(),
            api_url: settings.api_url.clone(),
            dummy_latency: settings.dummy_latency,
        }
    }
}

struct CachedApi {
    credential: Credential,
    api: Arc<UnsplashApi>,
}

/// Mode-selecting front for photo search.
///
/// Holds the one live API client explicitly. The client is built on first
/// use and reused while the credential it was built with is still current;
/// [`PhotoSearch::invalidate`] drops it, and callers do so after logout.
pub struct PhotoSearch {
    settings: SearchSettings,
    tokens: Arc<dyn TokenSource>,
    dummy: Arc<MockPhotos>,
    cached: Mutex<Option<CachedApi>>,
}

impl std::fmt::Debug for PhotoSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoSearch")
            .field("settings", &self.settings)
            .field("cached", &self.has_cached_client())
            .finish_non_exhaustive()
    }
}

impl PhotoSearch {
    pub fn new(settings: SearchSettings, tokens: Arc<dyn TokenSource>) -> Self {
        let dummy = Arc::new(MockPhotos::new(settings.dummy_latency));
        Self {
            settings,
            tokens,
            dummy,
            cached: Mutex::new(None),
        }
    }

    /// Current operating mode, recomputed from the live credentials.
    pub fn mode(&self) -> Result<OperatingMode, PagebuilderError> {
        OperatingMode::select(
            self.settings.dummy_mode,
            self.tokens.access_token(),
            self.settings.access_key.as_deref(),
        )
    }

    pub async fn search_photos(&self, query: &str) -> Result<SearchResult, PagebuilderError> {
        let source = self.source()?;
        source.search(query, PER_PAGE).await
    }

    /// Drop the cached API client.
    pub fn invalidate(&self) {
        self.lock_cache().take();
    }

    pub fn has_cached_client(&self) -> bool {
        self.lock_cache().is_some()
    }

    fn source(&self) -> Result<Arc<dyn PhotoSource>, PagebuilderError> {
        match self.mode()? {
            OperatingMode::Dummy => Ok(self.dummy.clone()),
            OperatingMode::Live(credential) => Ok(self.api_for(credential)?),
        }
    }

    fn api_for(&self, credential: Credential) -> Result<Arc<UnsplashApi>, PagebuilderError> {
        let mut cached = self.lock_cache();
        if let Some(entry) = cached.as_ref() {
            if entry.credential == credential {
                return Ok(entry.api.clone());
            }
        }

        tracing::debug!("Building Unsplash API client ({} mode)", credential.mode_name());
        let api = Arc::new(UnsplashApi::new(&self.settings.api_url, &credential)?);
        *cached = Some(CachedApi {
            credential,
            api: api.clone(),
        });
        Ok(api)
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, Option<CachedApi>> {
        self.cached.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedToken(Mutex<Option<String>>);

    impl TokenSource for FixedToken {
        fn access_token(&self) -> Option<String> {
            self.0.lock().unwrap().clone()
        }
    }

    fn live_settings(access_key: Option<&str>) -> SearchSettings {
        SearchSettings {
            dummy_mode: false,
            access_key: access_key.map(str::to_string),
            api_url: "https://api.unsplash.com".into(),
            dummy_latency: Duration::ZERO,
        }
    }

    fn token(value: Option<&str>) -> Arc<FixedToken> {
        Arc::new(FixedToken(Mutex::new(value.map(str::to_string))))
    }

    #[test]
    fn mode_prefers_oauth_token() {
        let search = PhotoSearch::new(live_settings(Some("key")), token(Some("tok")));
        assert_eq!(search.mode().unwrap().name(), "oauth");
        let search = PhotoSearch::new(live_settings(Some("key")), token(None));
        assert_eq!(search.mode().unwrap().name(), "public-key");
    }

    #[test]
    fn client_is_reused_for_same_credential() {
        let search = PhotoSearch::new(live_settings(Some("key")), token(None));
        let a = search.api_for(Credential::PublicKey("key".into())).unwrap();
        let b = search.api_for(Credential::PublicKey("key".into())).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn client_is_rebuilt_after_invalidate() {
        let search = PhotoSearch::new(live_settings(Some("key")), token(None));
        let a = search.api_for(Credential::PublicKey("key".into())).unwrap();
        assert!(search.has_cached_client());
        search.invalidate();
        assert!(!search.has_cached_client());
        let b = search.api_for(Credential::PublicKey("key".into())).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn client_is_rebuilt_when_credential_changes() {
        let tokens = token(None);
        let search = PhotoSearch::new(live_settings(Some("key")), tokens.clone());
        search.source().unwrap();
        let first = search.api_for(Credential::PublicKey("key".into())).unwrap();

        *tokens.0.lock().unwrap() = Some("fresh".into());
        search.source().unwrap();
        let cached = search.lock_cache();
        let entry = cached.as_ref().unwrap();
        assert_eq!(entry.credential, Credential::OAuthToken("fresh".into()));
        assert!(!Arc::ptr_eq(&first, &entry.api));
    }

    #[test]
    fn dummy_mode_never_builds_a_client() {
        let mut settings = live_settings(None);
        settings.dummy_mode = true;
        let search = PhotoSearch::new(settings, token(None));
        search.source().unwrap();
        assert!(!search.has_cached_client());
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_any_request() {
        let search = PhotoSearch::new(live_settings(None), token(None));
        let err = search.search_photos("mountains").await.unwrap_err();
        assert!(matches!(err, PagebuilderError::MissingConfig(_)));
        assert!(!search.has_cached_client());
    }
}
