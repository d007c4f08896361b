use std::sync::Arc;

use crate::auth::{FileStore, OAuthSettings, PkceAuth, SessionStore};
use crate::config::{load_config, Settings};
use crate::error::PagebuilderError;
use crate::photos::{PhotoSearch, SearchSettings};

/// The auth helper and photo search wired to one session store.
#[derive(Debug)]
pub struct Toolkit {
    settings: Settings,
    auth: Arc<PkceAuth>,
    photos: PhotoSearch,
}

impl Toolkit {
    /// Load and merge all config sources, persisting the session on disk.
    pub fn from_config(cli_config: Option<&str>) -> Result<Self, PagebuilderError> {
        Ok(Self::from_settings(load_config(cli_config)?.resolve()))
    }

    /// Build from already resolved settings, with the session in `session_file`.
    pub fn from_settings(settings: Settings) -> Self {
        let store = match &settings.session_file {
            Some(path) => FileStore::new(path),
            None => FileStore::default(),
        };
        Self::with_store(settings, Arc::new(store))
    }

    pub fn with_store(settings: Settings, store: Arc<dyn SessionStore>) -> Self {
        let auth = Arc::new(PkceAuth::new(OAuthSettings::from_settings(&settings), store));
        let photos = PhotoSearch::new(SearchSettings::from_settings(&settings), auth.clone());
        Self {
            settings,
            auth,
            photos,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn auth(&self) -> &PkceAuth {
        &self.auth
    }

    pub fn photos(&self) -> &PhotoSearch {
        &self.photos
    }

    /// Log out and drop the API client built with the old token.
    pub fn logout(&self) -> Result<(), PagebuilderError> {
        self.auth.logout()?;
        self.photos.invalidate();
        Ok(())
    }
}
