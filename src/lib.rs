pub mod auth;
pub mod cli;
pub mod config;
pub mod debounce;
pub mod error;
pub mod modules;
pub mod photos;
pub mod toolkit;

pub use auth::{FileStore, MemoryStore, Navigator, PkceAuth, SessionStore};
pub use config::{load_config, PagebuilderConfig, Settings};
pub use debounce::Debouncer;
pub use error::{CallbackFailure, PagebuilderError};
pub use modules::{ModuleSettings, TextImageSettings};
pub use photos::{OperatingMode, PhotoSearch, SearchResult, UnsplashPhoto};
pub use toolkit::Toolkit;

/// One-shot convenience function: load config and run a single search.
pub async fn search_once(query: &str) -> Result<SearchResult, PagebuilderError> {
    let toolkit = Toolkit::from_config(None)?;
    toolkit.photos().search_photos(query).await
}
