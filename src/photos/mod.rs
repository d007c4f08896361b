pub mod api;
pub mod client;
pub mod mock;
pub mod mode;
pub mod source;
pub mod types;

pub use api::UnsplashApi;
pub use client::{PhotoSearch, SearchSettings, PER_PAGE};
pub use mock::{mock_results, MockPhotos};
pub use mode::{Credential, OperatingMode};
pub use source::PhotoSource;
pub use types::{PhotoUrls, SearchResult, UnsplashPhoto};
