use serde::{Deserialize, Serialize};

/// The three renditions a picker needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUrls {
    pub thumb: String,
    pub small: String,
    pub regular: String,
}

/// A search hit, reduced to the fields the page builder uses. Provider
/// fields not listed here are dropped on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsplashPhoto {
    pub id: String,
    pub urls: PhotoUrls,
    #[serde(default)]
    pub alt_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub results: Vec<UnsplashPhoto>,
    pub total: u64,
}

/// `{"errors": [...]}` body the provider sends with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub errors: Vec<String>,
}
