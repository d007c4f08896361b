use async_trait::async_trait;

use crate::error::PagebuilderError;

use super::types::SearchResult;

impl std::fmt::Debug for dyn PhotoSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoSource").finish()
    }
}

#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Search photos matching `query`, returning at most `per_page` hits.
    async fn search(&self, query: &str, per_page: u32) -> Result<SearchResult, PagebuilderError>;
}
