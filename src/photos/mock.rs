use std::time::Duration;

use async_trait::async_trait;

use crate::error::PagebuilderError;

use super::source::PhotoSource;
use super::types::{PhotoUrls, SearchResult, UnsplashPhoto};

const SAMPLE_URLS: [&str; 5] = [
    "https://images.unsplash.com/photo-1541214113241-21578d2d9b62?q=80&w=700",
    "https://plus.unsplash.com/premium_photo-1713793236612-50c9bfedbe07?q=80&w=700",
    "https://images.unsplash.com/photo-1678033382919-fa907632fdda?q=80&w=700",
    "https://images.unsplash.com/photo-1612392166886-ee8475b03af2?q=80&w=700",
    "https://plus.unsplash.com/premium_photo-1683121324502-94bd9fa0202e?q=80&w=700",
];

const PREVIEW_WIDTH: &str = "w=700";
const REGULAR_WIDTH: &str = "w=1080";

/// Offline stand-in for the photo API.
#[derive(Debug, Clone)]
pub struct MockPhotos {
    latency: Duration,
}

impl MockPhotos {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl PhotoSource for MockPhotos {
    async fn search(&self, query: &str, per_page: u32) -> Result<SearchResult, PagebuilderError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(mock_results(query, per_page as usize))
    }
}

/// `count` photos cycling through the sample pool. Ids are positional; only
/// the alt text mentions the query.
pub fn mock_results(query: &str, count: usize) -> SearchResult {
    let results: Vec<UnsplashPhoto> = SAMPLE_URLS
        .iter()
        .cycle()
        .take(count)
        .enumerate()
        .map(|(i, url)| UnsplashPhoto {
            id: format!("mock-{i}"),
            urls: PhotoUrls {
                thumb: url.to_string(),
                small: url.to_string(),
                regular: url.replace(PREVIEW_WIDTH, REGULAR_WIDTH),
            },
            alt_description: Some(format!("Mock {query} photo {}", i + 1)),
        })
        .collect();

    SearchResult {
        total: results.len() as u64,
        results,
    }
}
