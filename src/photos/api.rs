use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};

use crate::error::PagebuilderError;

use super::mode::Credential;
use super::source::PhotoSource;
use super::types::{ErrorBody, SearchResult};

/// HTTP client for the Unsplash REST API, bound to one credential.
pub struct UnsplashApi {
    client: reqwest::Client,
    base_url: String,
}

impl std::fmt::Debug for UnsplashApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnsplashApi")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl UnsplashApi {
    pub fn new(base_url: &str, credential: &Credential) -> Result<Self, PagebuilderError> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&credential.header_value()).map_err(|e| {
            PagebuilderError::ConfigError {
                path: "<config>".into(),
                detail: format!("Unsplash credential is not a valid header value: {e}"),
            }
        })?;
        headers.insert(reqwest::header::AUTHORIZATION, auth);
        headers.insert("Accept-Version", HeaderValue::from_static("v1"));
        headers.insert(
            reqwest::header::ACCEPT,
            HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| PagebuilderError::TransportError(Box::new(e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self, query: &str, per_page: u32) -> Result<Url, PagebuilderError> {
        let raw = format!("{}/search/photos", self.base_url);
        let mut url = Url::parse(&raw).map_err(|e| PagebuilderError::ConfigError {
            path: "<config>".into(),
            detail: format!("Invalid API URL '{raw}': {e}"),
        })?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("per_page", &per_page.to_string());
        Ok(url)
    }
}

#[async_trait]
impl PhotoSource for UnsplashApi {
    async fn search(&self, query: &str, per_page: u32) -> Result<SearchResult, PagebuilderError> {
        let url = self.search_url(query, per_page)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PagebuilderError::TransportError(Box::new(e)))?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            tracing::warn!("Unsplash answered 403 for search '{query}'");
            return Err(PagebuilderError::RateLimited);
        }

        let body = response
            .text()
            .await
            .map_err(|e| PagebuilderError::TransportError(Box::new(e)))?;

        if !status.is_success() {
            return Err(provider_error(status, &body));
        }

        serde_json::from_str::<SearchResult>(&body).map_err(|e| {
            PagebuilderError::ProtocolError(format!("Failed to parse search response: {e}"))
        })
    }
}

/// Join the provider's `errors` list; anything else keeps its raw body.
fn provider_error(status: StatusCode, body: &str) -> PagebuilderError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => {
            PagebuilderError::ProviderError(parsed.errors.join(", "))
        }
        _ => PagebuilderError::ProviderError(format!("status {status}: {}", body.trim())),
    }
}
