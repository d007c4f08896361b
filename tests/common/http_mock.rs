use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Start a mock Unsplash server whose token endpoint hands out `token`.
#[allow(dead_code)]
pub async fn start_token_server(token: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": token,
            "token_type": "bearer",
            "scope": "public",
            "created_at": 1_700_000_000
        })))
        .mount(&server)
        .await;
    server
}

/// Provider-shaped search response with `count` hits.
#[allow(dead_code)]
pub fn search_body(count: usize) -> serde_json::Value {
    let results: Vec<_> = (0..count)
        .map(|i| {
            serde_json::json!({
                "id": format!("photo-{i}"),
                "width": 4000,
                "height": 3000,
                "alt_description": format!("photo number {i}"),
                "urls": {
                    "raw": format!("https://images.unsplash.com/photo-{i}"),
                    "full": format!("https://images.unsplash.com/photo-{i}?q=100"),
                    "regular": format!("https://images.unsplash.com/photo-{i}?w=1080"),
                    "small": format!("https://images.unsplash.com/photo-{i}?w=400"),
                    "thumb": format!("https://images.unsplash.com/photo-{i}?w=200")
                },
                "user": { "name": "Someone" }
            })
        })
        .collect();
    serde_json::json!({
        "total": 1234,
        "total_pages": 62,
        "results": results
    })
}

/// Start a mock Unsplash server answering `/search/photos` with `count` hits.
#[allow(dead_code)]
pub async fn start_search_server(count: usize) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/photos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(count)))
        .mount(&server)
        .await;
    server
}
