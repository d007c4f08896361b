use serde::{Deserialize, Serialize};

use crate::error::CallbackFailure;

/// JSON body of the authorization-code grant.
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub client_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<&'a str>,
    pub code: &'a str,
    pub redirect_uri: &'a str,
    pub grant_type: &'static str,
    pub code_verifier: &'a str,
}

impl<'a> TokenRequest<'a> {
    pub fn authorization_code(
        client_id: &'a str,
        client_secret: Option<&'a str>,
        code: &'a str,
        redirect_uri: &'a str,
        code_verifier: &'a str,
    ) -> Self {
        Self {
            client_id,
            client_secret,
            code,
            redirect_uri,
            grant_type: "authorization_code",
            code_verifier,
        }
    }
}

/// Raw token response from the authorization server.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub created_at: Option<i64>,
}

pub async fn exchange_code(
    client: &reqwest::Client,
    token_endpoint: &str,
    request: &TokenRequest<'_>,
) -> Result<TokenResponse, CallbackFailure> {
    let resp = client
        .post(token_endpoint)
        .json(request)
        .send()
        .await
        .map_err(|e| CallbackFailure::Transport(e.to_string()))?;

    if !resp.status().is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(CallbackFailure::TokenExchange(body));
    }

    resp.json::<TokenResponse>()
        .await
        .map_err(|e| CallbackFailure::Transport(format!("Failed to parse token response: {e}")))
}
