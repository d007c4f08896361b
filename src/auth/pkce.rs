use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// RFC 7636 unreserved characters.
const UNRESERVED: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";

pub const VERIFIER_LEN: usize = 128;
pub const STATE_LEN: usize = 32;

/// Source of randomness and hashing for the PKCE flow.
pub trait PkceCrypto: Send + Sync {
    fn fill_random(&self, buf: &mut [u8]);

    fn sha256(&self, input: &[u8]) -> Vec<u8>;
}

/// Thread-local CSPRNG and `sha2`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCrypto;

impl PkceCrypto for SystemCrypto {
    fn fill_random(&self, buf: &mut [u8]) {
        rand::Rng::fill_bytes(&mut rand::rng(), buf);
    }

    fn sha256(&self, input: &[u8]) -> Vec<u8> {
        Sha256::digest(input).to_vec()
    }
}

/// Parameters of one login attempt, persisted between redirect and callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PkceState {
    pub code_verifier: String,
    pub code_challenge: String,
    pub state: String,
}

pub fn random_string(crypto: &dyn PkceCrypto, len: usize) -> String {
    let mut buf = vec![0u8; len];
    crypto.fill_random(&mut buf);
    buf.iter()
        .map(|b| UNRESERVED[*b as usize % UNRESERVED.len()] as char)
        .collect()
}

/// `base64url(SHA-256(verifier))` without padding.
pub fn code_challenge(crypto: &dyn PkceCrypto, verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(crypto.sha256(verifier.as_bytes()))
}

pub fn generate_pkce(crypto: &dyn PkceCrypto) -> PkceState {
    let code_verifier = random_string(crypto, VERIFIER_LEN);
    let code_challenge = code_challenge(crypto, &code_verifier);
    let state = random_string(crypto, STATE_LEN);

    PkceState {
        code_verifier,
        code_challenge,
        state,
    }
}
