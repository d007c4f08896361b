pub mod callback;
pub mod flow;
pub mod navigator;
pub mod pkce;
pub mod store;
pub mod token;

pub use callback::{listen_for_callback, loopback_port};
pub use flow::{OAuthSettings, PkceAuth};
pub use navigator::{BrowserNavigator, Navigator, PrintNavigator};
pub use pkce::{generate_pkce, PkceCrypto, PkceState, SystemCrypto};
pub use store::{FileStore, MemoryStore, SessionStore, PKCE_KEY, TOKEN_KEY};
pub use token::{exchange_code, TokenRequest, TokenResponse};

/// Anything that can hand out the current OAuth access token.
pub trait TokenSource: Send + Sync {
    fn access_token(&self) -> Option<String>;
}
