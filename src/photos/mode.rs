use crate::error::PagebuilderError;

/// What a live request authenticates with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    OAuthToken(String),
    PublicKey(String),
}

impl Credential {
    /// Value of the `Authorization` header.
    pub fn header_value(&self) -> String {
        match self {
            Credential::OAuthToken(token) => format!("Bearer {token}"),
            Credential::PublicKey(key) => format!("Client-ID {key}"),
        }
    }

    pub fn mode_name(&self) -> &'static str {
        match self {
            Credential::OAuthToken(_) => "oauth",
            Credential::PublicKey(_) => "public-key",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatingMode {
    Dummy,
    Live(Credential),
}

impl OperatingMode {
    /// Dummy wins over everything; an OAuth token wins over the public key.
    pub fn select(
        dummy_mode: bool,
        access_token: Option<String>,
        public_key: Option<&str>,
    ) -> Result<Self, PagebuilderError> {
        if dummy_mode {
            return Ok(OperatingMode::Dummy);
        }
        if let Some(token) = access_token.filter(|t| !t.is_empty()) {
            return Ok(OperatingMode::Live(Credential::OAuthToken(token)));
        }
        match public_key.filter(|k| !k.is_empty()) {
            Some(key) => Ok(OperatingMode::Live(Credential::PublicKey(key.to_string()))),
            None => Err(PagebuilderError::MissingConfig(
                "unsplash.accessKey is not set and no OAuth login is active".into(),
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OperatingMode::Dummy => "dummy",
            OperatingMode::Live(credential) => credential.mode_name(),
        }
    }
}

impl std::fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
