use std::fmt;
use std::time::Duration;

use url::Url;

use crate::ChannelError;

#[derive(Debug, Clone)]
pub struct ChannelSettings {
    /// `ws://`/`wss://` URL or a bare `host:port`.
    pub endpoint: String,
    pub connect_timeout: Duration,
    /// Query parameter carrying the credential on the handshake request.
    pub credential_param: String,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            endpoint: "ws://127.0.0.1:7000/".to_string(),
            connect_timeout: Duration::from_secs(10),
            credential_param: "token".to_string(),
        }
    }
}

impl ChannelSettings {
    /// Builds the handshake URL with the credential attached.
    pub fn session_url(&self, credential: &Credential) -> Result<Url, ChannelError> {
        let endpoint = self.endpoint.trim();
        let mut url = if endpoint.contains("://") {
            Url::parse(endpoint)
        } else {
            Url::parse(&format!("ws://{endpoint}"))
        }
        .map_err(|err| ChannelError::InvalidEndpoint(err.to_string()))?;

        if !matches!(url.scheme(), "ws" | "wss") {
            return Err(ChannelError::InvalidEndpoint(format!(
                "unsupported scheme {}",
                url.scheme()
            )));
        }
        if let Some(token) = credential.expose() {
            url.query_pairs_mut()
                .append_pair(&self.credential_param, token);
        }
        Ok(url)
    }
}

/// Opaque token issued by the session collaborator.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(Option<String>);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        if token.is_empty() {
            Self(None)
        } else {
            Self(Some(token))
        }
    }

    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn expose(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("Credential(<redacted>)"),
            None => f.write_str("Credential(None)"),
        }
    }
}
