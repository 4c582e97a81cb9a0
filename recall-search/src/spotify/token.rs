//! Access-token providers for the catalog API.
//!
//! A [`TokenProvider`] hands out bearer tokens together with their expiry.
//! Providers are ordinary values owned by whoever builds the catalog client,
//! so their cache lives exactly as long as the caller keeps them.

use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;

use super::schema::TokenResponse;

/// Tokens are refreshed this long before the catalog says they expire.
pub const REFRESH_MARGIN: Duration = Duration::from_secs(300);

/// A bearer token and the instant after which it must not be used.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: Instant,
}

impl AccessToken {
    /// Whether the token can still be used at `now`.
    pub fn is_valid_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Source of bearer tokens for catalog requests.
pub trait TokenProvider: Send + Sync {
    /// Return a token valid for at least the next request.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Auth`] if no token can be obtained.
    fn token(&self) -> impl std::future::Future<Output = Result<AccessToken, SearchError>> + Send;
}

/// Serves one fixed token that never expires.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    value: String,
}

impl StaticTokenProvider {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl TokenProvider for StaticTokenProvider {
    async fn token(&self) -> Result<AccessToken, SearchError> {
        Ok(AccessToken {
            value: self.value.clone(),
            // Far enough out to never matter; `Instant` has no MAX.
            expires_at: Instant::now() + Duration::from_secs(365 * 24 * 60 * 60),
        })
    }
}

/// Application credentials for the client-credentials grant.
#[derive(Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// OAuth client-credentials provider with an in-instance token cache.
///
/// The first call performs the exchange; later calls reuse the cached token
/// until [`REFRESH_MARGIN`] before its expiry. Concurrent callers wait on
/// the same lock, so at most one exchange is in flight per provider.
#[derive(Debug)]
pub struct ClientCredentialsProvider {
    client: reqwest::Client,
    token_url: String,
    credentials: ClientCredentials,
    cached: Mutex<Option<AccessToken>>,
}

impl ClientCredentialsProvider {
    /// Build a provider using the token endpoint and HTTP settings in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Auth`] if either credential is blank, or
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(credentials: ClientCredentials, config: &SearchConfig) -> Result<Self, SearchError> {
        if credentials.client_id.trim().is_empty() || credentials.client_secret.trim().is_empty() {
            return Err(SearchError::Auth("catalog credentials not configured".into()));
        }
        Ok(Self {
            client: http::build_client(config)?,
            token_url: config.token_url.clone(),
            credentials,
            cached: Mutex::new(None),
        })
    }

    async fn exchange(&self) -> Result<AccessToken, SearchError> {
        tracing::debug!("requesting catalog access token");
        let requested_at = Instant::now();

        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| SearchError::Auth(format!("token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Auth(format!(
                "token request returned status {}",
                status.as_u16()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Auth(format!("token response read failed: {e}")))?;
        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| SearchError::Parse(format!("token response: {e}")))?;
        if parsed.access_token.is_empty() {
            return Err(SearchError::Auth("no access token in response".into()));
        }

        let lifetime = Duration::from_secs(parsed.expires_in).saturating_sub(REFRESH_MARGIN);
        Ok(AccessToken {
            value: parsed.access_token,
            expires_at: requested_at + lifetime,
        })
    }
}

impl TokenProvider for ClientCredentialsProvider {
    async fn token(&self) -> Result<AccessToken, SearchError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.is_valid_at(Instant::now()) {
                return Ok(token.clone());
            }
        }
        let fresh = self.exchange().await?;
        *cached = Some(fresh.clone());
        Ok(fresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(id: &str, secret: &str) -> ClientCredentials {
        ClientCredentials {
            client_id: id.into(),
            client_secret: secret.into(),
        }
    }

    #[tokio::test]
    async fn static_provider_returns_value() {
        let provider = StaticTokenProvider::new("fixed");
        let token = provider.token().await.expect("token");
        assert_eq!(token.value, "fixed");
        assert!(token.is_valid_at(Instant::now()));
    }

    #[test]
    fn blank_credentials_rejected() {
        let err = ClientCredentialsProvider::new(credentials("", "secret"), &SearchConfig::default())
            .unwrap_err();
        assert!(matches!(err, SearchError::Auth(_)));
        assert!(ClientCredentialsProvider::new(credentials("id", " "), &SearchConfig::default())
            .is_err());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let creds = credentials("my-id", "top-secret");
        let printed = format!("{creds:?}");
        assert!(printed.contains("my-id"));
        assert!(!printed.contains("top-secret"));

        let token = AccessToken {
            value: "bearer-value".into(),
            expires_at: Instant::now(),
        };
        assert!(!format!("{token:?}").contains("bearer-value"));
    }

    #[test]
    fn token_validity_boundary() {
        let now = Instant::now();
        let token = AccessToken {
            value: "v".into(),
            expires_at: now + Duration::from_secs(1),
        };
        assert!(token.is_valid_at(now));
        assert!(!token.is_valid_at(now + Duration::from_secs(1)));
    }
}
