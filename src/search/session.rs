//! Bearer-token session for the CC98 API.
//!
//! The token has no known expiry; it is replaced whenever a call shows it is
//! stale. Refreshes are serialized by the session lock.

use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::Cc98Config;
use crate::types::{AppError, AppResult};

const TOKEN_SCOPE: &str = "cc98-api openid offline_access";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36 Edg/119.0.0.0";

#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub obtained_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

pub struct TokenSession {
    client: Client,
    config: Cc98Config,
    current: Mutex<Option<AuthSession>>,
}

impl TokenSession {
    pub fn new(client: Client, config: Cc98Config) -> Self {
        Self {
            client,
            config,
            current: Mutex::new(None),
        }
    }

    /// Token currently attached to requests, if any.
    pub async fn token(&self) -> Option<String> {
        self.current.lock().await.as_ref().map(|s| s.access_token.clone())
    }

    pub async fn session(&self) -> Option<AuthSession> {
        self.current.lock().await.clone()
    }

    /// Obtain a token if none has been acquired yet.
    pub async fn ensure(&self) -> AppResult<String> {
        let mut current = self.current.lock().await;
        if let Some(session) = current.as_ref() {
            return Ok(session.access_token.clone());
        }
        let session = self.exchange().await?;
        let token = session.access_token.clone();
        *current = Some(session);
        Ok(token)
    }

    /// Replace the token the caller saw rejected.
    ///
    /// If another caller already replaced `stale` while we waited for the
    /// lock, the newer token is returned without a second exchange.
    pub async fn refresh(&self, stale: Option<&str>) -> AppResult<String> {
        let mut current = self.current.lock().await;
        if let Some(session) = current.as_ref() {
            if Some(session.access_token.as_str()) != stale {
                return Ok(session.access_token.clone());
            }
        }
        let session = self.exchange().await?;
        let token = session.access_token.clone();
        *current = Some(session);
        Ok(token)
    }

    /// GET with the browser user agent and, when present, the bearer token.
    pub async fn authorized_get(&self, url: &str) -> RequestBuilder {
        let request = self.client.get(url).header(reqwest::header::USER_AGENT, USER_AGENT);
        match self.token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn exchange(&self) -> AppResult<AuthSession> {
        if !self.config.has_credentials() {
            return Err(AppError::Configuration("CC98 credentials not configured".to_string()));
        }

        let form = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("grant_type", "password"),
            ("username", self.config.username.as_str()),
            ("password", self.config.password.as_str()),
            ("scope", TOKEN_SCOPE),
        ];

        let response = self
            .client
            .post(&self.config.auth_url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "CC98 token exchange rejected");
            return Err(AppError::Auth(format!("token endpoint returned {}", status)));
        }

        let body: TokenResponse = serde_json::from_str(&response.text().await?)?;
        let access_token = body
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::MalformedResponse("token response without access_token".to_string()))?;

        info!("CC98 token refreshed");
        Ok(AuthSession {
            access_token,
            obtained_at: Utc::now(),
        })
    }
}
