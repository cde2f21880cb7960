//! ATProto XRPC client implementation.

use std::sync::Arc;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::types::XrpcErrorBody;
use crate::{BskyError, CreateRecordResponse, PostRecord, Session};

/// The post record collection written by [`BskyClient::publish`].
const POST_COLLECTION: &str = "app.bsky.feed.post";

/// Client for publishing posts to an ATProto PDS.
pub struct BskyClient {
    http: Client,
    pds_url: String,
    session: Arc<RwLock<Option<Session>>>,
}

impl BskyClient {
    /// Create a new client for the given PDS URL.
    pub fn new(pds_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            pds_url: pds_url.into(),
            session: Arc::new(RwLock::new(None)),
        }
    }

    /// Authenticate with the PDS using handle and app password.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<(), BskyError> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            identifier: &'a str,
            password: &'a str,
        }

        let url = format!("{}/xrpc/com.atproto.server.createSession", self.pds_url);

        let response = self
            .http
            .post(&url)
            .json(&LoginRequest {
                identifier,
                password,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.map_err(|e| {
                BskyError::Auth(format!(
                    "login failed ({}): failed to read response: {}",
                    status, e
                ))
            })?;
            return Err(BskyError::Auth(format!(
                "login failed ({}): {}",
                status, text
            )));
        }

        let session: Session = response.json().await?;
        debug!(did = %session.did, handle = %session.handle, "authenticated with PDS");

        *self.session.write().await = Some(session);
        Ok(())
    }

    /// Refresh the current session tokens.
    pub async fn refresh_session(&self) -> Result<(), BskyError> {
        let refresh_jwt = {
            let session = self.session.read().await;
            session
                .as_ref()
                .map(|s| s.refresh_jwt.clone())
                .ok_or_else(|| BskyError::Auth("no session to refresh".to_string()))?
        };

        let url = format!("{}/xrpc/com.atproto.server.refreshSession", self.pds_url);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", refresh_jwt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.map_err(|e| {
                BskyError::Auth(format!(
                    "refresh failed ({}): failed to read response: {}",
                    status, e
                ))
            })?;
            return Err(BskyError::Auth(format!(
                "refresh failed ({}): {}",
                status, text
            )));
        }

        let session: Session = response.json().await?;
        debug!(did = %session.did, "refreshed session");

        *self.session.write().await = Some(session);
        Ok(())
    }

    /// Get the current session DID.
    pub async fn did(&self) -> Option<String> {
        self.session.read().await.as_ref().map(|s| s.did.clone())
    }

    /// Get the current access token.
    async fn access_token(&self) -> Result<String, BskyError> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.access_jwt.clone())
            .ok_or_else(|| BskyError::Auth("not authenticated".to_string()))
    }

    /// Check if an error indicates an expired token.
    fn is_expired_token_error(err: &BskyError) -> bool {
        matches!(
            err,
            BskyError::Xrpc { error, .. } if error == "ExpiredToken"
        )
    }

    /// Try to refresh the session if possible.
    async fn try_refresh(&self) -> bool {
        match self.refresh_session().await {
            Ok(()) => {
                debug!("automatically refreshed expired session");
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to auto-refresh session");
                false
            }
        }
    }

    /// Publish a post.
    ///
    /// `Ok(true)` means the PDS accepted the record. `Ok(false)` means it
    /// rejected the request itself (a 4xx XRPC error such as an invalid
    /// record); rejections never raise. Transport failures, rate limits
    /// and server-side errors are returned as `Err`.
    pub async fn publish(&self, text: &str) -> Result<bool, BskyError> {
        let mut refreshed = false;
        loop {
            match self.create_post(text).await {
                Ok(created) => {
                    debug!(uri = %created.uri, "post created");
                    return Ok(true);
                }
                Err(ref e) if Self::is_expired_token_error(e) && !refreshed => {
                    refreshed = true;
                    if self.try_refresh().await {
                        continue;
                    }
                    return Err(BskyError::Auth("session expired and refresh failed".into()));
                }
                Err(BskyError::Xrpc {
                    status,
                    error,
                    message,
                }) if (400..500).contains(&status) => {
                    warn!(status, error = %error, message = %message, "post rejected by PDS");
                    return Ok(false);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn create_post(&self, text: &str) -> Result<CreateRecordResponse, BskyError> {
        let did = self
            .did()
            .await
            .ok_or_else(|| BskyError::Auth("not authenticated".to_string()))?;

        #[derive(Serialize)]
        struct CreateRequest<'a> {
            repo: &'a str,
            collection: &'a str,
            record: serde_json::Value,
        }

        // ATProto records must carry $type alongside their fields
        let record = PostRecord {
            text: text.to_string(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        let mut record_value = serde_json::to_value(&record)?;
        if let serde_json::Value::Object(ref mut map) = record_value {
            map.insert(
                "$type".to_string(),
                serde_json::Value::String(POST_COLLECTION.to_string()),
            );
        }

        let url = format!("{}/xrpc/com.atproto.repo.createRecord", self.pds_url);
        let token = self.access_token().await?;

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", token))
            .json(&CreateRequest {
                repo: &did,
                collection: POST_COLLECTION,
                record: record_value,
            })
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, BskyError> {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok());
            return Err(BskyError::RateLimited { retry_after_secs });
        }

        if !status.is_success() {
            let text = response.text().await.map_err(|e| {
                BskyError::InvalidResponse(format!(
                    "request failed ({}): failed to read response: {}",
                    status, e
                ))
            })?;

            if let Ok(xrpc_error) = serde_json::from_str::<XrpcErrorBody>(&text) {
                return Err(BskyError::Xrpc {
                    status: status.as_u16(),
                    error: xrpc_error.error,
                    message: xrpc_error.message,
                });
            }

            return Err(BskyError::InvalidResponse(format!(
                "request failed ({}): {}",
                status, text
            )));
        }

        let body = response.json().await?;
        Ok(body)
    }
}
