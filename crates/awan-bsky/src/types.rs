//! Session and wire types for the XRPC client.

use serde::{Deserialize, Serialize};

/// An authenticated PDS session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub did: String,
    pub handle: String,
    pub access_jwt: String,
    pub refresh_jwt: String,
}

/// An `app.bsky.feed.post` record.
#[derive(Debug, Clone, Serialize)]
pub struct PostRecord {
    pub text: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Response from creating a record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecordResponse {
    pub uri: String,
    pub cid: String,
}

/// XRPC error body.
#[derive(Debug, Deserialize)]
pub(crate) struct XrpcErrorBody {
    pub error: String,
    #[serde(default)]
    pub message: String,
}
