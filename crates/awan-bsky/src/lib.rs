//! Minimal ATProto XRPC client for Awan.
//!
//! Supports exactly what the daemon needs: create a session, keep it
//! refreshed, and publish `app.bsky.feed.post` records.

mod client;
mod error;
mod types;

pub use client::BskyClient;
pub use error::BskyError;
pub use types::{CreateRecordResponse, PostRecord, Session};
