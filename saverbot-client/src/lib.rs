//! Typed client for the luogu-saver article archive API.
//!
//! Submodules provide the HTTP client wrapper and the response models. The
//! archive wraps every payload in a status envelope; callers get that
//! envelope back undigested, because logical success is a policy decision
//! that belongs to whoever renders the reply.

pub mod client;
pub mod types;

pub use client::{RecentQuery, SaverApi};

use saverbot_http::HttpError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaverError {
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
    #[error("invalid user agent: {0}")]
    UserAgent(String),
    /// The server answered with a non-success HTTP status.
    #[error("request failed with status {status}")]
    Transport { status: u16 },
    #[error(transparent)]
    Http(HttpError),
}

/// Pull the transport status out into its own variant; everything else
/// (network, decode, URL) stays wrapped.
pub(crate) fn lift(err: HttpError) -> SaverError {
    match err {
        HttpError::Status { status, .. } => SaverError::Transport {
            status: status.as_u16(),
        },
        other => SaverError::Http(other),
    }
}
