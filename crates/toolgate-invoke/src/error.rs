// error.rs — Error types for downstream invocation.

use thiserror::Error;

/// Errors from talking to the downstream gateway.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The request never got a response (DNS, connect, timeout).
    #[error("gateway transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
