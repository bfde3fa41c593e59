//! # toolgate-invoke
//!
//! HTTP client for forwarding allowed tool invocations to a downstream
//! gateway. The policy engine decides; this crate only delivers.
//!
//! A non-2xx response from the gateway is a normal [`InvokeOutcome`], not
//! an error — the caller surfaces it as text. Only transport-level
//! failures (connection refused, timeout) become [`InvokeError`]s.

pub mod client;
pub mod error;

pub use client::{InvokeClient, InvokeOutcome};
pub use error::InvokeError;
