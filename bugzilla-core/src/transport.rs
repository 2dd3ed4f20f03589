//! # Transport
//!
//! The seam between the command layer and the wire. A [`Transport`] receives a fully
//! qualified command name (`Bug.get`) and its canonical parameter mapping, and returns the
//! server's response untouched.
//!
//! The crate ships [`json_rpc::JsonRpcTransport`], which speaks Bugzilla's JSON-RPC endpoint
//! over HTTP(S). Any other implementation (a fake server in tests, an XML-RPC client, ...)
//! can be plugged into [`crate::client::BugzillaClient::new`].
pub mod json_rpc;

use crate::args::Params;
use std::future::Future;

/// Failures raised by a [`Transport`]. The command layer never interprets them.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Invalid endpoint '{0}'")]
    InvalidEndpoint(String),
    #[error("HTTP request failed: '{0}'")]
    Http(#[from] reqwest::Error),
    #[error("Server answered with HTTP status {status}: '{body}'")]
    Status { status: u16, body: String },
    #[error("Server returned fault {code}: {message}")]
    Fault { code: i64, message: String },
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Performs a single remote call.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        command: &str,
        params: Params,
    ) -> impl Future<Output = Result<serde_json::Value, TransportError>> + Send;
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    fn send(
        &self,
        command: &str,
        params: Params,
    ) -> impl Future<Output = Result<serde_json::Value, TransportError>> + Send {
        (**self).send(command, params)
    }
}
