//! # JSON-RPC Transport
//!
//! Bugzilla exposes its WebService at a fixed path of the installation (`/jsonrpc.cgi`).
//! Each call is a POST of a JSON-RPC envelope:
//!
//! ```json
//! { "method": "Bug.get", "params": [{ "ids": [618271] }], "id": 1 }
//! ```
//!
//! and the server answers with either a `result` or an `error` member.
//!
//! The scheme is derived from the port, mirroring how Bugzilla installations are usually
//! published: port `443` means HTTPS, any other port means plain HTTP.
use super::{Transport, TransportError};
use crate::args::Params;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub const SERVICE_PATH: &str = "/jsonrpc.cgi";
pub const DEFAULT_PORT: u16 = 443;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug)]
pub struct JsonRpcTransport {
    http: Client,
    endpoint: Url,
    next_id: AtomicU64,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    method: &'a str,
    params: [Params; 1],
    id: u64,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default, deserialize_with = "present")]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcFault>,
}

#[derive(Deserialize)]
struct RpcFault {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

impl JsonRpcTransport {
    /// Creates a transport for the Bugzilla installation on `server`.
    ///
    /// # Arguments
    ///
    /// * `server` - Host name of the installation (e.g. `bugzilla.redhat.com`).
    /// * `port` - `443` selects HTTPS, anything else plain HTTP on that port.
    pub fn new(server: &str, port: u16) -> Result<Self, TransportError> {
        Self::with_timeout(server, port, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(server: &str, port: u16, timeout: Duration) -> Result<Self, TransportError> {
        let endpoint = endpoint_url(server, port)?;
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoint,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Transport for JsonRpcTransport {
    async fn send(&self, command: &str, params: Params) -> Result<Value, TransportError> {
        let request = RpcRequest {
            method: command,
            params: [params],
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let envelope: RpcResponse = serde_json::from_slice(&body)
            .map_err(|e| TransportError::MalformedResponse(e.to_string()))?;

        into_result(envelope)
    }
}

fn endpoint_url(server: &str, port: u16) -> Result<Url, TransportError> {
    let server = server.trim();
    if server.is_empty() || server.contains('/') {
        return Err(TransportError::InvalidEndpoint(server.to_string()));
    }

    let raw = if port == DEFAULT_PORT {
        format!("https://{server}{SERVICE_PATH}")
    } else {
        format!("http://{server}:{port}{SERVICE_PATH}")
    };

    Url::parse(&raw).map_err(|_| TransportError::InvalidEndpoint(raw))
}

/// Keeps a `"result": null` member apart from a missing one.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn into_result(envelope: RpcResponse) -> Result<Value, TransportError> {
    if let Some(fault) = envelope.error {
        return Err(TransportError::Fault {
            code: fault.code,
            message: fault.message,
        });
    }

    envelope
        .result
        .ok_or_else(|| TransportError::MalformedResponse("missing 'result' member".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> Result<Value, TransportError> {
        into_result(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn port_443_selects_https() {
        let url = endpoint_url("bugzilla.redhat.com", 443).unwrap();
        assert_eq!(url.as_str(), "https://bugzilla.redhat.com/jsonrpc.cgi");
    }

    #[test]
    fn other_ports_select_plain_http() {
        let url = endpoint_url("localhost", 8080).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/jsonrpc.cgi");
    }

    #[test]
    fn rejects_hosts_that_are_not_host_names() {
        assert!(matches!(
            endpoint_url("", 443),
            Err(TransportError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            endpoint_url("example.com/bugzilla", 443),
            Err(TransportError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn serializes_params_as_single_element_array() {
        let mut params = Params::new();
        params.insert("ids".into(), json!([618271]));

        let request = RpcRequest {
            method: "Bug.get",
            params: [params],
            id: 7,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "method": "Bug.get", "params": [{ "ids": [618271] }], "id": 7 })
        );
    }

    #[test]
    fn returns_result_member() {
        let value = decode(json!({ "result": { "version": "4.4" }, "error": null, "id": 1 }));
        assert_eq!(value.unwrap(), json!({ "version": "4.4" }));
    }

    #[test]
    fn maps_error_member_to_fault() {
        let err = decode(json!({
            "result": null,
            "error": { "code": 101, "message": "Bug #0 does not exist." },
            "id": 1
        }))
        .unwrap_err();

        assert!(matches!(
            err,
            TransportError::Fault { code: 101, ref message } if message == "Bug #0 does not exist."
        ));
    }

    #[test]
    fn null_result_is_returned_as_null() {
        let value = decode(json!({ "result": null, "error": null, "id": 3 }));
        assert_eq!(value.unwrap(), Value::Null);
    }

    #[test]
    fn missing_result_is_malformed() {
        let err = decode(json!({ "id": 1 })).unwrap_err();
        assert!(matches!(err, TransportError::MalformedResponse(_)));
    }
}
