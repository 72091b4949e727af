//! JSON-RPC 2.0 envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol version put on every request.
pub const VERSION: &str = "2.0";

/// Enumerate methods understood by the server web controllers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Method {
    /// Route the call to the controller behind the request path.
    #[serde(rename = "call")]
    #[default]
    Call,
}

/// Request sent to the server.
#[derive(Debug, Serialize)]
pub struct Request<P>
where
    P: Serialize,
{
    jsonrpc: &'static str,
    method: Method,
    params: P,
}

impl<P> Request<P>
where
    P: Serialize,
{
    /// Wrap `params` in a `call` request.
    pub fn call(params: P) -> Self {
        Request {
            jsonrpc: VERSION,
            method: Method::Call,
            params,
        }
    }
}

/// Response read from the server.
///
/// Both members are optional: servers are not trusted to follow the
/// protocol, callers decide what a missing `result` means.
#[derive(Debug, Deserialize)]
pub struct Response<R> {
    /// Outcome of the call.
    #[serde(default)]
    pub result: Option<R>,
    /// Set when the server refused the call.
    #[serde(default)]
    pub error: Option<RpcError>,
}

/// Error member of a [`Response`].
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RpcError {
    /// Error code, usually `200` for application errors.
    #[serde(default)]
    pub code: Option<i64>,
    /// Human readable reason.
    #[serde(default)]
    pub message: Option<String>,
    /// Server side details (exception name, traceback...).
    #[serde(default)]
    pub data: Option<Value>,
}
