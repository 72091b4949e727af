//! HTTP transport for JSON-RPC calls.

use std::time::Duration;

use error::{Error, Result};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::models::jsonrpc::{Request, Response};
use crate::models::session::{Credentials, Session};

/// Controller checking credentials and opening a session.
pub const AUTHENTICATE_PATH: &str = "/web/session/authenticate";

/// JSON-RPC client bound to one server.
#[derive(Clone, Debug)]
pub struct Client {
    url: Url,
    http: reqwest::Client,
}

impl Client {
    /// Create a new [`Client`] without sending anything.
    pub fn new<T: AsRef<str>>(url: T) -> Result<Self> {
        Self::with_http_client(url, reqwest::Client::new())
    }

    /// Create a [`Client`] whose requests give up after `timeout`.
    pub fn with_timeout<T: AsRef<str>>(
        url: T,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_http_client(url, http)
    }

    /// Create a [`Client`] on top of an already configured HTTP client
    /// (proxy, TLS roots, cookie store...).
    pub fn with_http_client<T: AsRef<str>>(
        url: T,
        http: reqwest::Client,
    ) -> Result<Self> {
        let mut url = Url::parse(url.as_ref())?;

        match url.scheme() {
            "http" | "https" => {},
            scheme => return Err(Error::UnsupportedScheme(scheme.to_owned())),
        }
        if url.host_str().is_none() {
            return Err(Error::URL(url::ParseError::EmptyHost));
        }

        // Only the origin and path prefix matter.
        url.set_query(None);
        url.set_fragment(None);

        Ok(Client { url, http })
    }

    /// Base address of the server.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Append `path` to the base address, keeping its path prefix.
    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    /// Send one `call` request and return its `result`.
    ///
    /// An `error` member always wins. Otherwise the `result` is only
    /// accepted along with a `200 OK`.
    async fn call<P>(&self, path: &str, params: P) -> Result<Value>
    where
        P: Serialize,
    {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "sending json-rpc call");

        let response = self
            .http
            .post(url)
            .json(&Request::call(params))
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        let Response { result, error } =
            match serde_json::from_slice::<Response<Value>>(&body) {
                Ok(response) => response,
                Err(err) => {
                    tracing::debug!(%status, %err, "undecodable response body");
                    return Err(Error::server(status.as_u16(), None));
                },
            };

        if let Some(error) = error {
            tracing::debug!(
                %status,
                code = ?error.code,
                data = ?error.data,
                "server returned an error"
            );
            return Err(Error::server(status.as_u16(), error.message));
        }

        match result {
            Some(result) if status == StatusCode::OK => Ok(result),
            _ => Err(Error::server(status.as_u16(), None)),
        }
    }

    /// Check `credentials` against the server and return the session record.
    ///
    /// No retry is attempted, whatever the failure.
    pub async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Session> {
        tracing::debug!(
            db = %credentials.db,
            login = %credentials.login,
            "authenticating"
        );

        let session = self
            .call(AUTHENTICATE_PATH, credentials)
            .await
            .and_then(Session::try_from);

        match &session {
            Ok(session) => {
                tracing::info!(uid = session.uid(), "authenticated");
            },
            Err(err) => {
                tracing::warn!(%err, kind = ?err.kind(), "authentication failed");
            },
        }

        session
    }
}
