use thiserror::Error;

/// Custom [`std::result::Result`] type with login [`Error`]s as fallback.
pub type Result<T> = std::result::Result<T, Error>;

/// Message used when the server answers something that cannot be read as a
/// JSON-RPC response and gives no reason of its own.
pub const INVALID_RESPONSE: &str = "Invalid response from server.";

/// The enum that lists errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    JsonParsing(#[from] serde_json::Error),
    #[error(transparent)]
    YamlParsing(#[from] serde_yaml::Error),
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    URL(#[from] url::ParseError),
    #[error("unsupported url scheme `{0}`, expected http or https")]
    UnsupportedScheme(String),
    #[error("timeout must be at least one second")]
    ZeroTimeout,

    #[error(transparent)]
    HTTP(Box<reqwest::Error>),
    /// Server refused the call or answered without a `result`.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// Server accepted the call but did not return a user id.
    #[error("User ID is null. Login failed.")]
    AuthenticationFailed,
}

/// Broad family an [`Error`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Request never got a readable answer: DNS, refused, timeout...
    Transport,
    /// Server answered with an error or with garbage.
    Server,
    /// Credentials were rejected.
    Authentication,
    /// Local setup is wrong, nothing was sent.
    Configuration,
}

impl Error {
    /// Build a [`Error::Server`], falling back on [`INVALID_RESPONSE`] when
    /// the server gave no message.
    pub fn server(status: u16, message: Option<String>) -> Self {
        Error::Server {
            status,
            message: message.unwrap_or_else(|| INVALID_RESPONSE.to_owned()),
        }
    }

    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::HTTP(_) => ErrorKind::Transport,
            Error::Server { .. } | Error::JsonParsing(_) => ErrorKind::Server,
            Error::AuthenticationFailed => ErrorKind::Authentication,
            Error::YamlParsing(_)
            | Error::IO(_)
            | Error::URL(_)
            | Error::UnsupportedScheme(_)
            | Error::ZeroTimeout => ErrorKind::Configuration,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::HTTP(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_falls_back_on_generic_message() {
        let err = Error::server(502, None);
        assert_eq!(err.to_string(), INVALID_RESPONSE);
        assert_eq!(err.kind(), ErrorKind::Server);

        let err = Error::server(200, Some("Invalid credentials".into()));
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn authentication_failure_message() {
        let err = Error::AuthenticationFailed;
        assert_eq!(err.to_string(), "User ID is null. Login failed.");
        assert_eq!(err.kind(), ErrorKind::Authentication);
    }

    #[test]
    fn configuration_errors() {
        let err = Error::UnsupportedScheme("ftp".into());
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(Error::ZeroTimeout.kind(), ErrorKind::Configuration);

        let err: Error = url::Url::parse("not a url").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
