//! High-level login flow for ERP clients.

pub extern crate error;
pub extern crate rpc;

mod state;

use std::fs;
use std::path::Path;
use std::time::Duration;

use error::{Error, ErrorKind, Result};
use rpc::{Client, Credentials, Session};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use state::Progress;
pub use state::LoginState;

/// Where to go after a successful login when config does not say.
pub const DEFAULT_DESTINATION: &str = "/home";

fn default_destination() -> String {
    DEFAULT_DESTINATION.to_owned()
}

/// Method to extract config.
#[derive(Debug)]
pub enum ConfigFinder<P: AsRef<Path>> {
    /// Extract config from a file.
    Path(P),
    /// Extract config directly from a string.
    Text(String),
}

/// Login configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Server origin, e.g. `https://erp.example.com`.
    pub server_url: String,
    /// Database users log into.
    pub database: String,
    /// Route handed back on success.
    #[serde(default = "default_destination")]
    pub destination: String,
    /// Request timeout in seconds. None waits forever; `0` is rejected when
    /// the client is built.
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl Config {
    /// Read and parse YAML config.
    pub fn find<P: AsRef<Path>>(config: ConfigFinder<P>) -> Result<Self> {
        let config = match config {
            ConfigFinder::Path(path) => fs::read_to_string(path)?,
            ConfigFinder::Text(text) => text,
        };
        Ok(serde_yaml::from_str(&config)?)
    }

    /// Build the JSON-RPC client described by this config.
    pub fn client(&self) -> Result<Client> {
        match self.timeout {
            Some(0) => Err(Error::ZeroTimeout),
            Some(secs) => {
                Client::with_timeout(&self.server_url, Duration::from_secs(secs))
            },
            None => Client::new(&self.server_url),
        }
    }
}

/// What the presentation layer must do once a login ends.
#[derive(Debug)]
pub enum LoginOutcome {
    /// Credentials were accepted.
    Navigate {
        /// Route to open.
        destination: String,
        /// Record returned by the server.
        session: Session,
    },
    /// Login failed, show `message` to the user.
    Notify {
        /// Failure family, to pick an icon or wording.
        kind: ErrorKind,
        /// Human-readable reason.
        message: String,
    },
}

/// Login controller.
///
/// Owns the [`LoginState`]; the presentation layer keeps the receiver.
#[derive(Debug)]
pub struct Login {
    /// Parsed configuration.
    pub config: Config,
    client: Client,
    progress: Progress,
}

impl Login {
    /// Init [`Login`] by parsing config.
    pub fn from_config<C: AsRef<Path>>(
        config: ConfigFinder<C>,
    ) -> Result<(Self, watch::Receiver<LoginState>)> {
        Self::new(Config::find(config)?)
    }

    /// Init [`Login`] from an already parsed config.
    pub fn new(config: Config) -> Result<(Self, watch::Receiver<LoginState>)> {
        let client = config.client()?;
        Ok(Self::with_client(config, client))
    }

    /// Init [`Login`] on top of a configured HTTP client.
    ///
    /// `config.timeout` is ignored: `http` settings apply.
    pub fn with_http_client(
        config: Config,
        http: reqwest::Client,
    ) -> Result<(Self, watch::Receiver<LoginState>)> {
        let client = Client::with_http_client(&config.server_url, http)?;
        Ok(Self::with_client(config, client))
    }

    fn with_client(
        config: Config,
        client: Client,
    ) -> (Self, watch::Receiver<LoginState>) {
        let (progress, receiver) = Progress::new();
        (
            Self {
                config,
                client,
                progress,
            },
            receiver,
        )
    }

    /// Another handle on the login state.
    pub fn subscribe(&self) -> watch::Receiver<LoginState> {
        self.progress.subscribe()
    }

    /// Current login state.
    pub fn state(&self) -> LoginState {
        self.progress.current()
    }

    /// Authenticate against the configured database.
    ///
    /// State is [`LoginState::InProgress`] while the request runs. Nothing
    /// prevents two logins from running at once: each sends its own request
    /// and the state only falls back to [`LoginState::Idle`] when the last
    /// one ends.
    pub async fn login<L, P>(&self, login: L, password: P) -> LoginOutcome
    where
        L: ToString,
        P: ToString,
    {
        let credentials = Credentials::new(
            self.config.database.as_str(),
            login.to_string(),
            password.to_string(),
        );

        let session = {
            let _busy = self.progress.enter();
            self.client.authenticate(&credentials).await
        };

        match session {
            Ok(session) => {
                let destination = self.config.destination.clone();
                tracing::info!(
                    uid = session.uid(),
                    %destination,
                    "login succeeded"
                );
                LoginOutcome::Navigate {
                    destination,
                    session,
                }
            },
            Err(err) => {
                let kind = err.kind();
                tracing::warn!(
                    %err,
                    ?kind,
                    login = %credentials.login,
                    "login failed"
                );
                LoginOutcome::Notify {
                    kind,
                    message: err.to_string(),
                }
            },
        }
    }
}
