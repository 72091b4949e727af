//! Authentication models.

use std::fmt;

use error::{Error, Result};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Parameters of `/web/session/authenticate`.
#[derive(Clone, Serialize)]
pub struct Credentials {
    /// Database to log into.
    pub db: String,
    /// User login, often an email.
    pub login: String,
    /// Plaintext password.
    pub password: String,
}

impl Credentials {
    /// Create new [`Credentials`].
    pub fn new<D, L, P>(db: D, login: L, password: P) -> Self
    where
        D: Into<String>,
        L: Into<String>,
        P: Into<String>,
    {
        Credentials {
            db: db.into(),
            login: login.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("db", &self.db)
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Session record returned by a successful authentication.
///
/// The `result` object sent by the server is kept as is; serializing a
/// [`Session`] gives back that exact object.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    uid: u64,
    record: Map<String, Value>,
}

impl Session {
    /// Identifier of the authenticated user.
    pub fn uid(&self) -> u64 {
        self.uid
    }

    /// Session identifier, when the server put it in the payload.
    pub fn session_id(&self) -> Option<&str> {
        self.record.get("session_id").and_then(Value::as_str)
    }

    /// Any other member of the record (`username`, `user_context`...).
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.record.get(key)
    }

    /// Borrow the raw record.
    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    /// Take the raw record back.
    pub fn into_record(self) -> Map<String, Value> {
        self.record
    }
}

impl TryFrom<Value> for Session {
    type Error = Error;

    /// Extract the user id from an authentication `result`.
    ///
    /// A null, missing or `false` uid means the server rejected the
    /// credentials. Anything that is not an object with a numeric uid is an
    /// invalid response.
    fn try_from(result: Value) -> Result<Self> {
        let Value::Object(record) = result else {
            return Err(Error::server(200, None));
        };

        let uid = match record.get("uid") {
            None | Some(Value::Null) | Some(Value::Bool(false)) => {
                return Err(Error::AuthenticationFailed);
            },
            Some(Value::Number(uid)) => {
                uid.as_u64().ok_or_else(|| Error::server(200, None))?
            },
            Some(_) => return Err(Error::server(200, None)),
        };

        Ok(Session { uid, record })
    }
}

impl Serialize for Session {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.record.serialize(serializer)
    }
}
