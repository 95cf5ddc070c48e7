/// Brokerage wire types and credentials
use crate::config::BrokerConfig;
use crate::logger::{self, LogTag};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Header carrying the API key id (APCA-API-KEY-ID; header names are case-insensitive)
pub const KEY_ID_HEADER: &str = "apca-api-key-id";
/// Header carrying the API secret key
pub const SECRET_KEY_HEADER: &str = "apca-api-secret-key";

/// Account status value that permits order placement
pub const ACTIVE_STATUS: &str = "ACTIVE";

/// Response of `GET /v2/account`
///
/// Only `status` is inspected; everything else is kept for logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Account {
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }
}

/// Response of `POST /v2/orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Static API credentials, read once at startup
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub key_id: String,
    pub secret_key: String,
}

impl Credentials {
    pub fn new(key_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Read credentials from the environment variables named in the config
    ///
    /// Missing variables are not an error: the brokerage will reject the calls
    /// with an authentication failure, which is reported like any other.
    pub fn from_env(config: &BrokerConfig) -> Self {
        Self::new(
            read_env(&config.key_id_env),
            read_env(&config.secret_key_env),
        )
    }

    pub fn is_complete(&self) -> bool {
        !self.key_id.is_empty() && !self.secret_key.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("key_id", &self.key_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

fn read_env(name: &str) -> String {
    match std::env::var(name) {
        Ok(value) => value,
        Err(_) => {
            logger::warning(
                LogTag::Config,
                &format!("Environment variable {} is not set", name),
            );
            String::new()
        }
    }
}
