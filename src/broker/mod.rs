/// Brokerage REST access
///
/// Endpoints used:
/// 1. GET  /v2/account - account status check
/// 2. POST /v2/orders  - order placement
pub mod client;
pub mod types;

pub use self::client::AlpacaClient;
pub use self::types::{Account, Credentials, Order, ACTIVE_STATUS};

use crate::errors::TradeError;
use async_trait::async_trait;
use serde_json::{Map, Value};

pub const ACCOUNT_PATH: &str = "/v2/account";
pub const ORDERS_PATH: &str = "/v2/orders";

/// The two brokerage operations a trade needs
#[async_trait]
pub trait BrokerApi: Send + Sync {
    /// Fetch the trading account
    async fn get_account(&self) -> Result<Account, TradeError>;

    /// Submit an order payload as-is
    async fn submit_order(&self, payload: &Map<String, Value>) -> Result<Order, TradeError>;
}
