/// Trade execution against the brokerage
///
/// Strictly sequential: account check, then order placement. Nothing is retried
/// and nothing runs in parallel; the first failure ends the trade.
use crate::broker::BrokerApi;
use crate::config::OrdersConfig;
use crate::errors::TradeError;
use crate::logger::{self, LogTag};
use crate::request::TradeRequest;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Successful placement, as reported back to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeConfirmation {
    pub message: String,
    pub order_id: String,
    pub order_status: String,
}

pub struct TradeExecutor {
    broker: Arc<dyn BrokerApi>,
    defaults: OrdersConfig,
}

impl TradeExecutor {
    pub fn new(broker: Arc<dyn BrokerApi>, defaults: OrdersConfig) -> Self {
        Self { broker, defaults }
    }

    pub async fn execute(&self, request: &TradeRequest) -> Result<TradeConfirmation, TradeError> {
        let account = self.broker.get_account().await?;
        if !account.is_active() {
            logger::warning(
                LogTag::Executor,
                &format!("Account status is '{}', refusing to place order", account.status),
            );
            return Err(TradeError::AccountInactive {
                status: account.status,
            });
        }

        let payload = build_order_payload(request, &self.defaults);
        logger::info(
            LogTag::Executor,
            &format!("Submitting order: {}", Value::Object(payload.clone())),
        );

        let order = self.broker.submit_order(&payload).await?;
        logger::info(
            LogTag::Executor,
            &format!("Order submitted: id={} status={}", order.id, order.status),
        );

        Ok(TradeConfirmation {
            message: format!(
                "Successfully placed {} order for {} shares of {}",
                request.side,
                request.quantity_display(),
                request.symbol
            ),
            order_id: order.id,
            order_status: order.status,
        })
    }
}

/// Outbound order: computed defaults, then every caller field on top
///
/// Caller fields win, including `side` and `type`.
pub fn build_order_payload(request: &TradeRequest, defaults: &OrdersConfig) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("symbol".to_string(), Value::String(request.symbol.clone()));
    payload.insert("qty".to_string(), request.quantity.clone());
    payload.insert("side".to_string(), Value::String(request.side.as_str().to_string()));
    payload.insert("type".to_string(), Value::String(defaults.order_type.clone()));
    payload.insert(
        "time_in_force".to_string(),
        Value::String(defaults.time_in_force.clone()),
    );

    for (key, value) in &request.fields {
        payload.insert(key.clone(), value.clone());
    }

    payload
}
