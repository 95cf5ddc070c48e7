/// Invocation handler
///
/// One event in, one envelope out: normalize, execute, format. Every failure
/// becomes a response; nothing propagates past `handle_event`, panics included.
use crate::errors::TradeError;
use crate::executor::{TradeConfirmation, TradeExecutor};
use crate::logger::{self, LogTag};
use crate::request::normalize_event;
use crate::response::{create_response, ResponseEnvelope};
use futures::FutureExt;
use serde::Serialize;
use serde_json::{json, Value};
use std::any::Any;
use std::panic::AssertUnwindSafe;

/// Per-invocation metadata supplied by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    pub request_id: String,
}

impl InvocationContext {
    /// Context with a fresh request id
    pub fn new() -> Self {
        Self::with_request_id(uuid::Uuid::new_v4().to_string())
    }

    pub fn with_request_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
struct OrderDetails {
    order_id: String,
    status: String,
}

#[derive(Debug, Serialize)]
struct SuccessBody {
    message: String,
    order_details: OrderDetails,
    #[serde(rename = "requestId")]
    request_id: String,
}

/// Handle one inbound event
pub async fn handle_event(
    event: Value,
    context: &InvocationContext,
    executor: &TradeExecutor,
) -> ResponseEnvelope {
    logger::info(
        LogTag::Handler,
        &format!("Received event (request {}):", context.request_id),
    );
    logger::info(
        LogTag::Handler,
        &serde_json::to_string_pretty(&event).unwrap_or_else(|_| event.to_string()),
    );

    let outcome = AssertUnwindSafe(process(event, executor))
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| {
            Err(TradeError::Unexpected {
                detail: panic_message(panic.as_ref()),
            })
        });

    match outcome {
        Ok(confirmation) => success_response(confirmation, context),
        Err(err) => error_response(&err, context),
    }
}

async fn process(event: Value, executor: &TradeExecutor) -> Result<TradeConfirmation, TradeError> {
    let request = normalize_event(event)?;
    logger::info(
        LogTag::Request,
        &format!("Processed message: {}", Value::Object(request.fields.clone())),
    );

    executor.execute(&request).await
}

fn success_response(confirmation: TradeConfirmation, context: &InvocationContext) -> ResponseEnvelope {
    logger::info(LogTag::Handler, &confirmation.message);

    create_response(
        200,
        &SuccessBody {
            message: confirmation.message,
            order_details: OrderDetails {
                order_id: confirmation.order_id,
                status: confirmation.order_status,
            },
            request_id: context.request_id.clone(),
        },
    )
}

fn error_response(err: &TradeError, context: &InvocationContext) -> ResponseEnvelope {
    if err.is_client_error() {
        logger::warning(LogTag::Handler, &err.log_detail());
        return create_response(err.status_code(), &json!({ "error": err.client_message() }));
    }

    logger::error(
        LogTag::Handler,
        &format!("Unexpected error (request {}): {}", context.request_id, err.log_detail()),
    );
    create_response(
        err.status_code(),
        &json!({
            "error": err.client_message(),
            "requestId": context.request_id,
        }),
    )
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broker::{Account, BrokerApi, Order};
    use crate::config::OrdersConfig;
    use crate::executor::tests::{order, ScriptedBroker};
    use async_trait::async_trait;
    use serde_json::Map;
    use std::sync::Arc;

    fn executor_with(broker: Arc<dyn BrokerApi>) -> TradeExecutor {
        TradeExecutor::new(broker, OrdersConfig::default())
    }

    async fn run(event: Value, broker: Arc<ScriptedBroker>) -> ResponseEnvelope {
        let context = InvocationContext::with_request_id("req-1");
        handle_event(event, &context, &executor_with(broker)).await
    }

    #[tokio::test]
    async fn successful_trade_returns_order_details() {
        let broker = Arc::new(ScriptedBroker::with_status("ACTIVE"));
        let envelope = run(
            json!({ "symbol": "AAPL", "action": "buy", "quantity": 10 }),
            broker,
        )
        .await;

        assert_eq!(envelope.status_code, 200);
        let body = envelope.body_json();
        assert_eq!(body["order_details"]["order_id"], json!("abc123"));
        assert_eq!(body["order_details"]["status"], json!("filled"));
        assert_eq!(body["requestId"], json!("req-1"));
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("buy order for 10 shares of AAPL"));
    }

    #[tokio::test]
    async fn missing_fields_are_400_without_broker_calls() {
        let broker = Arc::new(ScriptedBroker::with_status("ACTIVE"));
        let envelope = run(json!({ "body": { "symbol": "AAPL" } }), broker.clone()).await;

        assert_eq!(envelope.status_code, 400);
        assert_eq!(
            envelope.body_json(),
            json!({ "error": "Missing required fields: action, quantity" })
        );
        assert!(broker.calls().is_empty());
    }

    #[tokio::test]
    async fn invalid_action_is_400() {
        let broker = Arc::new(ScriptedBroker::with_status("ACTIVE"));
        let envelope = run(
            json!({ "symbol": "AAPL", "action": "Short", "quantity": 1 }),
            broker.clone(),
        )
        .await;

        assert_eq!(envelope.status_code, 400);
        assert!(envelope.body_json()["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid action"));
        assert!(broker.calls().is_empty());
    }

    #[tokio::test]
    async fn inactive_account_is_400_without_order() {
        let broker = Arc::new(ScriptedBroker::with_status("INACTIVE"));
        let envelope = run(
            json!({ "symbol": "AAPL", "action": "buy", "quantity": 10 }),
            broker.clone(),
        )
        .await;

        assert_eq!(envelope.status_code, 400);
        assert_eq!(envelope.body_json(), json!({ "error": "Account is not active" }));
        assert_eq!(broker.calls(), vec!["account"]);
    }

    #[tokio::test]
    async fn failed_account_query_is_400_without_order() {
        let mut scripted = ScriptedBroker::with_status("ACTIVE");
        scripted.account = Err(TradeError::AccountQueryFailed {
            status: 500,
            body: "upstream down".to_string(),
        });
        let broker = Arc::new(scripted);

        let envelope = run(
            json!({ "symbol": "AAPL", "action": "buy", "quantity": 10 }),
            broker.clone(),
        )
        .await;

        assert_eq!(envelope.status_code, 400);
        assert!(envelope.body_json()["error"]
            .as_str()
            .unwrap()
            .contains("Failed to get account status"));
        assert_eq!(broker.calls(), vec!["account"]);
    }

    #[tokio::test]
    async fn enveloped_message_matches_direct_invocation() {
        let direct_broker = Arc::new(ScriptedBroker::with_status("ACTIVE"));
        let enveloped_broker = Arc::new(ScriptedBroker::with_status("ACTIVE"));

        run(
            json!({ "symbol": "TSLA", "action": "sell", "quantity": 5 }),
            direct_broker.clone(),
        )
        .await;
        run(
            json!({ "body": "{\"message\":{\"symbol\":\"TSLA\",\"action\":\"sell\",\"quantity\":5}}" }),
            enveloped_broker.clone(),
        )
        .await;

        assert_eq!(
            *direct_broker.submitted.lock().unwrap(),
            *enveloped_broker.submitted.lock().unwrap()
        );
    }

    #[tokio::test]
    async fn malformed_body_is_400() {
        let broker = Arc::new(ScriptedBroker::with_status("ACTIVE"));
        let envelope = run(json!({ "body": "{not json" }), broker).await;

        assert_eq!(envelope.status_code, 400);
        assert_eq!(
            envelope.body_json(),
            json!({ "error": "Invalid JSON in request body" })
        );
    }

    #[tokio::test]
    async fn non_object_event_is_400() {
        let broker = Arc::new(ScriptedBroker::with_status("ACTIVE"));
        let envelope = run(json!(["AAPL", "buy", 10]), broker).await;

        assert_eq!(envelope.status_code, 400);
        assert_eq!(envelope.body_json(), json!({ "error": "Invalid event type" }));
    }

    struct PanickingBroker;

    #[async_trait]
    impl BrokerApi for PanickingBroker {
        async fn get_account(&self) -> Result<Account, TradeError> {
            panic!("account decoder exploded");
        }

        async fn submit_order(&self, _payload: &Map<String, Value>) -> Result<Order, TradeError> {
            Ok(order("never", "never"))
        }
    }

    #[tokio::test]
    async fn panic_becomes_generic_500() {
        let context = InvocationContext::with_request_id("req-panic");
        let envelope = handle_event(
            json!({ "symbol": "AAPL", "action": "buy", "quantity": 1 }),
            &context,
            &executor_with(Arc::new(PanickingBroker)),
        )
        .await;

        assert_eq!(envelope.status_code, 500);
        assert_eq!(
            envelope.body_json(),
            json!({ "error": "Internal server error", "requestId": "req-panic" })
        );
        assert!(!envelope.body.contains("exploded"));
    }

    #[test]
    fn fresh_contexts_have_distinct_ids() {
        let a = InvocationContext::new();
        let b = InvocationContext::new();
        assert_ne!(a.request_id, b.request_id);
        assert_eq!(a.request_id.len(), 36);
    }
}
