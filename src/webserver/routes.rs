/// HTTP routes
///
/// `POST /` and `POST /trade` wrap the raw request body as an API-gateway-style
/// event `{ "body": "<raw>" }` and answer with the handler's envelope.
use crate::handler::{handle_event, InvocationContext};
use crate::logger::{self, LogTag};
use crate::response::ResponseEnvelope;
use crate::webserver::state::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

/// Optional caller-supplied request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(invoke))
        .route("/trade", post(invoke))
        .route("/health", get(health))
        .with_state(state)
}

/// POST / and POST /trade
async fn invoke(State(state): State<Arc<AppState>>, headers: HeaderMap, body: String) -> Response {
    let context = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(InvocationContext::with_request_id)
        .unwrap_or_default();

    logger::debug(
        LogTag::Webserver,
        &format!("Invocation {} ({} bytes)", context.request_id, body.len()),
    );

    let envelope = handle_event(json!({ "body": body }), &context, &state.executor).await;
    envelope_response(envelope)
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> Response {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": state.uptime_seconds(),
    }))
    .into_response()
}

/// Translate an envelope into an HTTP response
pub fn envelope_response(envelope: ResponseEnvelope) -> Response {
    let status =
        StatusCode::from_u16(envelope.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut response = (status, envelope.body).into_response();
    for (name, value) in &envelope.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                response.headers_mut().insert(name, value);
            }
            _ => logger::warning(
                LogTag::Webserver,
                &format!("Dropping invalid response header {}: {}", name, value),
            ),
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OrdersConfig, WebserverConfig};
    use crate::executor::tests::ScriptedBroker;
    use crate::executor::TradeExecutor;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app(status: &str) -> Router {
        let executor = TradeExecutor::new(
            Arc::new(ScriptedBroker::with_status(status)),
            OrdersConfig::default(),
        );
        create_router(Arc::new(AppState::new(
            WebserverConfig::default(),
            Arc::new(executor),
        )))
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_trade(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/trade")
            .header(REQUEST_ID_HEADER, "gw-42")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn trade_route_returns_envelope_status_and_headers() {
        let response = app("ACTIVE")
            .oneshot(post_trade(r#"{"symbol":"AAPL","action":"buy","quantity":10}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "application/json");
        assert_eq!(response.headers()["access-control-allow-credentials"], "true");

        let body = body_json(response).await;
        assert_eq!(body["order_details"]["order_id"], "abc123");
        assert_eq!(body["requestId"], "gw-42");
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let response = app("ACTIVE").oneshot(post_trade("{oops")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "Invalid JSON in request body"
        );
    }

    #[tokio::test]
    async fn inactive_account_is_bad_request() {
        let response = app("SUSPENDED")
            .oneshot(post_trade(
                r#"{"message":{"symbol":"TSLA","action":"sell","quantity":5}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Account is not active");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = app("ACTIVE")
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[test]
    fn unknown_status_code_maps_to_500() {
        let envelope = ResponseEnvelope {
            status_code: 1000,
            headers: Default::default(),
            body: "{}".to_string(),
        };
        assert_eq!(
            envelope_response(envelope).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
