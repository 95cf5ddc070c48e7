/// Alpaca REST client
///
/// Static credential headers are installed once on the underlying reqwest client.
/// No rate limiting and no retries: every call is attempted exactly once.
use super::types::{Account, Credentials, Order, KEY_ID_HEADER, SECRET_KEY_HEADER};
use super::{BrokerApi, ACCOUNT_PATH, ORDERS_PATH};
use crate::config::BrokerConfig;
use crate::errors::TradeError;
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::time::{Duration, Instant};

pub struct AlpacaClient {
    client: Client,
    base_url: String,
}

impl AlpacaClient {
    pub fn new(config: &BrokerConfig, credentials: &Credentials) -> Result<Self, String> {
        let mut headers = HeaderMap::new();
        headers.insert(
            KEY_ID_HEADER,
            HeaderValue::from_str(&credentials.key_id)
                .map_err(|e| format!("Invalid API key id header value: {}", e))?,
        );
        let mut secret = HeaderValue::from_str(&credentials.secret_key)
            .map_err(|e| format!("Invalid API secret header value: {}", e))?;
        secret.set_sensitive(true);
        headers.insert(SECRET_KEY_HEADER, secret);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }

        let client = builder
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute_request(
        &self,
        builder: RequestBuilder,
        endpoint: &str,
    ) -> Result<Response, TradeError> {
        let start = Instant::now();
        let result = builder.send().await;
        let elapsed = start.elapsed().as_millis() as f64;

        match result {
            Ok(response) => {
                logger::debug(
                    LogTag::Broker,
                    &format!("{} -> HTTP {} in {:.0}ms", endpoint, response.status(), elapsed),
                );
                Ok(response)
            }
            Err(err) => {
                logger::error(
                    LogTag::Broker,
                    &format!("{} request failed after {:.0}ms: {}", endpoint, elapsed, err),
                );
                Err(TradeError::Transport {
                    endpoint: endpoint.to_string(),
                    message: err.to_string(),
                })
            }
        }
    }

    /// Read the body of a non-success response
    async fn failure_body(response: Response, endpoint: &str) -> (StatusCode, String) {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        logger::warning(
            LogTag::Broker,
            &format!("{} HTTP {}: {}", endpoint, status, body),
        );
        (status, body)
    }

    async fn parse_json<T>(response: Response, endpoint: &str) -> Result<T, TradeError>
    where
        T: DeserializeOwned,
    {
        let text = response.text().await.map_err(|e| TradeError::Transport {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;

        logger::verbose(LogTag::Broker, &format!("{} response: {}", endpoint, text));

        serde_json::from_str::<T>(&text).map_err(|e| {
            logger::error(
                LogTag::Broker,
                &format!("{} parse error: {} (body: {})", endpoint, e, text),
            );
            TradeError::MalformedBrokerResponse {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            }
        })
    }
}

#[async_trait]
impl BrokerApi for AlpacaClient {
    async fn get_account(&self) -> Result<Account, TradeError> {
        let endpoint = "alpaca.account";
        let request = self.client.get(self.url(ACCOUNT_PATH));
        let response = self.execute_request(request, endpoint).await?;

        if !response.status().is_success() {
            let (status, body) = Self::failure_body(response, endpoint).await;
            return Err(TradeError::AccountQueryFailed {
                status: status.as_u16(),
                body,
            });
        }

        Self::parse_json(response, endpoint).await
    }

    async fn submit_order(&self, payload: &Map<String, Value>) -> Result<Order, TradeError> {
        let endpoint = "alpaca.orders";
        let request = self.client.post(self.url(ORDERS_PATH)).json(payload);
        let response = self.execute_request(request, endpoint).await?;

        if !response.status().is_success() {
            let (status, body) = Self::failure_body(response, endpoint).await;
            return Err(TradeError::OrderSubmissionFailed {
                status: status.as_u16(),
                body,
            });
        }

        Self::parse_json(response, endpoint).await
    }
}
