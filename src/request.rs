/// Request normalization
///
/// Turns an inbound event into a validated `TradeRequest`. Two event shapes are
/// accepted and resolved once, here, into `InboundEvent`:
/// - Direct invocation: the event object itself carries `symbol`, `action`, `quantity`
/// - Envelope: `{ "body": <string-or-object> }`, where the decoded body may nest
///   the trade under a `message` key
use crate::errors::TradeError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys every trade message must carry, in reporting order
pub const REQUIRED_FIELDS: [&str; 3] = ["symbol", "action", "quantity"];

const BODY_KEY: &str = "body";
const MESSAGE_KEY: &str = "message";

// =============================================================================
// SIDE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }

    /// Case-insensitive parse; only "buy" and "sell" are accepted
    pub fn parse(action: &str) -> Option<Self> {
        match action.to_lowercase().as_str() {
            "buy" => Some(Side::Buy),
            "sell" => Some(Side::Sell),
            _ => None,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// INBOUND EVENT
// =============================================================================

/// Body of an enveloped event before decoding
#[derive(Debug, Clone, PartialEq)]
pub enum EnvelopeBody {
    /// Serialized JSON text (API gateway style)
    Raw(String),
    /// Already-structured body
    Structured(Value),
}

/// The two accepted event shapes
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    Direct(Map<String, Value>),
    Enveloped(EnvelopeBody),
}

impl InboundEvent {
    /// Decide which shape an event has
    pub fn classify(event: Value) -> Result<Self, TradeError> {
        let mut object = match event {
            Value::Object(object) => object,
            _ => return Err(TradeError::InvalidEventType),
        };

        if REQUIRED_FIELDS.iter().all(|field| object.contains_key(*field)) {
            return Ok(InboundEvent::Direct(object));
        }

        match object.remove(BODY_KEY) {
            Some(Value::String(raw)) => Ok(InboundEvent::Enveloped(EnvelopeBody::Raw(raw))),
            Some(body) => Ok(InboundEvent::Enveloped(EnvelopeBody::Structured(body))),
            None => Err(TradeError::InvalidFormat),
        }
    }

    /// Extract the (not yet validated) trade message
    pub fn into_message(self) -> Result<Map<String, Value>, TradeError> {
        let body = match self {
            InboundEvent::Direct(message) => return Ok(message),
            InboundEvent::Enveloped(EnvelopeBody::Raw(raw)) => serde_json::from_str::<Value>(&raw)
                .map_err(|e| TradeError::InvalidJson {
                    detail: e.to_string(),
                })?,
            InboundEvent::Enveloped(EnvelopeBody::Structured(body)) => body,
        };

        let mut body = match body {
            Value::Object(body) => body,
            _ => return Err(TradeError::InvalidFormat),
        };

        match body.remove(MESSAGE_KEY) {
            Some(Value::Object(message)) => Ok(message),
            Some(_) => Err(TradeError::InvalidFormat),
            None => Ok(body),
        }
    }
}

// =============================================================================
// TRADE REQUEST
// =============================================================================

/// A validated trade message
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRequest {
    pub symbol: String,
    pub side: Side,
    /// Passed through to the broker as given (number or numeric string)
    pub quantity: Value,
    /// The full message as received, overlaid onto the outbound order
    pub fields: Map<String, Value>,
}

impl TradeRequest {
    /// Validate a raw message: presence first, then the action
    pub fn from_message(message: Map<String, Value>) -> Result<Self, TradeError> {
        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|field| !message.contains_key(**field))
            .map(|field| field.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(TradeError::MissingFields { fields: missing });
        }

        let side = match &message["action"] {
            Value::String(action) => Side::parse(action),
            _ => None,
        }
        .ok_or_else(|| TradeError::InvalidAction {
            action: display_value(&message["action"]),
        })?;

        Ok(Self {
            symbol: display_value(&message["symbol"]),
            side,
            quantity: message["quantity"].clone(),
            fields: message,
        })
    }

    /// Quantity as shown to humans (strings unquoted)
    pub fn quantity_display(&self) -> String {
        display_value(&self.quantity)
    }
}

/// Normalize any inbound event into a validated trade request
pub fn normalize_event(event: Value) -> Result<TradeRequest, TradeError> {
    let message = InboundEvent::classify(event)?.into_message()?;
    TradeRequest::from_message(message)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
