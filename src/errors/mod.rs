/// Error handling for the trade relay
///
/// Every failure an invocation can hit is one `TradeError` variant. Validation and
/// brokerage failures are reported to the caller verbatim (HTTP 400); only
/// `Unexpected` is hidden behind a generic message (HTTP 500).
use thiserror::Error;

// =============================================================================
// MAIN ERROR TYPE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TradeError {
    // Request normalization errors
    #[error("Invalid event type")]
    InvalidEventType,

    #[error("Invalid request format")]
    InvalidFormat,

    #[error("Invalid JSON in request body")]
    InvalidJson { detail: String },

    #[error("Missing required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<String> },

    #[error("Invalid action. Must be 'buy' or 'sell'")]
    InvalidAction { action: String },

    // Brokerage errors
    #[error("Failed to get account status: {body}")]
    AccountQueryFailed { status: u16, body: String },

    #[error("Account is not active")]
    AccountInactive { status: String },

    #[error("Failed to place order: {body}")]
    OrderSubmissionFailed { status: u16, body: String },

    #[error("API request failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("Failed to execute trade: {message}")]
    MalformedBrokerResponse { endpoint: String, message: String },

    // Anything that escaped the typed paths above
    #[error("Internal server error")]
    Unexpected { detail: String },
}

impl TradeError {
    /// HTTP status code this error is reported with
    pub fn status_code(&self) -> u16 {
        match self {
            TradeError::Unexpected { .. } => 500,
            _ => 400,
        }
    }

    /// Message placed in the `error` field of the response body
    pub fn client_message(&self) -> String {
        self.to_string()
    }

    /// Full diagnostic text for logs (never returned to the caller)
    pub fn log_detail(&self) -> String {
        match self {
            TradeError::InvalidJson { detail } => format!("{}: {}", self, detail),
            TradeError::InvalidAction { action } => format!("{} (got '{}')", self, action),
            TradeError::AccountQueryFailed { status, .. }
            | TradeError::OrderSubmissionFailed { status, .. } => {
                format!("HTTP {} - {}", status, self)
            }
            TradeError::AccountInactive { status } => {
                format!("{} (status '{}')", self, status)
            }
            TradeError::Transport { endpoint, .. }
            | TradeError::MalformedBrokerResponse { endpoint, .. } => {
                format!("{} [{}]", self, endpoint)
            }
            TradeError::Unexpected { detail } => format!("{}: {}", self, detail),
            _ => self.to_string(),
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_comma_joined() {
        let err = TradeError::MissingFields {
            fields: vec!["action".to_string(), "quantity".to_string()],
        };
        assert_eq!(err.client_message(), "Missing required fields: action, quantity");
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn unexpected_hides_detail_from_caller() {
        let err = TradeError::Unexpected {
            detail: "task panicked: index out of bounds".to_string(),
        };
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.client_message(), "Internal server error");
        assert!(err.log_detail().contains("index out of bounds"));
        assert!(!err.is_client_error());
    }

    #[test]
    fn upstream_body_is_carried_in_message() {
        let err = TradeError::AccountQueryFailed {
            status: 401,
            body: "{\"message\":\"unauthorized.\"}".to_string(),
        };
        assert_eq!(
            err.client_message(),
            "Failed to get account status: {\"message\":\"unauthorized.\"}"
        );
        assert!(err.log_detail().starts_with("HTTP 401"));
    }
}
