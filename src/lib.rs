pub mod arguments;
pub mod broker;
pub mod config;
pub mod errors; // Trade error kinds and HTTP status mapping
pub mod executor;
pub mod handler;
pub mod logger;
pub mod request;
pub mod response;
pub mod webserver;

pub use errors::TradeError;
pub use handler::{handle_event, InvocationContext};
pub use response::ResponseEnvelope;
