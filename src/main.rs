use clap::Parser;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use trade_relay::{
    arguments::Arguments,
    broker::{AlpacaClient, Credentials},
    config::{load_config_from_path, Config},
    executor::TradeExecutor,
    handler::{handle_event, InvocationContext},
    logger::{self, LogTag},
    webserver::{self, AppState},
};

/// Main entry point
///
/// - Invoke mode (--event): run one event, print the envelope, exit
/// - Serve mode (default): HTTP host until Ctrl-C
///
/// Configuration and credentials are read once here and passed down; nothing
/// downstream reads the environment.
#[tokio::main]
async fn main() {
    let args = Arguments::parse();
    logger::init(args.logger_config());

    logger::info(LogTag::System, "trade-relay starting up...");

    let mut config = match load_config_from_path(&args.config) {
        Ok(config) => config,
        Err(e) => {
            logger::error(LogTag::Config, &e);
            std::process::exit(1);
        }
    };
    if let Some(port) = args.port {
        config.webserver.port = port;
    }

    let executor = match build_executor(&config) {
        Ok(executor) => Arc::new(executor),
        Err(e) => {
            logger::error(LogTag::System, &e);
            std::process::exit(1);
        }
    };

    if let Some(source) = args.event.as_deref() {
        let context = args
            .request_id
            .clone()
            .map(InvocationContext::with_request_id)
            .unwrap_or_default();
        std::process::exit(run_invoke(source, context, &executor).await);
    }

    let state = Arc::new(AppState::new(config.webserver.clone(), executor));
    if let Err(e) = webserver::start_server(state).await {
        logger::error(LogTag::Webserver, &e);
        std::process::exit(1);
    }

    logger::info(LogTag::System, "trade-relay stopped");
}

fn build_executor(config: &Config) -> Result<TradeExecutor, String> {
    let credentials = Credentials::from_env(&config.broker);
    if !credentials.is_complete() {
        logger::warning(
            LogTag::Config,
            "Brokerage credentials incomplete; requests will fail authentication",
        );
    }

    let client = AlpacaClient::new(&config.broker, &credentials)?;
    logger::info(
        LogTag::Broker,
        &format!("Brokerage endpoint: {}", client.base_url()),
    );

    Ok(TradeExecutor::new(Arc::new(client), config.orders.clone()))
}

/// Run one event; returns the process exit code
async fn run_invoke(source: &str, context: InvocationContext, executor: &TradeExecutor) -> i32 {
    let raw = match read_event_source(source).await {
        Ok(raw) => raw,
        Err(e) => {
            logger::error(LogTag::System, &e);
            return 1;
        }
    };

    let event = match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(event) => event,
        Err(e) => {
            logger::error(
                LogTag::System,
                &format!("Event from '{}' is not valid JSON: {}", source, e),
            );
            return 2;
        }
    };

    let envelope = handle_event(event, &context, executor).await;
    match serde_json::to_string_pretty(&envelope) {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(e) => {
            logger::error(
                LogTag::System,
                &format!("Failed to serialize envelope: {}", e),
            );
            1
        }
    }
}

async fn read_event_source(source: &str) -> Result<String, String> {
    if source == "-" {
        let mut raw = String::new();
        tokio::io::stdin()
            .read_to_string(&mut raw)
            .await
            .map_err(|e| format!("Failed to read event from stdin: {}", e))?;
        return Ok(raw);
    }

    tokio::fs::read_to_string(source)
        .await
        .map_err(|e| format!("Failed to read event file '{}': {}", source, e))
}
