/// Configuration schemas - all config sections defined once with defaults

// ============================================================================
// BROKER CONFIGURATION
// ============================================================================

config_struct! {
    /// Brokerage REST endpoint and credential sources
    pub struct BrokerConfig {
        /// Base URL of the brokerage REST API (paper trading by default)
        base_url: String = "https://paper-api.alpaca.markets".to_string(),

        /// Environment variable holding the API key id
        key_id_env: String = "ALPACA_API_KEY".to_string(),

        /// Environment variable holding the API secret key
        secret_key_env: String = "ALPACA_SECRET_KEY".to_string(),

        /// HTTP client timeout in seconds (0 = no client-side timeout)
        timeout_secs: u64 = 0,
    }
}

// ============================================================================
// ORDER DEFAULTS
// ============================================================================

config_struct! {
    /// Defaults applied to every outbound order before caller overrides
    pub struct OrdersConfig {
        order_type: String = "market".to_string(),
        time_in_force: String = "day".to_string(),
    }
}

// ============================================================================
// WEBSERVER CONFIGURATION
// ============================================================================

config_struct! {
    /// HTTP host for serve mode
    pub struct WebserverConfig {
        /// IP to bind: 127.0.0.1 = localhost only, 0.0.0.0 = all interfaces
        host: String = "127.0.0.1".to_string(),

        port: u16 = 8080,
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration structure containing all sections
    pub struct Config {
        broker: BrokerConfig = BrokerConfig::default(),
        orders: OrdersConfig = OrdersConfig::default(),
        webserver: WebserverConfig = WebserverConfig::default(),
    }
}
