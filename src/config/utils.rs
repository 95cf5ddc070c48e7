use super::schemas::Config;
/// Configuration loading
///
/// Configuration is read once at startup and handed to the components that
/// need it. There is no global config cell and no hot reload: an invocation
/// always sees the values the process started with.
use crate::logger::{self, LogTag};
use std::path::Path;

/// Default configuration file path (the `--config` default)
pub const CONFIG_FILE_PATH: &str = "data/config.toml";

/// Load configuration from a specific file path
///
/// A missing file is not an error: every section falls back to its defaults.
///
/// # Returns
/// - `Ok(Config)` - Configuration loaded (or defaulted)
/// - `Err(String)` - File exists but could not be read or parsed
pub fn load_config_from_path(path: impl AsRef<Path>) -> Result<Config, String> {
    let path = path.as_ref();

    if !path.exists() {
        logger::warning(
            LogTag::Config,
            &format!("Config file '{}' not found, using default values", path.display()),
        );
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

    let config = parse_config(&contents)
        .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

    logger::debug(
        LogTag::Config,
        &format!("Loaded config from '{}'", path.display()),
    );

    Ok(config)
}

/// Parse configuration from TOML text
pub fn parse_config(contents: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_yields_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.broker.base_url, "https://paper-api.alpaca.markets");
        assert_eq!(config.orders.order_type, "market");
        assert_eq!(config.orders.time_in_force, "day");
        assert_eq!(config.broker.timeout_secs, 0);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = parse_config(
            r#"
            [broker]
            base_url = "https://api.alpaca.markets"

            [webserver]
            port = 9000
            "#,
        )
        .unwrap();

        assert_eq!(config.broker.base_url, "https://api.alpaca.markets");
        assert_eq!(config.broker.key_id_env, "ALPACA_API_KEY");
        assert_eq!(config.webserver.port, 9000);
        assert_eq!(config.webserver.host, "127.0.0.1");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from_path(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[orders]\ntime_in_force = \"gtc\"").unwrap();

        let config = load_config_from_path(file.path()).unwrap();
        assert_eq!(config.orders.time_in_force, "gtc");
        assert_eq!(config.orders.order_type, "market");
    }

    #[test]
    fn malformed_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[broker\nbase_url = ").unwrap();

        let err = load_config_from_path(file.path()).unwrap_err();
        assert!(err.starts_with("Failed to parse config file"));
    }
}
