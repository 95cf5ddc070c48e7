/// Configuration system
///
/// - `macros`: `config_struct!` for sections with embedded defaults
/// - `schemas`: the sections themselves
/// - `utils`: loading from TOML
#[macro_use]
pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{BrokerConfig, Config, OrdersConfig, WebserverConfig};
pub use utils::{load_config_from_path, parse_config, CONFIG_FILE_PATH};
