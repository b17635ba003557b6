use std::sync::{Arc, OnceLock};

use super::StaticConfig;
use crate::errors::Result;

static CONFIG: OnceLock<Arc<StaticConfig>> = OnceLock::new();

/// Initialize the global configuration from a TOML file plus `QM__*` env vars.
///
/// A missing file is not an error; defaults fill the gaps.
pub fn init_config(path: &str) -> Result<Arc<StaticConfig>> {
    let config = StaticConfig::load(path)?;
    Ok(init_config_with(config))
}

/// Install an already-built configuration. The first call wins.
pub fn init_config_with(config: StaticConfig) -> Arc<StaticConfig> {
    CONFIG.get_or_init(|| Arc::new(config)).clone()
}
