use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::ranking::DEFAULT_TOP_N;

const CONFIG_FILE: &str = "trading_report";
const ENV_PREFIX: &str = "TRADING";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// How many items `top_popular` keeps.
    pub top_n: usize,
    /// Name column width in CLI tables.
    pub name_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            top_n: DEFAULT_TOP_N,
            name_width: 32,
        }
    }
}

impl Settings {
    /// Defaults, then `trading_report.toml` if present, then `TRADING_*` env vars.
    pub fn load() -> Result<Self> {
        let defaults = Settings::default();
        let settings = Config::builder()
            .set_default("top_n", defaults.top_n as i64)?
            .set_default("name_width", defaults.name_width as i64)?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
