use anyhow::{Context, Result};
use config::Config;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Documents per parallel chunk in `batch`.
    pub chunk_size: usize,
    /// Tracing filter used when RUST_LOG is unset.
    pub log_filter: String,
    /// Print JSON instead of the summary table by default.
    pub json: bool,
}

impl Settings {
    /// Defaults, then `chart_parser.{toml,json,yaml}` if present, then `CHART_*` env vars.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("chunk_size", 64)?
            .set_default("log_filter", "info")?
            .set_default("json", false)?
            .add_source(config::File::with_name("chart_parser").required(false))
            .add_source(config::Environment::with_prefix("CHART").try_parsing(true))
            .build()
            .context("loading settings")?;
        let settings: Settings = settings
            .try_deserialize()
            .context("invalid settings")?;
        Ok(Settings {
            chunk_size: settings.chunk_size.max(1),
            ..settings
        })
    }
}
