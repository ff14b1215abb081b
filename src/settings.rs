use std::path::PathBuf;

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment};
use serde::Deserialize;

pub const BOT_API_URL: &str = "https://core.telegram.org/bots/api";
pub const CHANGELOG_URL: &str = "https://core.telegram.org/bots/api-changelog";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_url: String,
    pub changelog_url: String,
    pub output_dir: PathBuf,
    pub timeout_secs: u64,
    /// Empty file that marks the output directory as deployable. Empty disables it.
    pub marker_file: String,
}

impl Settings {
    /// Defaults overridden by `BOTAPI_*` environment variables.
    pub fn load() -> Result<Self> {
        defaults()?
            .add_source(Environment::with_prefix("BOTAPI"))
            .build()
            .context("Failed to read BOTAPI_* settings")?
            .try_deserialize()
            .context("Invalid BOTAPI_* settings")
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>> {
    Ok(Config::builder()
        .set_default("api_url", BOT_API_URL)?
        .set_default("changelog_url", CHANGELOG_URL)?
        .set_default("output_dir", "public")?
        .set_default("timeout_secs", 30i64)?
        .set_default("marker_file", ".nojekyll")?)
}
