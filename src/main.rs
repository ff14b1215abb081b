//! Telegram Bot API schema generator.
//!
//! Fetches the API reference and changelog pages, scrapes types, methods,
//! articles and changelog entries out of the HTML, and writes them as JSON
//! into the output directory. Takes no arguments; see `settings` for the
//! `BOTAPI_*` environment overrides.

mod build_info;
mod error;
mod fetch;
mod parser;
mod schema;
mod settings;

use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::info;

use build_info::BuildInfo;
use fetch::Fetcher;
use settings::Settings;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let settings = Settings::load()?;
    info!(settings = ?settings, "Starting schema build");

    let build_info = BuildInfo::from_env()?;
    let fetcher = Fetcher::new(settings.timeout_secs)?;
    let reference = fetcher.fetch(&settings.api_url)?;
    let changelog = fetcher.fetch(&settings.changelog_url)?;

    let schema = parser::build_schema(&reference, &changelog, build_info)?;

    println!("Bot API version {}", schema.version);
    println!("{} types", schema.types.len());
    println!("{} methods", schema.methods.len());
    println!("{} articles", schema.articles.len());
    println!("{} changelog entries", schema.changelogs.len());
    println!("Build info: {:?}", schema.build_info);

    schema::write_all(&schema, &settings.output_dir, &settings.marker_file)?;
    println!(
        "Wrote schema to {:?} in {}",
        settings.output_dir,
        format_duration(t0.elapsed())
    );
    Ok(())
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
