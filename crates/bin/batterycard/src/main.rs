//! # batterycard: battery card renderer
//!
//! Composition root that loads a card configuration, applies one entity
//! table push and prints the rows a dashboard would render.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Read the entity table (file or stdin)
//! - Drive the card and print the derived rows as JSON
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No domain logic belongs here.

mod config;

use std::io::Read;

use anyhow::Context;
use batterycard_app::BatteryCard;
use batterycard_domain::entity::EntityTable;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("unable to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let table = read_table(config.input.states.as_deref())?;
    tracing::info!(entities = table.len(), "entity table loaded");

    let mut card = BatteryCard::default().with_locale(config.locale);
    card.set_config(config.card).context("card configuration rejected")?;
    let rows = card.on_state_update(table).to_vec();

    let output = serde_json::json!({
        "title": card.title(),
        "rows": rows,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn read_table(path: Option<&str>) -> anyhow::Result<EntityTable> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("unable to read entity table from {path}"))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("unable to read entity table from stdin")?;
            buffer
        }
    };
    serde_json::from_str(&content).context("invalid entity table")
}
