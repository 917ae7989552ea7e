//! Export the relay's OpenAPI document to a static JSON file
//!
//! Usage: cargo run --bin export_openapi
//!
//! Writes docs/openapi.json for client generation.

use std::fs;

use anyhow::{Context, Result};
use procore_relay::docs::RelayApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    let json = RelayApiDoc::openapi()
        .to_pretty_json()
        .context("Failed to serialize OpenAPI document")?;

    fs::create_dir_all("docs").context("Failed to create docs directory")?;
    fs::write("docs/openapi.json", json).context("Failed to write docs/openapi.json")?;

    println!("Exported OpenAPI document to docs/openapi.json");
    Ok(())
}
