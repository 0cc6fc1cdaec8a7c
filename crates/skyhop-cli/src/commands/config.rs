//! Prints the effective simulation config.

use std::path::Path;

use anyhow::Result;

pub fn run(config: Option<&Path>) -> Result<()> {
    let config = super::load_config(config)?;
    println!("{}", serde_json::to_string_pretty(config.as_ref())?);
    Ok(())
}
