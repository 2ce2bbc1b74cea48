use crate::{Pipeline, Plugin};
use anyhow::{Context, Result};
use tracing::info;

/// Assemble the middleware pipeline described by the plugin configuration.
/// # Errors
/// Returns an error if the feature flags or middleware options are invalid.
pub fn handle(plugin: &Plugin) -> Result<Pipeline> {
    let pipeline = plugin
        .middleware()
        .context("Failed to assemble middleware pipeline")?;

    info!("{} middleware stages", pipeline.len());

    Ok(pipeline)
}
