use super::{pipeline, services, Action, Args};
use crate::{config::Snapshot, Plugin};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use tracing::debug;

pub(super) fn execute<W: Write>(action: Action, out: &mut W) -> Result<()> {
    match action {
        Action::Pipeline(args) => {
            let plugin = load(&args)?;
            write_json(out, &pipeline::handle(&plugin)?, args.compact)
        }
        Action::Services(args) => {
            let plugin = load(&args)?;
            write_json(out, &services::handle(&plugin)?, args.compact)
        }
    }
}

fn load(args: &Args) -> Result<Plugin> {
    debug!("reading configuration from {}", args.config.display());
    let snapshot = Snapshot::from_path(&args.config)
        .with_context(|| format!("Failed to load configuration: {}", args.config.display()))?;

    Ok(Plugin::new(snapshot))
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T, compact: bool) -> Result<()> {
    if compact {
        serde_json::to_writer(&mut *out, value)?;
    } else {
        serde_json::to_writer_pretty(&mut *out, value)?;
    }
    writeln!(out)?;

    Ok(())
}
