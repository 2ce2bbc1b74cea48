//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action to run.

use crate::cli::actions::{Action, Args};
use crate::cli::commands::{ARG_COMPACT, ARG_CONFIG, CMD_PIPELINE, CMD_SERVICES};
use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or the subcommand is unknown.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let config = matches
        .get_one::<String>(ARG_CONFIG)
        .map(PathBuf::from)
        .context("missing required argument: --config")?;

    let (name, sub_matches) = matches
        .subcommand()
        .context("missing subcommand")?;

    let args = Args {
        config,
        compact: sub_matches.get_flag(ARG_COMPACT) || matches.get_flag(ARG_COMPACT),
    };

    match name {
        CMD_PIPELINE => Ok(Action::Pipeline(args)),
        CMD_SERVICES => Ok(Action::Services(args)),
        other => Err(anyhow!("unknown subcommand: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_action() {
        temp_env::with_vars(
            [("AUTHWIRE_CONFIG", None::<&str>), ("AUTHWIRE_COMPACT", None)],
            || {
                let matches = crate::cli::commands::new().get_matches_from(vec![
                    "authwire",
                    "-c",
                    "auth.json",
                    "pipeline",
                ]);

                let action = handler(&matches).ok();
                assert_eq!(
                    action,
                    Some(Action::Pipeline(Args {
                        config: PathBuf::from("auth.json"),
                        compact: false,
                    }))
                );
            },
        );
    }

    #[test]
    fn services_action_from_env() {
        temp_env::with_vars(
            [
                ("AUTHWIRE_CONFIG", Some("/srv/auth.json")),
                ("AUTHWIRE_COMPACT", Some("true")),
            ],
            || {
                let matches =
                    crate::cli::commands::new().get_matches_from(vec!["authwire", "services"]);

                let action = handler(&matches).ok();
                assert_eq!(
                    action,
                    Some(Action::Services(Args {
                        config: PathBuf::from("/srv/auth.json"),
                        compact: true,
                    }))
                );
            },
        );
    }
}
