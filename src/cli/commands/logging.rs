use clap::{builder::ValueParser, Arg, Command};

pub const ARG_VERBOSITY: &str = "verbosity";

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
const MAX_COUNT: u8 = 5;

/// Accepts a level name (`error` through `trace`, any case) or a count
/// `0..=5`, yielding the same value repeated `-v` flags would.
#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(|level: &str| -> std::result::Result<u8, String> {
        if let Some(count) = level.parse::<u8>().ok().filter(|count| *count <= MAX_COUNT) {
            return Ok(count);
        }

        LEVELS
            .iter()
            .position(|name| name.eq_ignore_ascii_case(level))
            .and_then(|index| u8::try_from(index).ok())
            .ok_or_else(|| format!("invalid log level `{level}`, expected one of {LEVELS:?}"))
    })
}

/// Add the global `-v`/`--verbose` counter, also settable through
/// `AUTHWIRE_LOG_LEVEL`.
#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
            .env("AUTHWIRE_LOG_LEVEL")
            .global(true)
            .action(clap::ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}
