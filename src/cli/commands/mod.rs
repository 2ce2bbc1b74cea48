pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};

pub const ARG_CONFIG: &str = "config";
pub const ARG_COMPACT: &str = "compact";

pub const CMD_PIPELINE: &str = "pipeline";
pub const CMD_SERVICES: &str = "services";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("authwire")
        .about("Authentication and authorization pipeline assembly")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_CONFIG)
                .short('c')
                .long("config")
                .help("Path to the JSON configuration snapshot")
                .env("AUTHWIRE_CONFIG")
                .required(true),
        )
        .arg(
            Arg::new(ARG_COMPACT)
                .long("compact")
                .help("Print single-line JSON")
                .env("AUTHWIRE_COMPACT")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(Command::new(CMD_PIPELINE).about("Print the assembled middleware pipeline"))
        .subcommand(
            Command::new(CMD_SERVICES)
                .about("Print the authentication and authorization service descriptors"),
        );

    logging::with_args(command)
}
