pub mod admin;
pub mod auth;
pub mod credits;
pub mod gateway;
pub mod logging;
pub mod torrents;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("tracker")
        .about("BitTorrent tracker client")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommands(auth::subcommands())
        .subcommand(torrents::subcommand())
        .subcommand(credits::subcommand())
        .subcommand(admin::subcommand());

    let command = gateway::with_args(command);
    logging::with_args(command)
}
