use clap::{Arg, Command};

#[must_use]
pub fn subcommand() -> Command {
    Command::new("credits")
        .about("Credit balance, ratio and transactions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("balance").about("Show the credit balance"))
        .subcommand(Command::new("ratio").about("Show the share ratio and its health"))
        .subcommand(
            Command::new("transactions")
                .about("List credit transactions")
                .arg(
                    Arg::new("page")
                        .long("page")
                        .help("Page number")
                        .value_parser(clap::value_parser!(u32).range(1..)),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Check whether a torrent can be downloaded")
                .arg(
                    Arg::new("torrent-id")
                        .help("Torrent id")
                        .value_name("TORRENT_ID")
                        .required(true),
                ),
        )
}
