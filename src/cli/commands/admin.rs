use clap::{Arg, Command};

#[must_use]
pub fn subcommand() -> Command {
    Command::new("admin")
        .about("Staff back office")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("dashboard").about("Show the admin dashboard"))
        .subcommand(
            Command::new("users")
                .about("List accounts")
                .arg(
                    Arg::new("page")
                        .long("page")
                        .help("Page number")
                        .value_parser(clap::value_parser!(u32).range(1..)),
                )
                .arg(Arg::new("search").long("search").help("Search text")),
        )
        .subcommand(Command::new("invites").about("List invite codes"))
        .subcommand(Command::new("config").about("List system configuration"))
}
