use clap::{Arg, ArgAction, Command};

pub const ARG_INFO_HASH: &str = "info-hash";

fn info_hash() -> Arg {
    Arg::new(ARG_INFO_HASH)
        .help("Torrent info hash")
        .value_name("INFO_HASH")
        .required(true)
}

fn page() -> Arg {
    Arg::new("page")
        .long("page")
        .help("Page number")
        .value_parser(clap::value_parser!(u32).range(1..))
}

#[must_use]
pub fn subcommand() -> Command {
    Command::new("torrents")
        .about("Browse, upload and download torrents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("list")
                .about("List torrents")
                .arg(page())
                .arg(Arg::new("search").long("search").help("Search text"))
                .arg(Arg::new("category").long("category").help("Category name"))
                .arg(
                    Arg::new("ordering")
                        .long("ordering")
                        .help("Ordering field, prefix with - for descending"),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Show one torrent")
                .arg(info_hash()),
        )
        .subcommand(
            Command::new("upload")
                .about("Upload a .torrent file")
                .arg(
                    Arg::new("file")
                        .help("Path to the .torrent file")
                        .value_name("FILE")
                        .required(true),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .help("Display name")
                        .required(true),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .help("Category name")
                        .required(true),
                )
                .arg(
                    Arg::new("description")
                        .long("description")
                        .help("Description")
                        .default_value(""),
                )
                .arg(
                    Arg::new("tag")
                        .long("tag")
                        .help("Tag, repeat for several")
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("download")
                .about("Download the .torrent file")
                .arg(info_hash())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Output path (default: <INFO_HASH>.torrent)"),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a torrent you uploaded")
                .arg(info_hash()),
        )
        .subcommand(
            Command::new("popular")
                .about("List popular torrents")
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .help("Number of torrents")
                        .value_parser(clap::value_parser!(u32).range(1..)),
                ),
        )
}
