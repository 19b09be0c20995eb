use crate::{
    cli::{
        actions::{account, admin, auth, credits, torrents, Action},
        commands::{auth as auth_args, gateway, torrents as torrent_args},
        globals::GlobalArgs,
    },
    features::{admin::types::UserListParams, torrents::types::TorrentListParams},
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;
use std::{path::PathBuf, time::Duration};

fn globals(matches: &ArgMatches) -> Result<GlobalArgs> {
    let api_url = matches
        .get_one::<String>(gateway::ARG_API_URL)
        .cloned()
        .context("missing required argument: --api-url")?;

    let mut globals = GlobalArgs::new(api_url);

    if let Some(path) = matches.get_one::<String>(gateway::ARG_SESSION_FILE) {
        globals.set_session_file(PathBuf::from(path));
    }

    if let Some(secs) = matches.get_one::<u64>(gateway::ARG_TIMEOUT) {
        globals.set_timeout(Duration::from_secs(*secs));
    }

    Ok(globals)
}

fn required(matches: &ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .with_context(|| format!("missing required argument: {name}"))
}

fn optional(matches: &ArgMatches, name: &str) -> Option<String> {
    matches.get_one::<String>(name).cloned()
}

fn page(matches: &ArgMatches) -> Option<u32> {
    matches.get_one::<u32>("page").copied()
}

/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let globals = globals(matches)?;

    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| anyhow!("no command given"))?;

    let action = match name {
        "login" => Action::Auth(auth::Args {
            globals,
            command: auth::Command::Login {
                username: required(sub, auth_args::ARG_USERNAME)?,
                password: SecretString::from(required(sub, auth_args::ARG_PASSWORD)?),
            },
        }),
        "register" => Action::Auth(auth::Args {
            globals,
            command: auth::Command::Register {
                username: required(sub, auth_args::ARG_USERNAME)?,
                email: required(sub, auth_args::ARG_EMAIL)?,
                password: SecretString::from(required(sub, auth_args::ARG_PASSWORD)?),
                invite_code: required(sub, auth_args::ARG_INVITE_CODE)?,
            },
        }),
        "logout" => Action::Auth(auth::Args {
            globals,
            command: auth::Command::Logout,
        }),
        "invite" => Action::Auth(auth::Args {
            globals,
            command: auth::Command::Invite,
        }),
        "whoami" => Action::Account(account::Args {
            globals,
            command: account::Command::Whoami,
        }),
        "stats" => Action::Account(account::Args {
            globals,
            command: account::Command::Stats,
        }),
        "torrents" => Action::Torrents(torrents::Args {
            globals,
            command: torrents_command(sub)?,
        }),
        "credits" => Action::Credits(credits::Args {
            globals,
            command: credits_command(sub)?,
        }),
        "admin" => Action::Admin(admin::Args {
            globals,
            command: admin_command(sub)?,
        }),
        other => return Err(anyhow!("unknown command: {other}")),
    };

    Ok(action)
}

fn torrents_command(matches: &ArgMatches) -> Result<torrents::Command> {
    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| anyhow!("no torrents command given"))?;

    Ok(match name {
        "list" => torrents::Command::List(TorrentListParams {
            page: page(sub),
            search: optional(sub, "search"),
            category: optional(sub, "category"),
            ordering: optional(sub, "ordering"),
        }),
        "show" => torrents::Command::Show {
            info_hash: required(sub, torrent_args::ARG_INFO_HASH)?,
        },
        "upload" => torrents::Command::Upload {
            file: PathBuf::from(required(sub, "file")?),
            name: required(sub, "name")?,
            category: required(sub, "category")?,
            description: optional(sub, "description").unwrap_or_default(),
            tags: sub
                .get_many::<String>("tag")
                .map(|tags| tags.cloned().collect())
                .unwrap_or_default(),
        },
        "download" => torrents::Command::Download {
            info_hash: required(sub, torrent_args::ARG_INFO_HASH)?,
            output: optional(sub, "output").map(PathBuf::from),
        },
        "delete" => torrents::Command::Delete {
            info_hash: required(sub, torrent_args::ARG_INFO_HASH)?,
        },
        "popular" => torrents::Command::Popular {
            limit: sub.get_one::<u32>("limit").copied(),
        },
        other => return Err(anyhow!("unknown torrents command: {other}")),
    })
}

fn credits_command(matches: &ArgMatches) -> Result<credits::Command> {
    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| anyhow!("no credits command given"))?;

    Ok(match name {
        "balance" => credits::Command::Balance,
        "ratio" => credits::Command::Ratio,
        "transactions" => credits::Command::Transactions { page: page(sub) },
        "check" => credits::Command::Check {
            torrent_id: required(sub, "torrent-id")?,
        },
        other => return Err(anyhow!("unknown credits command: {other}")),
    })
}

fn admin_command(matches: &ArgMatches) -> Result<admin::Command> {
    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| anyhow!("no admin command given"))?;

    Ok(match name {
        "dashboard" => admin::Command::Dashboard,
        "users" => admin::Command::Users(UserListParams {
            page: page(sub),
            search: optional(sub, "search"),
            ..UserListParams::default()
        }),
        "invites" => admin::Command::Invites,
        "config" => admin::Command::Config,
        other => return Err(anyhow!("unknown admin command: {other}")),
    })
}
