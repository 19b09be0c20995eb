use crate::{
    cli::{actions::output::print_json, globals::GlobalArgs},
    features::admin::{
        client,
        types::{InviteCodeParams, SystemConfigParams, UserListParams},
    },
};
use anyhow::Result;

#[derive(Debug)]
pub enum Command {
    Dashboard,
    Users(UserListParams),
    Invites,
    Config,
}

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub command: Command,
}

/// # Errors
/// Returns an error if the request fails.
pub async fn execute(args: Args) -> Result<()> {
    let api = args.globals.client()?;
    super::run::require_session(&api)?;

    match args.command {
        Command::Dashboard => print_json(&client::dashboard(&api).await?)?,
        Command::Users(params) => print_json(&client::users(&api, &params).await?)?,
        Command::Invites => {
            print_json(&client::invite_codes(&api, &InviteCodeParams::default()).await?)?;
        }
        Command::Config => {
            print_json(&client::system_config(&api, &SystemConfigParams::default()).await?)?;
        }
    }

    Ok(())
}
