use crate::{
    cli::{actions::output::print_json, globals::GlobalArgs},
    features::{
        auth::AuthState,
        common::format_bytes,
        credits::RatioSummary,
        users::{
            self,
            avatar::{initials, user_avatar},
        },
    },
};
use anyhow::{Context, Result};
use serde_json::json;

#[derive(Debug)]
pub enum Command {
    Whoami,
    Stats,
}

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub command: Command,
}

/// # Errors
/// Returns an error if the request fails.
pub async fn execute(args: Args) -> Result<()> {
    let state = AuthState::new(args.globals.client()?);

    match args.command {
        Command::Whoami => {
            let user = state
                .check_auth()
                .await?
                .context("not signed in, run `tracker login`")?;
            let origin = state.client().config().origin();

            print_json(&json!({
                "user": user,
                "avatar_url": user_avatar(&origin, Some(&user)),
                "initials": initials(Some(&user.username)),
                "is_admin": user.is_admin(),
            }))?;
        }
        Command::Stats => {
            super::run::require_session(state.client())?;
            let stats = users::client::stats(state.client()).await?;

            print_json(&json!({
                "stats": stats,
                "lifetime_upload": stats.lifetime_upload.map(format_bytes),
                "lifetime_download": stats.lifetime_download.map(format_bytes),
                "ratio": RatioSummary::from_ratio_str(&stats.ratio),
            }))?;
        }
    }

    Ok(())
}
