use crate::{
    cli::{actions::output::print_json, globals::GlobalArgs},
    features::credits::{client, types::TransactionParams, RatioSummary},
};
use anyhow::Result;
use serde_json::json;

#[derive(Debug)]
pub enum Command {
    Balance,
    Ratio,
    Transactions { page: Option<u32> },
    Check { torrent_id: String },
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
        Command::Balance => print_json(&client::balance(&api).await?)?,
        Command::Ratio => {
            let status = client::ratio_status(&api).await?;
            let summary = RatioSummary::from_ratio_str(&status.ratio);

            print_json(&json!({
                "status": status,
                "health": status.health(),
                "summary": summary,
            }))?;
        }
        Command::Transactions { page } => {
            let params = TransactionParams {
                page,
                ..TransactionParams::default()
            };
            print_json(&client::transactions(&api, &params).await?)?;
        }
        Command::Check { torrent_id } => {
            print_json(&client::check_download(&api, &torrent_id).await?)?;
        }
    }

    Ok(())
}
