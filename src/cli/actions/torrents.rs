use crate::{
    cli::{actions::output::print_json, globals::GlobalArgs},
    features::torrents::{
        client,
        types::{TorrentListParams, TorrentUpload},
    },
};
use anyhow::{Context, Result};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug)]
pub enum Command {
    List(TorrentListParams),
    Show {
        info_hash: String,
    },
    Upload {
        file: PathBuf,
        name: String,
        category: String,
        description: String,
        tags: Vec<String>,
    },
    Download {
        info_hash: String,
        output: Option<PathBuf>,
    },
    Delete {
        info_hash: String,
    },
    Popular {
        limit: Option<u32>,
    },
}

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub command: Command,
}

/// # Errors
/// Returns an error if the request fails or a local file cannot be accessed.
pub async fn execute(args: Args) -> Result<()> {
    let api = args.globals.client()?;

    match args.command {
        Command::List(params) => {
            let page = client::list(&api, &params).await?;
            print_json(&page)?;
        }
        Command::Show { info_hash } => {
            let torrent = client::get(&api, &info_hash).await?;
            print_json(&json!({
                "torrent": torrent,
                "display_size": torrent.display_size(),
            }))?;
        }
        Command::Upload {
            file,
            name,
            category,
            description,
            tags,
        } => {
            let torrent_file = tokio::fs::read(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .context("torrent path has no file name")?;

            let upload = TorrentUpload {
                file_name,
                torrent_file,
                name,
                description,
                category,
                tags,
            };
            let torrent = client::upload(&api, &upload).await?;
            info!(info_hash = %torrent.info_hash, "torrent uploaded");
            print_json(&torrent)?;
        }
        Command::Download { info_hash, output } => {
            let bytes = client::download(&api, &info_hash).await?;
            let path = output.unwrap_or_else(|| PathBuf::from(format!("{info_hash}.torrent")));

            tokio::fs::write(&path, &bytes)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;

            print_json(&json!({
                "path": path.display().to_string(),
                "bytes": bytes.len(),
            }))?;
        }
        Command::Delete { info_hash } => {
            client::delete(&api, &info_hash).await?;
            print_json(&json!({ "deleted": info_hash }))?;
        }
        Command::Popular { limit } => {
            let torrents = client::popular(&api, limit).await?;
            print_json(&torrents)?;
        }
    }

    Ok(())
}
