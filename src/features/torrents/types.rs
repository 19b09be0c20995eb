use crate::{
    features::{common::format_bytes, users::types::User},
    gateway::MultipartForm,
};
use serde::{Deserialize, Serialize};

pub const TORRENT_MIME: &str = "application/x-bittorrent";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Torrent {
    pub info_hash: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub uploader: Option<User>,
    #[serde(default)]
    pub uploaded_at: Option<String>,
    #[serde(default)]
    pub seeders: u64,
    #[serde(default)]
    pub leechers: u64,
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub health: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub file_count: u64,
    #[serde(default)]
    pub files: Vec<TorrentFile>,
}

impl Torrent {
    #[must_use]
    pub fn display_size(&self) -> String {
        format_bytes(self.size)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TorrentFile {
    pub id: u64,
    #[serde(default)]
    pub torrent: String,
    pub filename: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub index: u64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TorrentCategory {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TorrentStats {
    #[serde(default)]
    pub seeders: u64,
    #[serde(default)]
    pub leechers: u64,
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub health_score: f64,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HealthReport {
    pub health: String,
    #[serde(default)]
    pub score: f64,
}

/// Filters for `/torrents/`.
#[derive(Clone, Debug, Default)]
pub struct TorrentListParams {
    pub page: Option<u32>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub ordering: Option<String>,
}

impl TorrentListParams {
    pub(crate) fn pairs(&self) -> [(&'static str, Option<String>); 4] {
        [
            ("page", self.page.map(|page| page.to_string())),
            ("search", self.search.clone()),
            ("category", self.category.clone()),
            ("ordering", self.ordering.clone()),
        ]
    }
}

/// Filters for `/torrents/my-torrents/`.
#[derive(Clone, Debug, Default)]
pub struct MyTorrentsParams {
    pub page: Option<u32>,
    pub ordering: Option<String>,
}

impl MyTorrentsParams {
    pub(crate) fn pairs(&self) -> [(&'static str, Option<String>); 2] {
        [
            ("page", self.page.map(|page| page.to_string())),
            ("ordering", self.ordering.clone()),
        ]
    }
}

/// A `.torrent` file plus its listing metadata.
#[derive(Clone, Debug)]
pub struct TorrentUpload {
    pub file_name: String,
    pub torrent_file: Vec<u8>,
    pub name: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
}

impl TorrentUpload {
    /// Builds the form posted to `/torrents/upload/`; each tag is its own
    /// `tags` field.
    #[must_use]
    pub fn to_form(&self) -> MultipartForm {
        let form = MultipartForm::new()
            .file(
                "torrent_file",
                self.file_name.clone(),
                Some(TORRENT_MIME),
                self.torrent_file.clone(),
            )
            .text("name", self.name.clone())
            .text("description", self.description.clone())
            .text("category", self.category.clone());

        self.tags
            .iter()
            .fold(form, |form, tag| form.text("tags", tag.clone()))
    }
}
