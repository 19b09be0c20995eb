pub mod account;
pub mod admin;
pub mod auth;
pub mod credits;
pub mod torrents;

mod output;
mod run;

#[derive(Debug)]
pub enum Action {
    Auth(auth::Args),
    Account(account::Args),
    Torrents(torrents::Args),
    Credits(credits::Args),
    Admin(admin::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
