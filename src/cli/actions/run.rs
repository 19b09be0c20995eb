use crate::{
    cli::actions::{account, admin, auth, credits, torrents, Action},
    gateway::{ApiClient, ApiError},
};
use anyhow::{Context, Result};

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    let result = match action {
        Action::Auth(args) => auth::execute(args).await,
        Action::Account(args) => account::execute(args).await,
        Action::Torrents(args) => torrents::execute(args).await,
        Action::Credits(args) => credits::execute(args).await,
        Action::Admin(args) => admin::execute(args).await,
    };

    result.map_err(|err| {
        if err
            .downcast_ref::<ApiError>()
            .is_some_and(ApiError::is_auth_failure)
        {
            err.context("not signed in, run `tracker login`")
        } else {
            err
        }
    })
}

/// Shorthand used by actions that need a signed-in session.
pub(crate) fn require_session(client: &ApiClient) -> Result<()> {
    client
        .is_authenticated()
        .then_some(())
        .context("not signed in, run `tracker login`")
}
