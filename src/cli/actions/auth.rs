use crate::{
    cli::{actions::output::print_json, globals::GlobalArgs},
    features::auth::{
        client,
        types::{LoginRequest, RegisterRequest},
        AuthState,
    },
};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

#[derive(Debug)]
pub enum Command {
    Login {
        username: String,
        password: SecretString,
    },
    Register {
        username: String,
        email: String,
        password: SecretString,
        invite_code: String,
    },
    Logout,
    Invite,
}

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub command: Command,
}

/// # Errors
/// Returns an error if the request fails or the session cannot be written.
pub async fn execute(args: Args) -> Result<()> {
    let state = AuthState::new(args.globals.client()?);
    debug!(session_file = %args.globals.session_file.display(), "auth command");

    match args.command {
        Command::Login { username, password } => {
            let credentials = LoginRequest {
                username,
                password,
            };
            let user = state.login(&credentials).await?;
            print_json(&user)?;
        }
        Command::Register {
            username,
            email,
            password,
            invite_code,
        } => {
            let request = RegisterRequest {
                username,
                email,
                password_confirm: SecretString::from(password.expose_secret().to_string()),
                password,
                invite_code,
            };
            let user = state.register(&request).await?;
            print_json(&json!({
                "user": user,
                "signed_in": state.is_authenticated(),
            }))?;
        }
        Command::Logout => {
            state.logout()?;
            print_json(&json!({ "signed_in": false }))?;
        }
        Command::Invite => {
            super::run::require_session(state.client())?;
            let invite = client::generate_invite(state.client()).await?;
            print_json(&invite)?;
        }
    }

    Ok(())
}
