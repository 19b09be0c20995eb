use clap::{Arg, Command};

pub const ARG_USERNAME: &str = "username";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_EMAIL: &str = "email";
pub const ARG_INVITE_CODE: &str = "invite-code";

fn username() -> Arg {
    Arg::new(ARG_USERNAME)
        .short('u')
        .long(ARG_USERNAME)
        .help("Account username")
        .env("TRACKER_USERNAME")
        .required(true)
}

fn password() -> Arg {
    Arg::new(ARG_PASSWORD)
        .short('p')
        .long(ARG_PASSWORD)
        .help("Account password")
        .env("TRACKER_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

#[must_use]
pub fn subcommands() -> Vec<Command> {
    vec![
        Command::new("login")
            .about("Sign in and store the session")
            .arg(username())
            .arg(password()),
        Command::new("register")
            .about("Create an account with an invite code")
            .arg(username())
            .arg(
                Arg::new(ARG_EMAIL)
                    .short('e')
                    .long(ARG_EMAIL)
                    .help("Email address")
                    .required(true),
            )
            .arg(password())
            .arg(
                Arg::new(ARG_INVITE_CODE)
                    .short('i')
                    .long(ARG_INVITE_CODE)
                    .help("Invite code")
                    .required(true),
            ),
        Command::new("logout").about("Forget the stored session"),
        Command::new("whoami").about("Show the signed-in user"),
        Command::new("stats").about("Show upload and download statistics"),
        Command::new("invite").about("Generate an invite code with credits"),
    ]
}
