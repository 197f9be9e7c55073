use crate::{
    AdminClient,
    auth::{Credentials, Registration},
    cli::actions::output::{failure, print_json},
    config::AppConfig,
    session::User,
};
use anyhow::Result;
use serde_json::{Value, json};
use tracing::{Instrument, info_span, warn};

const INCOMPLETE_LOGIN: &str =
    "Logged in, but the user record could not be loaded; the session will not be kept.";

#[derive(Debug)]
pub enum Command {
    Login(Credentials),
    Register(Registration),
    Logout,
    WhoAmI,
}

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub command: Command,
}

/// Execute an account action.
/// # Errors
/// Returns an error if the client cannot be built or the backend call fails.
pub async fn execute(args: Args) -> Result<()> {
    let client = AdminClient::from_config(&args.config)?;

    match args.command {
        Command::Login(credentials) => {
            let session = client
                .auth
                .login(&credentials)
                .instrument(info_span!("cli.login"))
                .await
                .map_err(failure)?;

            // A token-only session would not survive the next restore.
            let (user, warning) = match session.user() {
                Some(user) => (Some(user.clone()), None),
                None => match client.auth.fetch_current_user().await {
                    Ok(user) => (Some(user), None),
                    Err(err) => {
                        warn!("could not load the signed-in user: {err}");
                        (None, Some(format!("{INCOMPLETE_LOGIN} {}", err.message())))
                    }
                },
            };
            print_json(&login_summary(user.as_ref(), warning.as_deref()))
        }
        Command::Register(details) => {
            let message = client
                .auth
                .register(&details)
                .instrument(info_span!("cli.register"))
                .await
                .map_err(failure)?;
            print_json(&json!({ "message": message }))
        }
        Command::Logout => {
            client.auth.logout().map_err(failure)?;
            print_json(&json!({ "authenticated": false }))
        }
        Command::WhoAmI => {
            let user = client
                .auth
                .fetch_current_user()
                .instrument(info_span!("cli.whoami"))
                .await
                .map_err(failure)?;
            print_json(&user)
        }
    }
}

/// Login result as printed. Only a session with a user record survives the
/// next start, so `authenticated` is false without one.
fn login_summary(user: Option<&User>, warning: Option<&str>) -> Value {
    let mut summary = json!({
        "authenticated": user.is_some(),
        "user": user,
    });
    if let Some(warning) = warning {
        summary["warning"] = json!(warning);
    }
    summary
}
