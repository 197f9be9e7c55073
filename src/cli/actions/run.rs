use crate::cli::actions::{Action, auth, inquiries, properties};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Auth(args) => auth::execute(args).await,
        Action::Properties(args) => properties::execute(args).await,
        Action::Inquiries(args) => inquiries::execute(args).await,
    }
}
