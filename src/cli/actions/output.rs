use crate::errors::AppError;
use anyhow::{Result, anyhow};
use serde::Serialize;

pub const LOGIN_HINT: &str = "Run `estate-admin login` first.";

/// Writes a value to stdout as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Turns a client failure into a CLI error, pointing at `login` when the
/// session is missing or expired.
pub fn failure(err: AppError) -> anyhow::Error {
    if err.requires_login() {
        anyhow!("{err}\n{LOGIN_HINT}")
    } else {
        anyhow!(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_failures_get_login_hint() {
        let rendered = failure(AppError::Session("Token expired".to_string())).to_string();
        assert!(rendered.starts_with("Session error: Token expired"));
        assert!(rendered.ends_with(LOGIN_HINT));

        let other = failure(AppError::Input("id required".to_string())).to_string();
        assert_eq!(other, "Invalid input: id required");
    }
}
