use crate::cli::{actions::Action, commands, dispatch, telemetry};
use anyhow::Result;

/// Parses the command line, installs logging and returns the action to run.
///
/// # Errors
///
/// Returns an error if telemetry cannot be installed or the arguments do not
/// form a valid action
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    telemetry::init(commands::logging::requested_level(&matches))?;

    dispatch::handler(&matches)
}
