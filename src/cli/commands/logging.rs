use clap::{Arg, ArgAction, ArgMatches, Command, builder::ValueParser};
use tracing::Level;

pub const ARG_VERBOSITY: &str = "verbosity";

/// Level names in verbosity order; the index is the `-v` count.
const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Accepts a level name or a count up to 5, as given in `ESTATE_ADMIN_LOG_LEVEL`.
#[must_use]
pub fn log_level_parser() -> ValueParser {
    ValueParser::from(|level: &str| -> Result<u8, String> {
        let level = level.trim();
        if let Ok(count) = level.parse::<u8>()
            && count <= 5
        {
            return Ok(count);
        }

        LEVELS
            .iter()
            .position(|name| name.eq_ignore_ascii_case(level))
            .and_then(|index| u8::try_from(index).ok())
            .ok_or_else(|| format!("invalid log level '{level}'"))
    })
}

/// Tracing level requested on the command line or through the environment.
/// `None` keeps the default (errors only). The flag is global, so it is read
/// from the innermost subcommand.
#[must_use]
pub fn requested_level(matches: &ArgMatches) -> Option<Level> {
    let count = super::leaf(matches)
        .get_one::<u8>(ARG_VERBOSITY)
        .copied()
        .unwrap_or(0);
    match count {
        0 => None,
        1 => Some(Level::WARN),
        2 => Some(Level::INFO),
        3 => Some(Level::DEBUG),
        _ => Some(Level::TRACE),
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
            .env("ESTATE_ADMIN_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(log_level_parser()),
    )
}
