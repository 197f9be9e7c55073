pub mod api;
pub mod auth;
pub mod inquiries;
pub mod logging;
pub mod properties;

use clap::{
    ArgMatches, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

/// Innermost subcommand matches; global arguments are readable there.
#[must_use]
pub fn leaf(matches: &ArgMatches) -> &ArgMatches {
    let mut current = matches;
    while let Some((_, sub)) = current.subcommand() {
        current = sub;
    }
    current
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("estate-admin")
        .about("Admin console for the real-estate listing platform")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true);

    let command = auth::with_subcommands(command);
    let command = properties::with_subcommand(command);
    let command = inquiries::with_subcommand(command);
    let command = api::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::api::{ARG_API_PATHS, ARG_API_URL, ARG_TIMEOUT_SECONDS};

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "estate-admin");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Admin console for the real-estate listing platform".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_global_args_reach_leaf() {
        temp_env::with_vars(
            [
                ("ESTATE_ADMIN_API_URL", None::<&str>),
                ("ESTATE_ADMIN_TIMEOUT_SECONDS", None),
                ("ESTATE_ADMIN_API_PATHS", None),
            ],
            || {
                let matches = new().get_matches_from(vec![
                    "estate-admin",
                    "--api-url",
                    "https://api.example.com",
                    "properties",
                    "get",
                    "42",
                    "--timeout-seconds",
                    "3",
                ]);
                let leaf = leaf(&matches);

                assert_eq!(
                    leaf.get_one::<String>(ARG_API_URL).cloned(),
                    Some("https://api.example.com".to_string())
                );
                assert_eq!(leaf.get_one::<u64>(ARG_TIMEOUT_SECONDS).copied(), Some(3));
                assert_eq!(
                    leaf.get_one::<String>(ARG_API_PATHS).cloned(),
                    Some("latest".to_string())
                );
            },
        );
    }

    #[test]
    fn test_api_url_from_env() {
        temp_env::with_vars(
            [("ESTATE_ADMIN_API_URL", Some("https://env.example.com/api"))],
            || {
                let matches = new().get_matches_from(vec!["estate-admin", "whoami"]);
                assert_eq!(
                    leaf(&matches).get_one::<String>(ARG_API_URL).cloned(),
                    Some("https://env.example.com/api".to_string())
                );
            },
        );
    }

    #[test]
    fn test_subcommand_required() {
        let result = new().try_get_matches_from(vec!["estate-admin"]);
        assert!(result.is_err());
    }
}
