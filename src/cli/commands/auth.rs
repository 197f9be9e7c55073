use clap::{Arg, Command};

pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_NAME: &str = "name";

fn password_arg() -> Arg {
    Arg::new(ARG_PASSWORD)
        .long(ARG_PASSWORD)
        .help("Account password")
        .env("ESTATE_ADMIN_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

fn email_arg() -> Arg {
    Arg::new(ARG_EMAIL)
        .long(ARG_EMAIL)
        .help("Account email")
        .env("ESTATE_ADMIN_EMAIL")
        .required(true)
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new("login")
                .about("Sign in and persist the session")
                .arg(email_arg())
                .arg(password_arg()),
        )
        .subcommand(
            Command::new("register")
                .about("Create a new account")
                .arg(
                    Arg::new(ARG_NAME)
                        .long(ARG_NAME)
                        .help("Display name")
                        .required(true),
                )
                .arg(email_arg())
                .arg(password_arg()),
        )
        .subcommand(Command::new("logout").about("Forget the persisted session"))
        .subcommand(Command::new("whoami").about("Show the signed-in user"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_reads_password_from_env() {
        temp_env::with_vars(
            [
                ("ESTATE_ADMIN_PASSWORD", Some("s3cret")),
                ("ESTATE_ADMIN_EMAIL", None),
            ],
            || {
                let matches = with_subcommands(Command::new("t")).get_matches_from(vec![
                    "t",
                    "login",
                    "--email",
                    "admin@example.com",
                ]);
                let (name, sub) = matches.subcommand().unwrap();
                assert_eq!(name, "login");
                assert_eq!(
                    sub.get_one::<String>(ARG_PASSWORD).cloned(),
                    Some("s3cret".to_string())
                );
            },
        );
    }

    #[test]
    fn register_requires_name() {
        temp_env::with_vars([("ESTATE_ADMIN_PASSWORD", Some("x"))], || {
            let result = with_subcommands(Command::new("t")).try_get_matches_from(vec![
                "t",
                "register",
                "--email",
                "a@b.com",
            ]);
            assert!(result.is_err());
        });
    }
}
