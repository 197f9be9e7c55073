use clap::{Arg, Command};

pub const ARG_STATUS: &str = "status";
pub const ARG_ID: &str = "id";

#[must_use]
pub fn with_subcommand(command: Command) -> Command {
    command.subcommand(
        Command::new("inquiries")
            .about("Review inbound inquiries")
            .subcommand_required(true)
            .subcommand(
                Command::new("list").about("List inquiries").arg(
                    Arg::new(ARG_STATUS)
                        .long(ARG_STATUS)
                        .help("Only show inquiries with this status")
                        .value_parser(["all", "pending", "resolved", "archived"])
                        .ignore_case(true)
                        .default_value("all"),
                ),
            )
            .subcommand(
                Command::new("set-status")
                    .about("Move an inquiry to a new status")
                    .arg(Arg::new(ARG_ID).help("Inquiry id").required(true))
                    .arg(
                        Arg::new(ARG_STATUS)
                            .help("New status")
                            .value_parser(["pending", "resolved", "archived"])
                            .ignore_case(true)
                            .required(true),
                    ),
            ),
    )
}
