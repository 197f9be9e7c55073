//! Command-line argument dispatch.
//!
//! This module parses validated CLI arguments and maps them to the action
//! that runs them, together with the client configuration they share.

use crate::{
    auth::{Credentials, Registration},
    cli::{
        actions::{Action, auth, inquiries, properties},
        commands::{self, api, auth as auth_args, inquiries as inquiry_args, properties as property_args},
    },
    config::AppConfig,
    inquiries::{InquiryStatus, StatusFilter},
    properties::PropertyFilter,
};
use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing required argument: {id}"))
}

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or the client
/// configuration is invalid.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let config = api::Options::parse(commands::leaf(matches))?.into_config()?;

    match matches.subcommand() {
        Some(("login", sub)) => Ok(Action::Auth(auth::Args {
            config,
            command: auth::Command::Login(Credentials::new(
                required(sub, auth_args::ARG_EMAIL)?,
                required(sub, auth_args::ARG_PASSWORD)?,
            )),
        })),
        Some(("register", sub)) => Ok(Action::Auth(auth::Args {
            config,
            command: auth::Command::Register(Registration::new(
                required(sub, auth_args::ARG_NAME)?,
                required(sub, auth_args::ARG_EMAIL)?,
                required(sub, auth_args::ARG_PASSWORD)?,
            )),
        })),
        Some(("logout", _)) => Ok(Action::Auth(auth::Args {
            config,
            command: auth::Command::Logout,
        })),
        Some(("whoami", _)) => Ok(Action::Auth(auth::Args {
            config,
            command: auth::Command::WhoAmI,
        })),
        Some(("properties", sub)) => properties_action(config, sub),
        Some(("inquiries", sub)) => inquiries_action(config, sub),
        Some((name, _)) => Err(anyhow!("unknown command: {name}")),
        None => Err(anyhow!("a command is required")),
    }
}

fn properties_action(config: AppConfig, matches: &ArgMatches) -> Result<Action> {
    let command = match matches.subcommand() {
        Some(("list", sub)) => properties::Command::List(
            sub.get_one::<String>(property_args::ARG_FILTER)
                .map_or_else(PropertyFilter::default, |term| PropertyFilter::new(term)),
        ),
        Some(("get", sub)) => properties::Command::Get(required(sub, property_args::ARG_ID)?),
        Some(("create", sub)) => {
            properties::Command::Create(property_args::FormOptions::parse(sub))
        }
        Some(("update", sub)) => properties::Command::Update {
            id: required(sub, property_args::ARG_ID)?,
            form: property_args::FormOptions::parse(sub),
        },
        Some(("delete", sub)) => properties::Command::Delete(required(sub, property_args::ARG_ID)?),
        Some(("search", sub)) => {
            properties::Command::Search(required(sub, property_args::ARG_QUERY)?)
        }
        Some(("interested", sub)) => {
            properties::Command::Interested(required(sub, property_args::ARG_ID)?)
        }
        Some((name, _)) => return Err(anyhow!("unknown properties command: {name}")),
        None => return Err(anyhow!("a properties command is required")),
    };

    Ok(Action::Properties(properties::Args { config, command }))
}

fn inquiries_action(config: AppConfig, matches: &ArgMatches) -> Result<Action> {
    let command = match matches.subcommand() {
        Some(("list", sub)) => {
            let filter = sub
                .get_one::<String>(inquiry_args::ARG_STATUS)
                .map_or(Ok(StatusFilter::All), |value| value.parse::<StatusFilter>())?;
            inquiries::Command::List(filter)
        }
        Some(("set-status", sub)) => inquiries::Command::SetStatus {
            id: required(sub, inquiry_args::ARG_ID)?,
            status: required(sub, inquiry_args::ARG_STATUS)?.parse::<InquiryStatus>()?,
        },
        Some((name, _)) => return Err(anyhow!("unknown inquiries command: {name}")),
        None => return Err(anyhow!("an inquiries command is required")),
    };

    Ok(Action::Inquiries(inquiries::Args { config, command }))
}
