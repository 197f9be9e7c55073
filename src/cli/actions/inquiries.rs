use crate::{
    AdminClient,
    cli::actions::output::{failure, print_json},
    config::AppConfig,
    inquiries::{InquiryStatus, StatusFilter},
};
use anyhow::Result;

#[derive(Debug)]
pub enum Command {
    List(StatusFilter),
    SetStatus { id: String, status: InquiryStatus },
}

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub command: Command,
}

/// Execute an inquiry action.
/// # Errors
/// Returns an error if the client cannot be built or the backend call fails.
pub async fn execute(args: Args) -> Result<()> {
    let client = AdminClient::from_config(&args.config)?;

    match args.command {
        Command::List(filter) => {
            let inquiries = client.inquiries.list().await.map_err(failure)?;
            print_json(&filter.apply(inquiries))
        }
        Command::SetStatus { id, status } => {
            let updated = client
                .inquiries
                .update_status(&id, status)
                .await
                .map_err(failure)?;
            print_json(&updated)
        }
    }
}
