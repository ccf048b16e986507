#![deny(clippy::all, clippy::pedantic)]

pub mod apply;
pub mod events;
pub mod gallery;
pub mod members;

use lensclub::application::form::{CrudFormBinder, SubmitOutcome};
use lensclub::application::gateway::{Resource, ResourceGateway};
use lensclub::application::list::Applied;
use lensclub::application::screen::AdminScreen;
use serde_json::json;

use crate::client::CliError;
use crate::print::print_json;

const PAGE_EDGE: u32 = 1;
const PAGE_AROUND: u32 = 2;

/// Fetches the screen's current query and prints items with pagination.
pub async fn print_page<R, G>(screen: &mut AdminScreen<R, G>) -> Result<(), CliError>
where
    R: Resource,
    G: ResourceGateway<R>,
{
    match screen.refresh().await {
        Applied::Accepted => {}
        Applied::Failed => {
            let message = screen.list().error().unwrap_or("list request failed");
            return Err(CliError::Rejected(message.to_string()));
        }
        Applied::PageMismatch {
            requested,
            returned,
        } => {
            return Err(CliError::InvalidInput(format!(
                "page {requested} is not available (server answered with page {returned})"
            )));
        }
        Applied::Stale => {
            return Err(CliError::Rejected("list request was superseded".into()));
        }
    }

    let list = screen.list();
    let pages = list
        .pagination()
        .map(|pagination| pagination.page_window(PAGE_EDGE, PAGE_AROUND))
        .unwrap_or_default();
    print_json(&json!({
        "items": list.items(),
        "pagination": list.pagination(),
        "pages": pages,
    }))
}

/// Maps a finished submission to output or a CLI error.
pub fn report(outcome: Option<SubmitOutcome>) -> Result<(), CliError> {
    match outcome {
        Some(SubmitOutcome::Saved { message }) => print_json(&json!({
            "success": true,
            "message": message,
        })),
        Some(SubmitOutcome::Invalid { message }) => Err(CliError::InvalidInput(message)),
        Some(SubmitOutcome::Rejected { message }) => Err(CliError::Rejected(message)),
        None => Err(CliError::InvalidInput("no form is open".into())),
    }
}

/// Applies every provided value to the open form.
pub fn fill<R: Resource>(
    form: &mut CrudFormBinder<R>,
    values: impl IntoIterator<Item = (R::Field, Option<String>)>,
) {
    for (field, value) in values {
        if let Some(value) = value {
            form.set_field(field, value);
        }
    }
}
