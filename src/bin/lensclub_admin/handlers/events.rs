#![deny(clippy::all, clippy::pedantic)]

use lensclub::application::pagination::ListQuery;
use lensclub::application::resources::events::{EventField, Events};
use lensclub::application::screen::AdminScreen;
use lensclub::domain::session::Session;
use lensclub::infra::http::ApiClient;
use serde_json::json;

use crate::args::EventsCmd;
use crate::client::{CliError, Ctx};
use crate::handlers::{fill, print_page, report};
use crate::io::{read_opt_value, record_id};
use crate::print::print_json;

type Screen = AdminScreen<Events, ApiClient>;

pub async fn handle(ctx: &Ctx, session: &Session, cmd: EventsCmd) -> Result<(), CliError> {
    let mut query = ListQuery::new(ctx.lists.events_page_size);
    if let EventsCmd::List { page } = &cmd {
        query = query.at_page(*page);
    }
    let mut screen = Screen::with_query(ctx.client.clone(), session, query)?;

    match cmd {
        EventsCmd::List { .. } => print_page(&mut screen).await,
        EventsCmd::Create {
            custom_id,
            name,
            subtitle,
            description,
            description_file,
            date,
            location,
            image_url,
            register_link,
        } => {
            let description = read_opt_value(description, description_file)?;
            screen.open_new();
            fill(
                screen.form_mut(),
                [
                    (EventField::CustomId, Some(custom_id)),
                    (EventField::EventName, Some(name)),
                    (EventField::Subtitle, Some(subtitle)),
                    (EventField::Description, description),
                    (EventField::Date, date),
                    (EventField::Location, location),
                    (EventField::ImageUrl, Some(image_url)),
                    (EventField::RegisterLink, Some(register_link)),
                ],
            );
            report(screen.submit().await)
        }
        EventsCmd::Update {
            id,
            custom_id,
            name,
            subtitle,
            description,
            description_file,
            date,
            location,
            image_url,
            register_link,
        } => {
            let description = read_opt_value(description, description_file)?;
            screen.edit(&record_id(&id)?).await?;
            fill(
                screen.form_mut(),
                [
                    (EventField::CustomId, custom_id),
                    (EventField::EventName, name),
                    (EventField::Subtitle, subtitle),
                    (EventField::Description, description),
                    (EventField::Date, date),
                    (EventField::Location, location),
                    (EventField::ImageUrl, image_url),
                    (EventField::RegisterLink, register_link),
                ],
            );
            report(screen.submit().await)
        }
        EventsCmd::Delete { id } => {
            let id = record_id(&id)?;
            screen.delete(&id).await?;
            print_json(&json!({ "deleted": id }))
        }
    }
}
