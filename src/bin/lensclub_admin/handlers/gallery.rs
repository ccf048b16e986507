#![deny(clippy::all, clippy::pedantic)]

use lensclub::application::pagination::ListQuery;
use lensclub::application::resources::gallery::{FILTER_CATEGORY, Gallery, GalleryField};
use lensclub::application::screen::AdminScreen;
use lensclub::domain::session::Session;
use lensclub::infra::http::ApiClient;
use serde_json::json;

use crate::args::GalleryCmd;
use crate::client::{CliError, Ctx};
use crate::handlers::{fill, print_page, report};
use crate::io::{read_opt_value, record_id};
use crate::print::print_json;

type Screen = AdminScreen<Gallery, ApiClient>;

pub async fn handle(ctx: &Ctx, session: &Session, cmd: GalleryCmd) -> Result<(), CliError> {
    let mut query = ListQuery::new(ctx.lists.gallery_page_size);
    if let GalleryCmd::List { page, category } = &cmd {
        query = query
            .at_page(*page)
            .with_filter(FILTER_CATEGORY, category.clone().unwrap_or_default());
    }
    let mut screen = Screen::with_query(ctx.client.clone(), session, query)?;

    match cmd {
        GalleryCmd::List { .. } => print_page(&mut screen).await,
        GalleryCmd::Create {
            title,
            image_url,
            category,
            description,
            description_file,
            event_id,
            user_id,
        } => {
            let description = read_opt_value(description, description_file)?;
            screen.open_new();
            fill(
                screen.form_mut(),
                [
                    (GalleryField::Title, Some(title)),
                    (GalleryField::ImageUrl, Some(image_url)),
                    (GalleryField::Category, category),
                    (GalleryField::Description, description),
                    (GalleryField::EventId, event_id),
                    (GalleryField::UserId, user_id),
                ],
            );
            report(screen.submit().await)
        }
        GalleryCmd::Update {
            id,
            title,
            image_url,
            category,
            description,
            description_file,
            event_id,
            user_id,
        } => {
            let description = read_opt_value(description, description_file)?;
            screen.edit(&record_id(&id)?).await?;
            fill(
                screen.form_mut(),
                [
                    (GalleryField::Title, title),
                    (GalleryField::ImageUrl, image_url),
                    (GalleryField::Category, category),
                    (GalleryField::Description, description),
                    (GalleryField::EventId, event_id),
                    (GalleryField::UserId, user_id),
                ],
            );
            report(screen.submit().await)
        }
        GalleryCmd::Delete { id } => {
            let id = record_id(&id)?;
            screen.delete(&id).await?;
            print_json(&json!({ "deleted": id }))
        }
    }
}
