#![deny(clippy::all, clippy::pedantic)]

use lensclub::application::gateway::ResourceGateway;
use lensclub::application::pagination::ListQuery;
use lensclub::application::resources::members::{
    FILTER_POSITION, FILTER_SEARCH, FILTER_STATUS, FILTER_TEAM, MemberRoleField, Members,
    STATUS_ACTION, status_body, status_toggle,
};
use lensclub::application::screen::AdminScreen;
use lensclub::domain::session::Session;
use lensclub::domain::types::{ExperienceLevel, MemberStatus, Position, Team};
use lensclub::infra::http::ApiClient;
use serde_json::json;

use crate::args::MembersCmd;
use crate::client::{CliError, Ctx};
use crate::handlers::{fill, print_page, report};
use crate::io::record_id;
use crate::print::print_json;

type Screen = AdminScreen<Members, ApiClient>;

pub async fn handle(ctx: &Ctx, session: &Session, cmd: MembersCmd) -> Result<(), CliError> {
    match cmd {
        MembersCmd::List {
            page,
            search,
            team,
            position,
            status,
        } => {
            let query = ListQuery::new(ctx.lists.members_page_size)
                .at_page(page)
                .with_filter(FILTER_SEARCH, search.unwrap_or_default())
                .with_filter(
                    FILTER_TEAM,
                    team.map(|t| Team::from(t).as_str()).unwrap_or_default(),
                )
                .with_filter(
                    FILTER_POSITION,
                    position
                        .map(|p| Position::from(p).as_str())
                        .unwrap_or_default(),
                )
                .with_filter(
                    FILTER_STATUS,
                    status
                        .map(|s| MemberStatus::from(s).as_str())
                        .unwrap_or_default(),
                );
            let mut screen = Screen::with_query(ctx.client.clone(), session, query)?;
            print_page(&mut screen).await
        }
        MembersCmd::SetRole {
            id,
            team,
            position,
            experience_level,
        } => {
            if team.is_none() && position.is_none() && experience_level.is_none() {
                return Err(CliError::InvalidInput(
                    "pass at least one of --team, --position, --experience-level".into(),
                ));
            }
            let mut screen = screen(ctx, session)?;
            screen.edit(&record_id(&id)?).await?;
            fill(
                screen.form_mut(),
                [
                    (
                        MemberRoleField::Team,
                        team.map(|t| Team::from(t).as_str().to_string()),
                    ),
                    (
                        MemberRoleField::Position,
                        position.map(|p| Position::from(p).as_str().to_string()),
                    ),
                    (
                        MemberRoleField::ExperienceLevel,
                        experience_level.map(|e| ExperienceLevel::from(e).as_str().to_string()),
                    ),
                ],
            );
            report(screen.submit().await)
        }
        MembersCmd::SetStatus { id, status } => {
            let mut screen = screen(ctx, session)?;
            let is_active = MemberStatus::from(status) == MemberStatus::Active;
            let receipt = screen
                .action(&record_id(&id)?, STATUS_ACTION, status_body(is_active)?)
                .await?;
            print_json(&json!({
                "success": true,
                "message": receipt.message,
                "isActive": is_active,
            }))
        }
        MembersCmd::ToggleStatus { id } => {
            let mut screen = screen(ctx, session)?;
            let id = record_id(&id)?;
            let member = ResourceGateway::<Members>::get(screen.gateway(), &id).await?;
            let body = status_toggle(&member)?;
            let receipt = screen.action(&id, STATUS_ACTION, body).await?;
            print_json(&json!({
                "success": true,
                "message": receipt.message,
                "isActive": !member.is_active,
            }))
        }
    }
}

fn screen(ctx: &Ctx, session: &Session) -> Result<Screen, CliError> {
    Ok(Screen::new(
        ctx.client.clone(),
        session,
        ctx.lists.members_page_size,
    )?)
}
