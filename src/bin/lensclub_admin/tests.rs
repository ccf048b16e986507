#![deny(clippy::all, clippy::pedantic)]

use std::num::NonZeroU32;

use httpmock::MockServer;
use lensclub::application::error::ApiError;
use lensclub::config::{
    ApiSettings, ClientOverrides, ListSettings, LogFormat, LoggingSettings, Settings,
};
use lensclub::domain::session::{CurrentUser, Session};
use lensclub::domain::types::Role;
use lensclub::infra::http::ApiClient;
use lensclub_api_types::RecordId;
use serde_json::json;
use tempfile::NamedTempFile;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::args::{
    ApplyArgs, Cli, Commands, EventsCmd, GalleryArgs, GalleryCmd, MembersCmd, PositionArg,
    StatusArg, TeamArg,
};
use crate::client::{CliError, Ctx, build_ctx_from_cli};
use crate::handlers::{apply, events, gallery, members};

fn size(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).expect("non-zero")
}

fn settings(base: &str) -> Settings {
    Settings {
        api: ApiSettings {
            base_url: Url::parse(base).expect("base url"),
            user_agent: ApiClient::user_agent().to_string(),
        },
        lists: ListSettings {
            gallery_page_size: size(10),
            members_page_size: size(20),
            events_page_size: size(10),
        },
        logging: LoggingSettings {
            level: LevelFilter::WARN,
            format: LogFormat::Compact,
        },
    }
}

fn ctx(server: &MockServer) -> Ctx {
    Ctx::new(&settings(&server.url("/api")), Some("tok".into())).expect("ctx")
}

fn session(role: Role) -> Session {
    Session::authenticated(CurrentUser {
        id: RecordId::Int(1),
        username: "darkroom".into(),
        role,
    })
}

fn tmp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tmp file");
    std::io::Write::write_all(&mut file, contents.as_bytes()).expect("write tmp");
    file
}

fn cli(command: Commands) -> Cli {
    Cli {
        config_file: None,
        overrides: ClientOverrides::default(),
        token_file: None,
        api_token_env: None,
        command,
    }
}

fn gallery_delete() -> Commands {
    Commands::Gallery(GalleryArgs {
        action: GalleryCmd::Delete { id: "1".into() },
    })
}

fn apply_args(password_file: Option<std::path::PathBuf>) -> ApplyArgs {
    ApplyArgs {
        name: "Ada Lovelace".into(),
        username: "ada".into(),
        email: "ada@example.org".into(),
        prog_year: "BSc CS 2".into(),
        description: Some("Film and street".into()),
        description_file: None,
        password_file,
        password_env: None,
    }
}

#[test]
fn build_ctx_prefers_token_file() -> Result<(), CliError> {
    let file = tmp_file("file-token\n");
    let mut cli = cli(gallery_delete());
    cli.token_file = Some(file.path().to_path_buf());
    cli.api_token_env = Some("env-token".into());

    let ctx = build_ctx_from_cli(&cli, &settings("https://club.example.org/api"))?;
    let header = ctx.client.auth_header()?.expect("header");
    assert_eq!(header.to_str().expect("header str"), "Bearer file-token");
    Ok(())
}

#[test]
fn admin_commands_require_token() {
    let cli = cli(gallery_delete());
    let err = build_ctx_from_cli(&cli, &settings("https://club.example.org/api"))
        .expect_err("missing token should fail");
    assert!(matches!(err, CliError::MissingToken));
}

#[test]
fn apply_runs_without_token() -> Result<(), CliError> {
    let cli = cli(Commands::Apply(apply_args(None)));
    let ctx = build_ctx_from_cli(&cli, &settings("https://club.example.org/api"))?;
    assert!(ctx.client.auth_header()?.is_none());
    Ok(())
}

#[test]
fn read_opt_value_prefers_file_over_inline() -> Result<(), CliError> {
    let file = tmp_file("from-file");
    let val = crate::io::read_opt_value(Some("inline".into()), Some(file.path().to_path_buf()))?;
    assert_eq!(val.as_deref(), Some("from-file"));
    Ok(())
}

#[test]
fn record_ids_parse_numbers_and_slugs() -> Result<(), CliError> {
    assert_eq!(crate::io::record_id("42")?, RecordId::Int(42));
    assert_eq!(
        crate::io::record_id("spring-walk")?,
        RecordId::Text("spring-walk".into())
    );
    assert!(matches!(
        crate::io::record_id("  "),
        Err(CliError::InvalidInput(_))
    ));
    Ok(())
}

#[tokio::test]
async fn gallery_list_sends_page_and_category() -> Result<(), CliError> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET")
            .path("/api/gallery")
            .query_param("page", "2")
            .query_param("limit", "10")
            .query_param("category", "Street");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"data":{"items":[],"pagination":{"currentPage":2,"totalPages":3,"totalItems":25}}}"#);
    });

    gallery::handle(
        &ctx(&server),
        &session(Role::Admin),
        GalleryCmd::List {
            page: 2,
            category: Some("Street".into()),
        },
    )
    .await?;
    mock.assert();
    Ok(())
}

#[tokio::test]
async fn gallery_list_reports_page_mismatch() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/gallery");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"data":{"items":[],"pagination":{"currentPage":1,"totalPages":1,"totalItems":0}}}"#);
    });

    let err = gallery::handle(
        &ctx(&server),
        &session(Role::Admin),
        GalleryCmd::List {
            page: 4,
            category: None,
        },
    )
    .await
    .expect_err("page 4 does not exist");
    assert!(matches!(err, CliError::InvalidInput(_)));
}

#[tokio::test]
async fn gallery_create_sends_nulls_and_refreshes_list() -> Result<(), CliError> {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method("POST").path("/api/gallery").json_body(json!({
            "title": "Night market",
            "category": "",
            "image_url": "https://cdn.example.org/market.jpg",
            "description": null,
            "event_id": null,
            "user_id": null,
        }));
        then.status(201)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"message":"Gallery item created"}"#);
    });
    let refresh = server.mock(|when, then| {
        when.method("GET").path("/api/gallery");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"data":[]}"#);
    });

    gallery::handle(
        &ctx(&server),
        &session(Role::Admin),
        GalleryCmd::Create {
            title: "Night market".into(),
            image_url: "https://cdn.example.org/market.jpg".into(),
            category: None,
            description: None,
            description_file: None,
            event_id: None,
            user_id: None,
        },
    )
    .await?;
    create.assert();
    refresh.assert();
    Ok(())
}

#[tokio::test]
async fn gallery_create_rejects_non_numeric_event_locally() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method("POST").path("/api/gallery");
        then.status(201);
    });

    let err = gallery::handle(
        &ctx(&server),
        &session(Role::Admin),
        GalleryCmd::Create {
            title: "Night market".into(),
            image_url: "https://cdn.example.org/market.jpg".into(),
            category: None,
            description: None,
            description_file: None,
            event_id: Some("spring".into()),
            user_id: None,
        },
    )
    .await
    .expect_err("event id must be numeric");
    assert!(matches!(err, CliError::InvalidInput(ref msg) if msg.contains("eventId")));
    create.assert_calls(0);
}

#[tokio::test]
async fn event_create_without_description_is_not_sent() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method("POST").path("/api/events");
        then.status(201);
    });

    let err = events::handle(
        &ctx(&server),
        &session(Role::Admin),
        EventsCmd::Create {
            custom_id: "spring-walk".into(),
            name: "Spring walk".into(),
            subtitle: "Golden hour on the river".into(),
            description: None,
            description_file: None,
            date: None,
            location: None,
            image_url: "https://cdn.example.org/walk.jpg".into(),
            register_link: "https://club.example.org/walk".into(),
        },
    )
    .await
    .expect_err("description is required");
    assert!(matches!(err, CliError::InvalidInput(ref msg) if msg.contains("description")));
    create.assert_calls(0);
}

#[tokio::test]
async fn gallery_update_loads_then_puts_merged_record() -> Result<(), CliError> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/gallery/4");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"data":{"id":4,"title":"Dusk","image_url":"https://cdn.example.org/dusk.jpg","category":"Street","description":"Old town","event_id":7,"user_id":null}}"#);
    });
    let put = server.mock(|when, then| {
        when.method("PUT").path("/api/gallery/4").json_body(json!({
            "title": "Dusk, revisited",
            "category": "Street",
            "image_url": "https://cdn.example.org/dusk.jpg",
            "description": "Old town",
            "event_id": null,
            "user_id": null,
        }));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"message":"Updated"}"#);
    });

    gallery::handle(
        &ctx(&server),
        &session(Role::Admin),
        GalleryCmd::Update {
            id: "4".into(),
            title: Some("Dusk, revisited".into()),
            image_url: None,
            category: None,
            description: None,
            description_file: None,
            event_id: Some(String::new()),
            user_id: None,
        },
    )
    .await?;
    put.assert();
    Ok(())
}

#[tokio::test]
async fn non_admin_session_is_forbidden() {
    let server = MockServer::start();
    let delete = server.mock(|when, then| {
        when.method("DELETE").path("/api/gallery/4");
        then.status(200);
    });

    let err = gallery::handle(
        &ctx(&server),
        &session(Role::Member),
        GalleryCmd::Delete { id: "4".into() },
    )
    .await
    .expect_err("members cannot administer");
    assert!(matches!(err, CliError::Api(ApiError::Forbidden)));
    delete.assert_calls(0);
}

#[tokio::test]
async fn members_list_maps_filters_to_wire_names() -> Result<(), CliError> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET")
            .path("/api/admin/members")
            .query_param("limit", "20")
            .query_param("team", "Tech")
            .query_param("position", "Team Lead")
            .query_param("status", "inactive");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"data":{"members":[],"pagination":{"currentPage":1,"totalPages":0,"total":0}}}"#);
    });

    members::handle(
        &ctx(&server),
        &session(Role::Admin),
        MembersCmd::List {
            page: 1,
            search: Some("   ".into()),
            team: Some(TeamArg::Tech),
            position: Some(PositionArg::TeamLead),
            status: Some(StatusArg::Inactive),
        },
    )
    .await?;
    mock.assert();
    Ok(())
}

#[tokio::test]
async fn members_set_status_patches_status_action() -> Result<(), CliError> {
    let server = MockServer::start();
    let patch = server.mock(|when, then| {
        when.method("PATCH")
            .path("/api/admin/members/5/status")
            .json_body(json!({"isActive": false}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"message":"Member deactivated"}"#);
    });
    server.mock(|when, then| {
        when.method("GET").path("/api/admin/members");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"data":{"members":[]}}"#);
    });

    members::handle(
        &ctx(&server),
        &session(Role::Admin),
        MembersCmd::SetStatus {
            id: "5".into(),
            status: StatusArg::Inactive,
        },
    )
    .await?;
    patch.assert();
    Ok(())
}

#[tokio::test]
async fn members_set_role_requires_a_change() {
    let server = MockServer::start();
    let err = members::handle(
        &ctx(&server),
        &session(Role::Admin),
        MembersCmd::SetRole {
            id: "5".into(),
            team: None,
            position: None,
            experience_level: None,
        },
    )
    .await
    .expect_err("nothing to change");
    assert!(matches!(err, CliError::InvalidInput(_)));
}

#[tokio::test]
async fn apply_posts_application_with_password_file() -> Result<(), CliError> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST").path("/api/members/apply").json_body(json!({
            "name": "Ada Lovelace",
            "username": "ada",
            "email": "ada@example.org",
            "prog_year": "BSc CS 2",
            "description": "Film and street",
            "password": "s3cret",
        }));
        then.status(201)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"message":"Application submitted"}"#);
    });

    let password = tmp_file("s3cret\n");
    apply::handle(&ctx(&server), apply_args(Some(password.path().to_path_buf()))).await?;
    mock.assert();
    Ok(())
}

#[tokio::test]
async fn apply_surfaces_duplicate_email() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path("/api/members/apply");
        then.status(409)
            .header("content-type", "application/json")
            .body(r#"{"success":false,"message":"Email already exists"}"#);
    });

    let password = tmp_file("s3cret");
    let err = apply::handle(&ctx(&server), apply_args(Some(password.path().to_path_buf())))
        .await
        .expect_err("duplicate email");
    assert!(matches!(err, CliError::Rejected(ref msg) if msg == "Email already exists"));
}

#[tokio::test]
async fn apply_without_password_fails_before_sending() {
    let server = MockServer::start();
    let err = apply::handle(&ctx(&server), apply_args(None))
        .await
        .expect_err("no password");
    assert!(matches!(err, CliError::MissingPassword));
}

#[tokio::test]
async fn members_toggle_status_flips_loaded_flag() -> Result<(), CliError> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/admin/members/5");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"data":{"id":5,"username":"aperture","isActive":false}}"#);
    });
    let patch = server.mock(|when, then| {
        when.method("PATCH")
            .path("/api/admin/members/5/status")
            .json_body(json!({"isActive": true}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"message":"Member activated"}"#);
    });

    members::handle(
        &ctx(&server),
        &session(Role::Admin),
        MembersCmd::ToggleStatus { id: "5".into() },
    )
    .await?;
    patch.assert();
    Ok(())
}
