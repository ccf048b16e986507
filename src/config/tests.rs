use std::io::Write;

use super::*;

fn with_url(url: &str) -> RawSettings {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some(url.to_string());
    raw
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = with_url("https://from-file.example.org/api");
    raw.logging.level = Some("info".to_string());
    raw.lists.members_page_size = Some(50);

    let overrides = ClientOverrides {
        api_url: Some("https://from-cli.example.org/api".to_string()),
        page_size: Some(5),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.api.base_url.host_str(), Some("from-cli.example.org"));
    assert_eq!(settings.lists.members_page_size.get(), 5);
    assert_eq!(settings.lists.gallery_page_size.get(), 5);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn page_sizes_default_per_listing() {
    let settings = Settings::from_raw(with_url("http://localhost:5000/api")).expect("valid");
    assert_eq!(
        settings.lists.gallery_page_size.get(),
        DEFAULT_GALLERY_PAGE_SIZE
    );
    assert_eq!(
        settings.lists.members_page_size.get(),
        DEFAULT_MEMBERS_PAGE_SIZE
    );
    assert_eq!(settings.lists.events_page_size.get(), DEFAULT_EVENTS_PAGE_SIZE);
    assert_eq!(settings.logging.format, LogFormat::Compact);
    assert_eq!(settings.api.user_agent, DEFAULT_USER_AGENT);
    assert!(DEFAULT_USER_AGENT.starts_with("lensclub-admin/"));
}

#[test]
fn configured_user_agent_replaces_default() {
    let mut raw = with_url("http://localhost:5000/api");
    raw.api.user_agent = Some("club-sync/2".to_string());
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.api.user_agent, "club-sync/2");

    let mut raw = with_url("http://localhost:5000/api");
    raw.api.user_agent = Some("  ".to_string());
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.api.user_agent, DEFAULT_USER_AGENT);
}

#[test]
fn zero_page_size_is_rejected() {
    let mut raw = with_url("http://localhost:5000/api");
    raw.lists.events_page_size = Some(0);

    let err = Settings::from_raw(raw).expect_err("zero page size");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "lists.events_page_size",
            ..
        }
    ));
}

#[test]
fn base_url_is_required_and_must_be_http() {
    let err = Settings::from_raw(RawSettings::default()).expect_err("missing url");
    assert!(matches!(err, LoadError::Invalid { key: "api.base_url", .. }));

    let err = Settings::from_raw(with_url("ftp://club.example.org")).expect_err("bad scheme");
    assert!(matches!(err, LoadError::Invalid { key: "api.base_url", .. }));
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = with_url("http://localhost:5000/api");
    let overrides = ClientOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.logging.format, LogFormat::Json);
}

#[test]
fn explicit_config_file_is_loaded() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("tmp config");
    writeln!(
        file,
        "[api]\nbase_url = \"https://club.example.org/api\"\n\n[lists]\ngallery_page_size = 12\n"
    )
    .expect("write config");

    let settings = load(Some(file.path()), &ClientOverrides::default()).expect("settings");
    assert_eq!(settings.api.base_url.as_str(), "https://club.example.org/api");
    assert_eq!(settings.lists.gallery_page_size.get(), 12);
}

#[test]
fn missing_explicit_config_file_fails() {
    let err = load(
        Some(Path::new("/nonexistent/lensclub.toml")),
        &ClientOverrides::default(),
    )
    .expect_err("missing file");
    assert!(matches!(err, LoadError::Build(_)));
}
