#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::Path;

use lensclub::application::error::ApiError;
use lensclub::config::{self, ListSettings, LoadError, Settings};
use lensclub::domain::session::Session;
use lensclub::infra::error::InfraError;
use lensclub::infra::http::ApiClient;
use thiserror::Error;
use tracing::info;

use crate::args::Cli;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("api token is required (use --token-file or LENSCLUB_API_TOKEN)")]
    MissingToken,
    #[error("failed to read token file: {0}")]
    TokenFile(std::io::Error),
    #[error("password is required (use --password-file or LENSCLUB_APPLY_PASSWORD)")]
    MissingPassword,
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Telemetry(#[from] InfraError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("rejected: {0}")]
    Rejected(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to render output: {0}")]
    Output(String),
}

#[derive(Clone, Debug)]
pub struct Ctx {
    pub client: ApiClient,
    pub lists: ListSettings,
}

impl Ctx {
    pub fn new(settings: &Settings, token: Option<String>) -> Result<Self, CliError> {
        Ok(Self {
            client: ApiClient::new(&settings.api, token)?,
            lists: settings.lists,
        })
    }

    /// Resolves the token owner; admin screens refuse anyone else.
    pub async fn session(&self) -> Result<Session, CliError> {
        let user = self.client.current_user().await?;
        info!(username = %user.username, role = user.role.as_str(), "signed in");
        Ok(Session::authenticated(user))
    }
}

pub fn load_settings(cli: &Cli) -> Result<Settings, CliError> {
    Ok(config::load(cli.config_file.as_deref(), &cli.overrides)?)
}

/// Token file wins over the environment.
pub fn read_token(cli: &Cli) -> Result<Option<String>, CliError> {
    if let Some(path) = &cli.token_file {
        let token = read_trimmed(path).map_err(CliError::TokenFile)?;
        return Ok(Some(token));
    }
    Ok(cli
        .api_token_env
        .as_ref()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty()))
}

pub fn build_ctx_from_cli(cli: &Cli, settings: &Settings) -> Result<Ctx, CliError> {
    let token = read_token(cli)?;
    if cli.command.requires_admin() && token.is_none() {
        return Err(CliError::MissingToken);
    }
    Ctx::new(settings, token)
}

pub fn read_trimmed(path: &Path) -> Result<String, std::io::Error> {
    Ok(fs::read_to_string(path)?.trim().to_string())
}
