//! lensclub-admin: command-line back office for the photography club API.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod client;
mod handlers;
mod io;
mod print;

use clap::Parser;
use lensclub::infra::telemetry;

use args::{Cli, Commands};
use client::{CliError, build_ctx_from_cli, load_settings};
use handlers::{apply, events, gallery, members};

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    telemetry::init(&settings.logging)?;
    let ctx = build_ctx_from_cli(&cli, &settings)?;

    match cli.command {
        Commands::Apply(args) => apply::handle(&ctx, args).await?,
        Commands::Gallery(cmd) => {
            let session = ctx.session().await?;
            gallery::handle(&ctx, &session, cmd.action).await?;
        }
        Commands::Members(cmd) => {
            let session = ctx.session().await?;
            members::handle(&ctx, &session, cmd.action).await?;
        }
        Commands::Events(cmd) => {
            let session = ctx.session().await?;
            events::handle(&ctx, &session, cmd.action).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
