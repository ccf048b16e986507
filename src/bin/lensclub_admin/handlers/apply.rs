#![deny(clippy::all, clippy::pedantic)]

use lensclub::application::form::CrudFormBinder;
use lensclub::application::resources::registration::{Registration, RegistrationField};

use crate::args::ApplyArgs;
use crate::client::{CliError, Ctx, read_trimmed};
use crate::handlers::{fill, report};
use crate::io::read_opt_value;

/// Public application form; runs without a session.
pub async fn handle(ctx: &Ctx, args: ApplyArgs) -> Result<(), CliError> {
    let ApplyArgs {
        name,
        username,
        email,
        prog_year,
        description,
        description_file,
        password_file,
        password_env,
    } = args;

    let password = match password_file {
        Some(path) => read_trimmed(&path).map_err(|source| CliError::InputFile {
            path: path.display().to_string(),
            source,
        })?,
        None => password_env.ok_or(CliError::MissingPassword)?,
    };
    let description = read_opt_value(description, description_file)?;

    let mut form = CrudFormBinder::<Registration>::new();
    form.open_new();
    fill(
        &mut form,
        [
            (RegistrationField::Name, Some(name)),
            (RegistrationField::Username, Some(username)),
            (RegistrationField::Email, Some(email)),
            (RegistrationField::ProgYear, Some(prog_year)),
            (RegistrationField::Description, description),
            (RegistrationField::Password, Some(password)),
        ],
    );
    report(form.submit(&ctx.client).await)
}
