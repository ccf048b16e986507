//! Public membership application. Create-only; there is no list behind it.

use lensclub_api_types::{ApplicationRecord, RecordId};

use crate::application::fields::{FieldKind, FieldSchema, FieldSpec};
use crate::application::gateway::Resource;

pub struct Registration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RegistrationField {
    Name,
    Username,
    Email,
    ProgYear,
    Description,
    Password,
}

impl FieldSchema for RegistrationField {
    const ALL: &'static [Self] = &[
        RegistrationField::Name,
        RegistrationField::Username,
        RegistrationField::Email,
        RegistrationField::ProgYear,
        RegistrationField::Description,
        RegistrationField::Password,
    ];

    fn spec(self) -> FieldSpec {
        let spec = match self {
            RegistrationField::Name => FieldSpec::new("name", "name", FieldKind::Text),
            RegistrationField::Username => FieldSpec::new("username", "username", FieldKind::Text),
            RegistrationField::Email => FieldSpec::new("email", "email", FieldKind::Email),
            RegistrationField::ProgYear => {
                FieldSpec::new("progYear", "prog_year", FieldKind::Text)
            }
            RegistrationField::Description => {
                FieldSpec::new("description", "description", FieldKind::Text)
            }
            RegistrationField::Password => {
                FieldSpec::new("password", "password", FieldKind::Secret)
            }
        };
        spec.required()
    }
}

impl Resource for Registration {
    type Item = ApplicationRecord;
    type Field = RegistrationField;

    const PATH: &'static str = "members/apply";

    fn id_of(item: &ApplicationRecord) -> RecordId {
        item.id
            .clone()
            .unwrap_or_else(|| RecordId::Text(item.username.clone()))
    }
}
