use lensclub_api_types::{EventRecord, RecordId};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::application::fields::{FieldKind, FieldSchema, FieldSpec};
use crate::application::gateway::Resource;

pub struct Events;

pub const DEFAULT_LOCATION: &str = "TBA";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventField {
    CustomId,
    EventName,
    Subtitle,
    Description,
    Date,
    Location,
    ImageUrl,
    RegisterLink,
}

impl FieldSchema for EventField {
    const ALL: &'static [Self] = &[
        EventField::CustomId,
        EventField::EventName,
        EventField::Subtitle,
        EventField::Description,
        EventField::Date,
        EventField::Location,
        EventField::ImageUrl,
        EventField::RegisterLink,
    ];

    fn spec(self) -> FieldSpec {
        match self {
            EventField::CustomId => {
                FieldSpec::new("customId", "custom_id", FieldKind::Text).required()
            }
            EventField::EventName => {
                FieldSpec::new("eventName", "title", FieldKind::Text).required()
            }
            EventField::Subtitle => {
                FieldSpec::new("subtitle", "subtitle", FieldKind::Text).required()
            }
            EventField::Description => {
                FieldSpec::new("description", "description", FieldKind::Text).required()
            }
            EventField::Date => FieldSpec::new("date", "date", FieldKind::Timestamp),
            EventField::Location => {
                FieldSpec::new("location", "location", FieldKind::OptionalText)
            }
            EventField::ImageUrl => {
                FieldSpec::new("imageUrl", "image_url", FieldKind::Text).required()
            }
            EventField::RegisterLink => {
                FieldSpec::new("registerLink", "page_link", FieldKind::Text).required()
            }
        }
    }
}

impl Resource for Events {
    type Item = EventRecord;
    type Field = EventField;

    const PATH: &'static str = "events";

    fn id_of(item: &EventRecord) -> RecordId {
        item.id.clone()
    }

    fn defaults() -> Vec<(EventField, String)> {
        let mut defaults = vec![(EventField::Location, DEFAULT_LOCATION.to_string())];
        if let Ok(now) = OffsetDateTime::now_utc().format(&Rfc3339) {
            defaults.push((EventField::Date, now));
        }
        defaults
    }
}
