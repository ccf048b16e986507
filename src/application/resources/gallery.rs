use lensclub_api_types::{GalleryItemRecord, RecordId};

use crate::application::fields::{FieldKind, FieldSchema, FieldSpec};
use crate::application::gateway::Resource;

pub struct Gallery;

pub const FILTER_CATEGORY: &str = "category";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GalleryField {
    Title,
    Category,
    ImageUrl,
    Description,
    EventId,
    UserId,
}

impl FieldSchema for GalleryField {
    const ALL: &'static [Self] = &[
        GalleryField::Title,
        GalleryField::Category,
        GalleryField::ImageUrl,
        GalleryField::Description,
        GalleryField::EventId,
        GalleryField::UserId,
    ];

    fn spec(self) -> FieldSpec {
        match self {
            GalleryField::Title => FieldSpec::new("title", "title", FieldKind::Text).required(),
            GalleryField::Category => FieldSpec::new("category", "category", FieldKind::Text),
            GalleryField::ImageUrl => {
                FieldSpec::new("imageUrl", "image_url", FieldKind::Text).required()
            }
            GalleryField::Description => {
                FieldSpec::new("description", "description", FieldKind::OptionalText)
            }
            GalleryField::EventId => FieldSpec::new("eventId", "event_id", FieldKind::ForeignKey),
            GalleryField::UserId => FieldSpec::new("userId", "user_id", FieldKind::ForeignKey),
        }
    }
}

impl Resource for Gallery {
    type Item = GalleryItemRecord;
    type Field = GalleryField;

    const PATH: &'static str = "gallery";

    fn id_of(item: &GalleryItemRecord) -> RecordId {
        item.id.clone()
    }
}
