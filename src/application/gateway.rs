//! Seam between the controllers and whatever speaks HTTP.

use std::fmt::Debug;

use async_trait::async_trait;
use lensclub_api_types::RecordId;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::ApiError;
use super::fields::FieldSchema;
use super::pagination::{ListQuery, PageResult};

/// A backend collection exposed under `/{PATH}`.
pub trait Resource: Send + Sync + 'static {
    type Item: Serialize + DeserializeOwned + Clone + Debug + Send + Sync;
    type Field: FieldSchema;

    const PATH: &'static str;
    /// Key holding the item array inside a paged `data` object.
    const ITEMS_KEY: &'static str = "items";

    fn id_of(item: &Self::Item) -> RecordId;

    fn item_path(id: &RecordId) -> String {
        format!("{}/{id}", Self::PATH)
    }

    fn update_path(id: &RecordId) -> String {
        Self::item_path(id)
    }

    /// Values a fresh create form starts from.
    fn defaults() -> Vec<(Self::Field, String)> {
        Vec::new()
    }
}

/// Outcome of a successful create, update or action call.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationReceipt<T> {
    pub message: Option<String>,
    pub data: Option<T>,
}

#[async_trait]
pub trait ResourceGateway<R: Resource>: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<PageResult<R::Item>, ApiError>;

    async fn get(&self, id: &RecordId) -> Result<R::Item, ApiError>;

    async fn create(&self, body: Map<String, Value>)
    -> Result<MutationReceipt<R::Item>, ApiError>;

    async fn update(
        &self,
        id: &RecordId,
        body: Map<String, Value>,
    ) -> Result<MutationReceipt<R::Item>, ApiError>;

    /// `PATCH /{PATH}/{id}/{action}` for state toggles outside the form.
    async fn action(
        &self,
        id: &RecordId,
        action: &str,
        body: Value,
    ) -> Result<MutationReceipt<R::Item>, ApiError>;

    async fn delete(&self, id: &RecordId) -> Result<(), ApiError>;
}
