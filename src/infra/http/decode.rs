//! Unwrapping `data` payloads into typed results.

use lensclub_api_types::PaginationMeta;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::client::Reply;
use crate::application::error::ApiError;
use crate::application::gateway::MutationReceipt;
use crate::application::pagination::{PageResult, Pagination};

/// Accepts `data: [...]` (unpaged) or `data: { <items_key>: [...], pagination }`.
pub(crate) fn decode_page<T: DeserializeOwned>(
    data: Option<Value>,
    items_key: &str,
) -> Result<PageResult<T>, ApiError> {
    match data {
        Some(Value::Array(items)) => Ok(PageResult::unpaged(decode_items(items)?)),
        Some(Value::Object(mut object)) => {
            let items = object
                .remove(items_key)
                .or_else(|| object.remove("items"))
                .ok_or_else(|| ApiError::decode(format!("list payload has no `{items_key}`")))?;
            let Value::Array(items) = items else {
                return Err(ApiError::decode(format!("`{items_key}` is not an array")));
            };
            let items = decode_items(items)?;

            match object.remove("pagination") {
                Some(meta) => {
                    let meta: PaginationMeta = serde_json::from_value(meta)
                        .map_err(|e| ApiError::decode(format!("invalid pagination: {e}")))?;
                    Ok(PageResult::new(items, Pagination::from(meta)))
                }
                None => Ok(PageResult::unpaged(items)),
            }
        }
        Some(other) => Err(ApiError::decode(format!("unexpected list payload: {other}"))),
        None => Err(ApiError::decode("list response has no data")),
    }
}

pub(crate) fn decode_item<T: DeserializeOwned>(data: Option<Value>) -> Result<T, ApiError> {
    let data = data.ok_or_else(|| ApiError::decode("response has no data"))?;
    serde_json::from_value(data).map_err(|e| ApiError::decode(format!("invalid record: {e}")))
}

/// Mutations succeed on the envelope alone; a `data` echo that does not
/// match the record shape is dropped rather than failing the save.
pub(crate) fn decode_receipt<T: DeserializeOwned>(reply: Reply) -> MutationReceipt<T> {
    let data = reply.data.and_then(|value| match serde_json::from_value(value) {
        Ok(item) => Some(item),
        Err(err) => {
            debug!(error = %err, "ignoring mutation echo that does not decode");
            None
        }
    });
    MutationReceipt {
        message: reply.message,
        data,
    }
}

fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>, ApiError> {
    items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item)
                .map_err(|e| ApiError::decode(format!("invalid list item: {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use lensclub_api_types::EventRecord;
    use serde_json::json;

    use super::*;

    #[test]
    fn bare_array_is_a_single_page() {
        let data = json!([
            {"id": "a1", "custom_id": "walk", "title": "Walk", "image_url": "u", "page_link": "p"}
        ]);
        let page: PageResult<EventRecord> = decode_page(Some(data), "items").expect("page");
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.pagination.total_pages, 1);
        assert_eq!(page.pagination.current_page, 1);
    }

    #[test]
    fn missing_items_key_is_a_decode_error() {
        let err = decode_page::<EventRecord>(Some(json!({"rows": []})), "items")
            .expect_err("no items");
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn receipt_tolerates_partial_echo() {
        let reply = Reply {
            message: Some("Created".into()),
            data: Some(json!({"id": "a1"})),
        };
        let receipt: MutationReceipt<EventRecord> = decode_receipt(reply);
        assert_eq!(receipt.message.as_deref(), Some("Created"));
        assert!(receipt.data.is_none());
    }
}
