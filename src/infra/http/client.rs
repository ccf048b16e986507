use async_trait::async_trait;
use lensclub_api_types::{CurrentUserRecord, Envelope, ErrorBody, RecordId};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use super::decode::{decode_item, decode_page, decode_receipt};
use crate::application::error::ApiError;
use crate::application::gateway::{MutationReceipt, Resource, ResourceGateway};
use crate::application::pagination::{ListQuery, PageResult};
use crate::config::{ApiSettings, DEFAULT_USER_AGENT};
use crate::domain::session::CurrentUser;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Envelope of a successful call, with `data` still untyped.
#[derive(Debug, Clone, Default)]
pub struct Reply {
    pub message: Option<String>,
    pub data: Option<Value>,
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings, token: Option<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(ApiError::transport)?;
        Ok(Self {
            client,
            base: with_trailing_slash(settings.base_url.clone()),
            token: token.filter(|value| !value.trim().is_empty()),
        })
    }

    pub fn user_agent() -> &'static str {
        DEFAULT_USER_AGENT
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn auth_header(&self) -> Result<Option<HeaderValue>, ApiError> {
        self.token
            .as_ref()
            .map(|token| {
                HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|err| ApiError::transport(format!("invalid api token: {err}")))
            })
            .transpose()
    }

    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|err| ApiError::transport(format!("invalid url for `{path}`: {err}")))
    }

    /// Who the token belongs to; feeds the session that gates admin screens.
    pub async fn current_user(&self) -> Result<CurrentUser, ApiError> {
        let reply = self.send(Method::GET, "auth/me", None, None).await?;
        let record: CurrentUserRecord = decode_item(reply.data)?;
        Ok(CurrentUser::from(record))
    }

    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(String, String)]>,
        body: Option<Value>,
    ) -> Result<Reply, ApiError> {
        let mut url = self.url(path)?;
        if let Some(q) = query {
            url.set_query(None);
            let mut qp = url.query_pairs_mut();
            for (k, v) in q {
                qp.append_pair(k, v);
            }
        }

        let request_id = Uuid::new_v4().to_string();
        debug!(method = %method, path, request_id = %request_id, "api request");

        let mut req = self
            .client
            .request(method, url)
            .header(REQUEST_ID_HEADER, request_id.as_str());
        if let Some(auth) = self.auth_header()? {
            req = req.header(AUTHORIZATION, auth);
        }
        if let Some(b) = body {
            req = req.json(&b);
        }

        let resp = req.send().await.map_err(ApiError::transport)?;
        Self::handle(resp).await
    }

    async fn handle(resp: Response) -> Result<Reply, ApiError> {
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(ApiError::transport)?;

        if !status.is_success() {
            let body: ErrorBody = serde_json::from_slice(&bytes).unwrap_or_default();
            let message = body.text().map_or_else(
                || format!("request failed with status {status}"),
                str::to_string,
            );
            return Err(ApiError::server(status.as_u16(), message));
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Reply::default());
        }

        let envelope: Envelope<Value> = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::decode(format!("failed to parse body: {e}")))?;
        if !envelope.success {
            let message = envelope
                .message
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| "request was rejected".to_string());
            return Err(ApiError::server(status.as_u16(), message));
        }
        Ok(Reply {
            message: envelope.message,
            data: envelope.data,
        })
    }

    async fn mutate<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Value,
    ) -> Result<MutationReceipt<T>, ApiError> {
        let reply = self.send(method, path, None, Some(body)).await?;
        Ok(decode_receipt(reply))
    }
}

#[async_trait]
impl<R: Resource> ResourceGateway<R> for ApiClient {
    async fn list(&self, query: &ListQuery) -> Result<PageResult<R::Item>, ApiError> {
        let params = query.to_params();
        let reply = self
            .send(Method::GET, R::PATH, Some(&params), None)
            .await?;
        decode_page(reply.data, R::ITEMS_KEY)
    }

    async fn get(&self, id: &RecordId) -> Result<R::Item, ApiError> {
        let reply = self
            .send(Method::GET, &R::item_path(id), None, None)
            .await?;
        decode_item(reply.data)
    }

    async fn create(
        &self,
        body: Map<String, Value>,
    ) -> Result<MutationReceipt<R::Item>, ApiError> {
        self.mutate(Method::POST, R::PATH, Value::Object(body)).await
    }

    async fn update(
        &self,
        id: &RecordId,
        body: Map<String, Value>,
    ) -> Result<MutationReceipt<R::Item>, ApiError> {
        self.mutate(Method::PUT, &R::update_path(id), Value::Object(body))
            .await
    }

    async fn action(
        &self,
        id: &RecordId,
        action: &str,
        body: Value,
    ) -> Result<MutationReceipt<R::Item>, ApiError> {
        let path = format!("{}/{action}", R::item_path(id));
        self.mutate(Method::PATCH, &path, body).await
    }

    async fn delete(&self, id: &RecordId) -> Result<(), ApiError> {
        self.send(Method::DELETE, &R::item_path(id), None, None)
            .await?;
        Ok(())
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
