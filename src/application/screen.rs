//! One admin back-office screen: a paged list plus its edit form.

use std::num::NonZeroU32;

use lensclub_api_types::RecordId;
use serde_json::Value;
use tracing::{info, warn};

use super::error::ApiError;
use super::form::{CrudFormBinder, SubmitOutcome};
use super::gateway::{MutationReceipt, Resource, ResourceGateway};
use super::list::{Applied, FetchTicket, PagedListController};
use super::pagination::ListQuery;
use crate::domain::session::Session;

pub struct AdminScreen<R: Resource, G> {
    gateway: G,
    list: PagedListController<R>,
    form: CrudFormBinder<R>,
}

impl<R, G> AdminScreen<R, G>
where
    R: Resource,
    G: ResourceGateway<R>,
{
    /// Opens the screen for an admin session; other sessions get `Forbidden`.
    pub fn new(gateway: G, session: &Session, page_size: NonZeroU32) -> Result<Self, ApiError> {
        Self::with_query(gateway, session, ListQuery::new(page_size))
    }

    pub fn with_query(gateway: G, session: &Session, query: ListQuery) -> Result<Self, ApiError> {
        if !session.is_admin() {
            warn!(resource = R::PATH, "admin screen refused for non-admin session");
            return Err(ApiError::Forbidden);
        }
        Ok(Self {
            gateway,
            list: PagedListController::with_query(query),
            form: CrudFormBinder::new(),
        })
    }

    pub fn list(&self) -> &PagedListController<R> {
        &self.list
    }

    pub fn form(&self) -> &CrudFormBinder<R> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CrudFormBinder<R> {
        &mut self.form
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub async fn refresh(&mut self) -> Applied {
        let ticket = self.list.refetch();
        self.run(ticket).await
    }

    /// `None` when the page is out of range and nothing was fetched.
    pub async fn set_page(&mut self, n: u32) -> Option<Applied> {
        let ticket = self.list.set_page(n)?;
        Some(self.run(ticket).await)
    }

    pub async fn set_filter(&mut self, name: &str, value: &str) -> Applied {
        let ticket = self.list.set_filter(name, value);
        self.run(ticket).await
    }

    pub async fn clear_filters(&mut self) -> Applied {
        let ticket = self.list.clear_filters();
        self.run(ticket).await
    }

    /// Loads the record fresh from the server into the form.
    pub async fn edit(&mut self, id: &RecordId) -> Result<(), ApiError> {
        let item = self.gateway.get(id).await?;
        self.form.load(&item)?;
        Ok(())
    }

    pub fn edit_item(&mut self, item: &R::Item) -> Result<bool, ApiError> {
        self.form.load(item)
    }

    pub fn open_new(&mut self) -> bool {
        self.form.open_new()
    }

    pub fn cancel(&mut self) {
        self.form.reset();
    }

    /// Submits the open form; a save re-fetches the current page.
    pub async fn submit(&mut self) -> Option<SubmitOutcome> {
        let outcome = self.form.submit(&self.gateway).await?;
        if outcome.is_saved() {
            info!(resource = R::PATH, "record saved");
            self.refresh().await;
        }
        Some(outcome)
    }

    pub async fn delete(&mut self, id: &RecordId) -> Result<(), ApiError> {
        self.gateway.delete(id).await?;
        info!(resource = R::PATH, id = %id, "record deleted");
        self.refresh().await;
        Ok(())
    }

    /// Runs a record action such as a status toggle, then re-fetches.
    pub async fn action(
        &mut self,
        id: &RecordId,
        action: &str,
        body: Value,
    ) -> Result<MutationReceipt<R::Item>, ApiError> {
        let receipt = self.gateway.action(id, action, body).await?;
        info!(resource = R::PATH, id = %id, action, "record action applied");
        self.refresh().await;
        Ok(receipt)
    }

    async fn run(&mut self, ticket: FetchTicket) -> Applied {
        self.list.run(&self.gateway, ticket).await
    }
}
