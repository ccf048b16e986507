//! Paged, filtered list state for one resource.
//!
//! Every change to the query hands out a [`FetchTicket`] carrying a fresh
//! sequence number. Responses are fed back through
//! [`PagedListController::apply`], which only accepts the ticket issued last,
//! so a slow response to an older query can never overwrite a newer one.

use std::num::NonZeroU32;

use tracing::{debug, warn};

use super::error::ApiError;
use super::gateway::{Resource, ResourceGateway};
use super::pagination::{ListQuery, PageResult, Pagination};

/// Permission to run one list request. Consumed by `apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: ListQuery,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }
}

/// A resolved request, ready to hand back to its controller.
#[derive(Debug)]
pub struct Fetched<T> {
    pub ticket: FetchTicket,
    pub outcome: Result<PageResult<T>, ApiError>,
}

/// Runs the request a ticket describes.
pub async fn fetch<R, G>(gateway: &G, ticket: FetchTicket) -> Fetched<R::Item>
where
    R: Resource,
    G: ResourceGateway<R> + ?Sized,
{
    let outcome = gateway.list(ticket.query()).await;
    Fetched { ticket, outcome }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Accepted,
    /// Request failed; previous items are kept.
    Failed,
    /// A newer ticket was issued after this one.
    Stale,
    /// Server answered with a different page than requested.
    PageMismatch { requested: u32, returned: u32 },
}

pub struct PagedListController<R: Resource> {
    query: ListQuery,
    latest: Option<PageResult<R::Item>>,
    shown: Option<ListQuery>,
    issued: u64,
    in_flight: Option<u64>,
    error: Option<String>,
}

impl<R: Resource> PagedListController<R> {
    pub fn new(page_size: NonZeroU32) -> Self {
        Self::with_query(ListQuery::new(page_size))
    }

    pub fn with_query(query: ListQuery) -> Self {
        Self {
            query,
            latest: None,
            shown: None,
            issued: 0,
            in_flight: None,
            error: None,
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn items(&self) -> &[R::Item] {
        self.latest
            .as_ref()
            .map_or(&[] as &[R::Item], |page| page.items.as_slice())
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.latest.as_ref().map(|page| &page.pagination)
    }

    pub fn latest(&self) -> Option<&PageResult<R::Item>> {
        self.latest.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Moves to page `n`; `None` when `n` is outside the last known range.
    pub fn set_page(&mut self, n: u32) -> Option<FetchTicket> {
        let total_pages = self.pagination()?.total_pages;
        if n < 1 || n > total_pages {
            debug!(
                resource = R::PATH,
                requested = n,
                total_pages,
                "page change ignored"
            );
            return None;
        }
        self.query.set_page(n);
        Some(self.issue())
    }

    pub fn next_page(&mut self) -> Option<FetchTicket> {
        let pagination = *self.pagination()?;
        if !pagination.has_next_page {
            return None;
        }
        self.set_page(pagination.current_page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> Option<FetchTicket> {
        let pagination = *self.pagination()?;
        if !pagination.has_prev_page {
            return None;
        }
        self.set_page(pagination.current_page.saturating_sub(1))
    }

    pub fn set_filter(&mut self, name: impl Into<String>, value: impl Into<String>) -> FetchTicket {
        self.query.put_filter(name.into(), value.into());
        self.query.set_page(1);
        self.issue()
    }

    pub fn clear_filters(&mut self) -> FetchTicket {
        self.query.clear_filters();
        self.query.set_page(1);
        self.issue()
    }

    pub fn set_sort(&mut self, sort: Option<String>) -> FetchTicket {
        self.query.set_sort(sort);
        self.query.set_page(1);
        self.issue()
    }

    pub fn set_page_size(&mut self, page_size: NonZeroU32) -> FetchTicket {
        self.query.set_page_size(page_size);
        self.query.set_page(1);
        self.issue()
    }

    /// Re-issues the current query, e.g. after a create or delete.
    pub fn refetch(&mut self) -> FetchTicket {
        self.issue()
    }

    pub fn apply(&mut self, fetched: Fetched<R::Item>) -> Applied {
        let Fetched { ticket, outcome } = fetched;
        if ticket.seq != self.issued {
            debug!(
                resource = R::PATH,
                seq = ticket.seq,
                latest = self.issued,
                "discarding stale list response"
            );
            return Applied::Stale;
        }
        self.in_flight = None;

        match outcome {
            Ok(page) => {
                let requested = ticket.query.page();
                let returned = page.pagination.current_page;
                if returned != requested {
                    warn!(
                        resource = R::PATH,
                        requested, returned, "list response is for a different page"
                    );
                    self.restore_shown_page();
                    return Applied::PageMismatch {
                        requested,
                        returned,
                    };
                }
                self.latest = Some(page);
                self.shown = Some(ticket.query);
                self.error = None;
                Applied::Accepted
            }
            Err(err) => {
                warn!(resource = R::PATH, error = %err, "list request failed");
                self.error = Some(err.user_message());
                self.restore_shown_page();
                Applied::Failed
            }
        }
    }

    /// Issues, runs and applies a ticket in one go.
    pub async fn run<G>(&mut self, gateway: &G, ticket: FetchTicket) -> Applied
    where
        G: ResourceGateway<R> + ?Sized,
    {
        let fetched = fetch::<R, G>(gateway, ticket).await;
        self.apply(fetched)
    }

    /// A page change that did not land points the query back at the page on
    /// screen, so `refetch` reloads what the user sees. Filter, sort and size
    /// changes are kept.
    fn restore_shown_page(&mut self) {
        let Some(shown) = self.shown.as_ref() else {
            return;
        };
        if shown.clone().at_page(self.query.page()) == self.query {
            self.query.set_page(shown.page());
        }
    }

    fn issue(&mut self) -> FetchTicket {
        self.issued += 1;
        self.in_flight = Some(self.issued);
        debug!(resource = R::PATH, seq = self.issued, page = self.query.page(), "list request issued");
        FetchTicket {
            seq: self.issued,
            query: self.query.clone(),
        }
    }
}
