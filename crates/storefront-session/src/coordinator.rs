//! Search and pagination coordination.
//!
//! Every search is tagged with a sequence number when it is issued. A
//! response is applied only if its number is still the latest one issued;
//! anything older is discarded when it lands. This makes the displayed page
//! follow request-issue order rather than response-arrival order, without
//! needing to cancel in-flight requests.
//!
//! The state lock is never held across a backend call, so any number of
//! searches may be in flight at once.

use std::sync::Arc;

use storefront_core::{FieldMapping, Query, Refinement, SearchRequest};
use storefront_gateway::CatalogGateway;
use tokio::sync::Mutex;

use crate::account::AccountScope;
use crate::error::SessionError;
use crate::view_model::{build, header_text, DisplayPage};

/// A single query parameter change. Each change issues one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParam {
    Term(Option<String>),
    CategoryId(Option<String>),
    Refinements(Vec<Refinement>),
    Page(i32),
}

/// What happened to a search response once it arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The response was the latest one and replaced the displayed page.
    Applied,
    /// A newer search was issued meanwhile; the response was dropped.
    Stale,
}

#[derive(Debug)]
struct SearchState {
    query: Query,
    display: Option<DisplayPage>,
    /// Query page of the response `display` was built from.
    accepted_page: i32,
    loading: bool,
    latest_seq: u64,
}

/// A search captured at issue time.
struct Ticket {
    seq: u64,
    page: i32,
    request: SearchRequest,
    account: Option<String>,
}

/// A consistent copy of the coordinator's state.
///
/// `query` is what was last requested; `display` and `accepted_page` are the
/// last response applied. The header and navigation flags follow the
/// applied response, so they always agree with the cards.
#[derive(Debug, Clone)]
pub struct SearchSnapshot {
    pub query: Query,
    pub display: Option<DisplayPage>,
    pub accepted_page: i32,
    pub loading: bool,
}

impl SearchSnapshot {
    #[must_use]
    pub fn header_text(&self) -> String {
        self.display
            .as_ref()
            .map(|page| header_text(page.total, page.page_size, self.accepted_page))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn has_more_pages(&self) -> bool {
        self.display.as_ref().is_some_and(DisplayPage::has_more_pages)
    }

    #[must_use]
    pub fn has_previous_page(&self) -> bool {
        self.display.is_some() && self.accepted_page > 1
    }
}

/// Owns the query parameters and the displayed page of a results view.
pub struct SearchCoordinator {
    gateway: Arc<dyn CatalogGateway>,
    community_id: String,
    account: AccountScope,
    field_mapping: Option<FieldMapping>,
    landing_category_id: Option<String>,
    state: Mutex<SearchState>,
}

impl SearchCoordinator {
    pub fn new(
        gateway: Arc<dyn CatalogGateway>,
        community_id: impl Into<String>,
        account: AccountScope,
        field_mapping: Option<FieldMapping>,
        landing_category_id: Option<String>,
    ) -> Self {
        Self {
            gateway,
            community_id: community_id.into(),
            account,
            field_mapping,
            state: Mutex::new(SearchState {
                query: Query::landing(landing_category_id.clone()),
                display: None,
                accepted_page: 1,
                loading: false,
                latest_seq: 0,
            }),
            landing_category_id,
        }
    }

    /// Runs a search with the current query.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Gateway`] when the latest search fails. A
    /// failed stale search is dropped like any other stale response.
    pub async fn search(&self) -> Result<SearchOutcome, SessionError> {
        self.issue(|_| {}).await
    }

    /// Changes one query parameter and searches.
    ///
    /// # Errors
    ///
    /// See [`Self::search`].
    pub async fn set_query_param(&self, param: QueryParam) -> Result<SearchOutcome, SessionError> {
        self.issue(move |query| match param {
            QueryParam::Term(term) => query.term = term,
            QueryParam::CategoryId(category_id) => query.category_id = category_id,
            QueryParam::Refinements(refinements) => query.refinements = refinements,
            QueryParam::Page(page) => query.page = page,
        })
        .await
    }

    /// Advances one page. Not bounded by the last page.
    ///
    /// # Errors
    ///
    /// See [`Self::search`].
    pub async fn next_page(&self) -> Result<SearchOutcome, SessionError> {
        self.issue(|query| query.page = query.page.saturating_add(1)).await
    }

    /// Goes back one page. Not bounded below.
    ///
    /// # Errors
    ///
    /// See [`Self::search`].
    pub async fn previous_page(&self) -> Result<SearchOutcome, SessionError> {
        self.issue(|query| query.page = query.page.saturating_sub(1)).await
    }

    /// Drops all refinements, returns to the landing category and page 1.
    /// The search term is kept.
    ///
    /// # Errors
    ///
    /// See [`Self::search`].
    pub async fn clear_all(&self) -> Result<SearchOutcome, SessionError> {
        let landing = self.landing_category_id.clone();
        self.issue(move |query| {
            query.refinements.clear();
            query.category_id = landing;
            query.page = 1;
        })
        .await
    }

    pub async fn snapshot(&self) -> SearchSnapshot {
        let state = self.state.lock().await;
        SearchSnapshot {
            query: state.query.clone(),
            display: state.display.clone(),
            accepted_page: state.accepted_page,
            loading: state.loading,
        }
    }

    pub async fn query(&self) -> Query {
        self.state.lock().await.query.clone()
    }

    pub async fn display_page(&self) -> Option<DisplayPage> {
        self.state.lock().await.display.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.loading
    }

    /// Mutates the query and captures a ticket under one lock, then calls the
    /// backend with the lock released and applies the response if still
    /// current.
    async fn issue<F>(&self, mutate: F) -> Result<SearchOutcome, SessionError>
    where
        F: FnOnce(&mut Query),
    {
        let ticket = {
            let mut state = self.state.lock().await;
            mutate(&mut state.query);
            state.latest_seq += 1;
            state.loading = true;
            Ticket {
                seq: state.latest_seq,
                page: state.query.page,
                request: state.query.to_search_request(),
                account: self.account.current(),
            }
        };

        tracing::debug!(
            seq = ticket.seq,
            page = ticket.request.page,
            "issuing storefront search"
        );

        let result = self
            .gateway
            .search(
                &self.community_id,
                &ticket.request,
                ticket.account.as_deref(),
            )
            .await;

        let mut state = self.state.lock().await;
        if ticket.seq != state.latest_seq {
            tracing::debug!(
                seq = ticket.seq,
                latest = state.latest_seq,
                ok = result.is_ok(),
                "discarding stale search response"
            );
            return Ok(SearchOutcome::Stale);
        }

        state.loading = false;
        match result {
            Ok(page) => {
                let display_page = build(page, self.field_mapping.as_ref());
                tracing::debug!(
                    seq = ticket.seq,
                    total = display_page.total,
                    cards = display_page.cards.len(),
                    "applied search response"
                );
                state.display = Some(display_page);
                state.accepted_page = ticket.page;
                Ok(SearchOutcome::Applied)
            }
            Err(e) => {
                tracing::warn!(seq = ticket.seq, error = %e, "storefront search failed");
                Err(e.into())
            }
        }
    }
}
