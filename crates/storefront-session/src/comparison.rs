//! Product comparison session.
//!
//! The staged set lives in the scratch cache: one `compare:{id}` entry per
//! candidate plus the ordered id list under [`CANDIDATE_SET_KEY`]. Local
//! state mirrors the ids as of the last add and whether the comparison modal
//! is open.
//!
//! ```text
//!   add_candidate ──► [staging] ──open() ok──► [open] ──close()──► [staging, empty]
//!                          │
//!                          └──open() err──► [staging] (logged)
//! ```

use std::sync::Arc;

use storefront_core::FieldMapping;
use storefront_gateway::{CatalogGateway, ScratchCache};
use tokio::sync::Mutex;

use crate::account::AccountScope;
use crate::error::SessionError;
use crate::view_model::{build_card, DisplayCard};

/// Scratch-cache key prefix for staged candidates.
pub const CANDIDATE_KEY_PREFIX: &str = "compare:";

/// Scratch-cache key holding the staged ids as a JSON array.
pub const CANDIDATE_SET_KEY: &str = "compare-set";

/// Result of staging a comparison candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOutcome {
    Added,
    AlreadyStaged,
    /// The set is full; the candidate was not stored.
    CapacityReached,
    /// The cache could not be read or written. Logged only; the user is
    /// not told.
    NotSaved,
}

#[derive(Debug, Default)]
struct ComparisonState {
    candidate_ids: Vec<String>,
    is_modal_open: bool,
    cards: Vec<DisplayCard>,
}

pub struct ComparisonSession {
    gateway: Arc<dyn CatalogGateway>,
    cache: Arc<dyn ScratchCache>,
    community_id: String,
    account: AccountScope,
    capacity: usize,
    field_mapping: Option<FieldMapping>,
    state: Mutex<ComparisonState>,
}

impl ComparisonSession {
    pub fn new(
        gateway: Arc<dyn CatalogGateway>,
        cache: Arc<dyn ScratchCache>,
        community_id: impl Into<String>,
        account: AccountScope,
        capacity: usize,
        field_mapping: Option<FieldMapping>,
    ) -> Self {
        Self {
            gateway,
            cache,
            community_id: community_id.into(),
            account,
            capacity,
            field_mapping,
            state: Mutex::new(ComparisonState::default()),
        }
    }

    /// Stages a product for comparison.
    ///
    /// The staged set is read back from the scratch cache first, so
    /// duplicates and the capacity are checked against what earlier sessions
    /// staged too. The state lock is held across the cache round trip so
    /// concurrent adds cannot overshoot the capacity.
    pub async fn add_candidate(&self, product_id: &str) -> CandidateOutcome {
        let mut state = self.state.lock().await;

        let Some(mut staged) = self.load_staged().await else {
            return CandidateOutcome::NotSaved;
        };
        state.candidate_ids.clone_from(&staged);

        if staged.iter().any(|id| id == product_id) {
            return CandidateOutcome::AlreadyStaged;
        }
        if staged.len() >= self.capacity {
            tracing::warn!(
                product_id,
                capacity = self.capacity,
                "comparison set is full; candidate ignored"
            );
            return CandidateOutcome::CapacityReached;
        }

        let key = format!("{CANDIDATE_KEY_PREFIX}{product_id}");
        if let Err(e) = self.cache.put(&key, product_id).await {
            tracing::warn!(product_id, error = %e, "failed to stage comparison candidate");
            return CandidateOutcome::NotSaved;
        }

        staged.push(product_id.to_owned());
        let encoded = match serde_json::to_string(&staged) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(product_id, error = %e, "failed to encode comparison set");
                return CandidateOutcome::NotSaved;
            }
        };
        if let Err(e) = self.cache.put(CANDIDATE_SET_KEY, &encoded).await {
            tracing::warn!(product_id, error = %e, "failed to record comparison set");
            return CandidateOutcome::NotSaved;
        }

        state.candidate_ids = staged;
        CandidateOutcome::Added
    }

    /// Reads the staged ids from the cache. `None` when they cannot be read.
    async fn load_staged(&self) -> Option<Vec<String>> {
        let raw = match self.cache.get(CANDIDATE_SET_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Some(Vec::new()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read comparison set");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(ids) => Some(ids),
            Err(e) => {
                tracing::warn!(error = %e, "comparison set in cache is unreadable");
                None
            }
        }
    }

    /// Loads the comparison products and opens the modal.
    ///
    /// The modal opens only when the load succeeds; a failure is logged and
    /// leaves it closed. Returns the number of products loaded.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Gateway`] if the products cannot be loaded.
    pub async fn open(&self) -> Result<usize, SessionError> {
        let account = self.account.current();
        let products = match self
            .gateway
            .comparison_products(&self.community_id, account.as_deref())
            .await
        {
            Ok(products) => products,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load comparison products");
                return Err(e.into());
            }
        };

        let cards: Vec<DisplayCard> = products
            .into_iter()
            .map(|p| build_card(p, self.field_mapping.as_ref()))
            .collect();
        let count = cards.len();

        let mut state = self.state.lock().await;
        state.cards = cards;
        state.is_modal_open = true;
        Ok(count)
    }

    /// Clears the scratch cache and local state and closes the modal.
    ///
    /// Local state is cleared even if the cache clear fails.
    pub async fn close(&self) {
        if let Err(e) = self.cache.clear().await {
            tracing::warn!(error = %e, "failed to clear comparison cache");
        }
        let mut state = self.state.lock().await;
        state.candidate_ids.clear();
        state.cards.clear();
        state.is_modal_open = false;
    }

    pub async fn is_comparing_modal_open(&self) -> bool {
        self.state.lock().await.is_modal_open
    }

    pub async fn candidate_ids(&self) -> Vec<String> {
        self.state.lock().await.candidate_ids.clone()
    }

    /// Cards shown in the open modal; empty while closed.
    pub async fn cards(&self) -> Vec<DisplayCard> {
        self.state.lock().await.cards.clone()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
