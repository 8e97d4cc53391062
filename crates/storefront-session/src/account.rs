use std::sync::Arc;

use storefront_core::resolve_effective_account_id;
use tokio::sync::watch;

/// The resolved effective account shared by every session component.
///
/// Holds the normalized id, never the raw host value. Clones share state.
#[derive(Debug, Clone)]
pub struct AccountScope {
    inner: Arc<watch::Sender<Option<String>>>,
}

impl AccountScope {
    #[must_use]
    pub fn new(raw: Option<&str>) -> Self {
        let (tx, _rx) = watch::channel(resolve_effective_account_id(raw));
        Self {
            inner: Arc::new(tx),
        }
    }

    /// The account id to pass to backend calls.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.inner.borrow().clone()
    }

    /// Resolves `raw` and stores it. Returns `true` only when the resolved
    /// value changed.
    pub fn set_raw(&self, raw: Option<&str>) -> bool {
        let resolved = resolve_effective_account_id(raw);
        self.inner.send_if_modified(|current| {
            if *current == resolved {
                false
            } else {
                *current = resolved;
                true
            }
        })
    }
}
