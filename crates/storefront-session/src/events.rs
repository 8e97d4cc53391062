//! Notifications raised to the containing view.

use serde::Serialize;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Success,
    Error,
}

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub variant: ToastVariant,
    pub title: String,
    pub message: String,
}

impl Toast {
    #[must_use]
    pub fn cart_updated() -> Self {
        Self {
            variant: ToastVariant::Success,
            title: "Success".to_owned(),
            message: "Your cart has been updated.".to_owned(),
        }
    }

    #[must_use]
    pub fn add_to_cart_failed(product_name: &str) -> Self {
        Self {
            variant: ToastVariant::Error,
            title: "Error".to_owned(),
            message: format!(
                "{product_name} could not be added to your cart at this time. Please try again later."
            ),
        }
    }
}

/// Events emitted by the session layer. Serialized with the event name in
/// `type` (`calltoaction`, `showdetail`, `cartchanged`, `toast`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorefrontEvent {
    #[serde(rename_all = "camelCase")]
    CallToAction {
        product_id: String,
        product_name: String,
    },
    #[serde(rename_all = "camelCase")]
    ShowDetail { product_id: String },
    CartChanged,
    Toast(Toast),
}

/// Cheap-to-clone sender half of the event stream.
///
/// Emitting never fails: with no listener left the event is dropped.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<StorefrontEvent>,
}

impl EventSink {
    /// Creates a sink and the receiver the containing view drains.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<StorefrontEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn emit(&self, event: StorefrontEvent) {
        if let Err(err) = self.tx.send(event) {
            tracing::debug!(event = ?err.0, "no event listener; dropping event");
        }
    }
}
