//! Client-side search/view state coordination for storefront result views.
//!
//! The builder in [`view_model`] is pure. Everything else talks to the
//! backend through the [`storefront_gateway`] traits and owns exactly one
//! piece of state: the search coordinator owns the query and the displayed
//! page, the cart tracker owns the cart summary, the comparison session
//! mirrors the staged comparison set.

pub mod account;
pub mod cart;
pub mod comparison;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod storefront;
pub mod view_model;

pub use account::AccountScope;
pub use cart::CartTracker;
pub use comparison::{CandidateOutcome, ComparisonSession, CANDIDATE_KEY_PREFIX, CANDIDATE_SET_KEY};
pub use coordinator::{QueryParam, SearchCoordinator, SearchOutcome, SearchSnapshot};
pub use error::SessionError;
pub use events::{EventSink, StorefrontEvent, Toast, ToastVariant};
pub use storefront::{ResultsView, Storefront, StorefrontSettings};
pub use view_model::{build, header_text, DisplayCard, DisplayField, DisplayImage, DisplayPage};
