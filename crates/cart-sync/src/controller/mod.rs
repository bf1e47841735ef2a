//! Mirrors server-authoritative cart state into a [`CartView`].
//!
//! Every operation follows the same shape: read what it needs from the view,
//! release the view, await the server, then take the view again and apply the
//! reply in one go. The view lock is never held across an `.await`, so each
//! reply's mutation runs to completion before another one starts.

mod events;
mod quantity;
mod sequence;
mod submit;
mod summary;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::api::cart::quantity::QuantityUpdate;
use crate::api::ApiError;
use crate::transport::CartTransport;
use crate::view::CartView;

pub use events::{Subscription, UiEvent};
pub use sequence::StalePolicy;

use sequence::Sequencer;

/// Default delay before the mini-cart preview hides itself.
pub const MINI_CART_HIDE_AFTER: Duration = Duration::from_secs(3);

#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("cart API error: {0}")]
    Api(#[from] ApiError),
}

/// Rendering and ordering knobs for the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    pub currency_symbol: String,
    pub mini_cart_hide_after: Duration,
    pub stale_policy: StalePolicy,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            mini_cart_hide_after: MINI_CART_HIDE_AFTER,
            stale_policy: StalePolicy::default(),
        }
    }
}

/// What a quantity operation did to the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Displays now show this server state
    Applied(QuantityUpdate),
    /// Quantity reached zero and the row is gone
    Removed { cart_total: Option<f64> },
    /// The increase button was disabled, nothing was sent
    Skipped,
    /// The reply had no numeric quantity, nothing was written
    Malformed,
    /// A newer reply for the same line item was already applied
    Stale { sequence: u64 },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Applied(update) => write!(f, "quantity is now {}", update.quantity),
            Outcome::Removed { .. } => write!(f, "line item removed"),
            Outcome::Skipped => write!(f, "increase is disabled, nothing sent"),
            Outcome::Malformed => write!(f, "reply had no quantity, page unchanged"),
            Outcome::Stale { sequence } => write!(f, "reply #{} was stale, page unchanged", sequence),
        }
    }
}

struct Inner<T, V> {
    transport: T,
    view: Arc<Mutex<V>>,
    settings: SyncSettings,
    sequencer: Sequencer,
}

/// Cart widget controller.
///
/// Cheap to clone; clones share the transport, the view and the request
/// sequence.
pub struct CartSyncController<T, V> {
    inner: Arc<Inner<T, V>>,
}

impl<T, V> Clone for CartSyncController<T, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: CartTransport, V: CartView> CartSyncController<T, V> {
    pub fn new(transport: T, view: Arc<Mutex<V>>, settings: SyncSettings) -> Self {
        Self {
            inner: Arc::new(Inner {
                transport,
                view,
                settings,
                sequencer: Sequencer::default(),
            }),
        }
    }

    pub fn view(&self) -> &Arc<Mutex<V>> {
        &self.inner.view
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.inner.settings
    }

    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    /// Page-load step: fetch the count badge and the mini-cart preview.
    pub async fn load(&self) {
        tracing::debug!("loading cart summary");
        self.refresh().await;
    }

    /// Load the summary and start listening for UI events.
    ///
    /// Events are handled while the returned [`Subscription`] is kept alive.
    #[must_use = "dropping the Subscription stops event dispatch"]
    pub async fn start(&self) -> (flume::Sender<UiEvent>, Subscription) {
        self.load().await;
        self.subscribe()
    }

    fn format_amount(&self, amount: f64) -> String {
        crate::view::format_amount(&self.inner.settings.currency_symbol, amount)
    }
}
