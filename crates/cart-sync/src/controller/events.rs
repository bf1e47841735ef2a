use tokio::task::JoinHandle;

use crate::api::cart::add::AddToCartForm;
use crate::transport::CartTransport;
use crate::view::{CartView, ProductId};

use super::CartSyncController;

/// A user interaction with the cart widget.
///
/// Events name their line item rather than a specific button, so rows added
/// after [`CartSyncController::subscribe`] are handled without re-binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Click on a `cart-increase-btn`
    Increase(ProductId),
    /// Click on a `cart-decrease-btn`
    Decrease(ProductId),
    /// Submission of an `add-to-cart-form`
    Submit(AddToCartForm),
}

/// Handle for a running event subscription.
///
/// Events are dispatched only while this handle is alive: keep it for as
/// long as the page should react. Dropping it, or calling
/// [`Subscription::unsubscribe`], stops dispatching new events, and events
/// sent afterwards are discarded. Handlers already started run to
/// completion.
#[derive(Debug)]
#[must_use = "dropping the Subscription stops event dispatch"]
pub struct Subscription {
    dispatcher: JoinHandle<()>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        self.dispatcher.abort();
    }

    /// True once the dispatcher has stopped, either by teardown or because
    /// every sender was dropped.
    pub fn is_finished(&self) -> bool {
        self.dispatcher.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispatcher.abort();
    }
}

impl<T: CartTransport, V: CartView> CartSyncController<T, V> {
    /// Start handling UI events sent on the returned channel.
    ///
    /// Each event runs in its own task, so replies land in whatever order
    /// the server answers. Dispatch stops when the returned [`Subscription`]
    /// is dropped, so bind it to a name rather than `_`.
    #[must_use = "dropping the Subscription stops event dispatch"]
    pub fn subscribe(&self) -> (flume::Sender<UiEvent>, Subscription) {
        let (sender, receiver) = flume::unbounded::<UiEvent>();
        let controller = self.clone();

        let dispatcher = tokio::spawn(async move {
            while let Ok(event) = receiver.recv_async().await {
                let controller = controller.clone();
                tokio::spawn(async move {
                    controller.dispatch(event).await;
                });
            }
            tracing::debug!("event channel closed, dispatcher stopping");
        });

        (sender, Subscription { dispatcher })
    }

    /// Handle a single event to completion.
    pub async fn dispatch(&self, event: UiEvent) {
        let result = match &event {
            UiEvent::Increase(product_id) => self.increase(product_id).await.map(|_| ()),
            UiEvent::Decrease(product_id) => self.decrease(product_id).await.map(|_| ()),
            UiEvent::Submit(form) => self.submit(form).await,
        };
        if let Err(e) = result {
            tracing::debug!("{:?} finished with error: {}", event, e);
        }
    }
}
