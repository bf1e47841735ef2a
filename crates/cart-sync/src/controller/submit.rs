use crate::api::cart::add::AddToCartForm;
use crate::transport::CartTransport;
use crate::view::{CartView, Notification};

use super::{CartError, CartSyncController};

impl<T: CartTransport, V: CartView> CartSyncController<T, V> {
    /// Submit an add-to-cart form in the background.
    ///
    /// On success the summary is refreshed and a success toast shown. Any
    /// failure (transport, status, or a body that is not JSON) shows an
    /// error notification and leaves the cart displays as they were.
    pub async fn submit(&self, form: &AddToCartForm) -> Result<(), CartError> {
        match self.inner.transport.add_to_cart(form).await {
            Ok(_) => {
                tracing::debug!("added to cart via {}", form.action);
                self.refresh().await;
                self.inner.view.lock().notify(Notification::added_to_cart());
                Ok(())
            }
            Err(e) => {
                tracing::warn!("add to cart via {} failed: {}", form.action, e);
                self.inner
                    .view
                    .lock()
                    .notify(Notification::add_to_cart_failed());
                Err(e.into())
            }
        }
    }
}
