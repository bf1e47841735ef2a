use std::sync::Arc;

use crate::transport::CartTransport;
use crate::view::{ids, CartView};

use super::{CartError, CartSyncController};

impl<T: CartTransport, V: CartView> CartSyncController<T, V> {
    /// Fetch the item count and write it into the badge, if the page has one.
    pub async fn refresh_count(&self) -> Result<u64, CartError> {
        let response = self.inner.transport.cart_count().await?;
        self.inner
            .view
            .lock()
            .set_text(ids::CART_COUNT, &response.cart_count.to_string());
        Ok(response.cart_count)
    }

    /// Fetch the preview fragment, show it, and schedule it to hide again.
    pub async fn refresh_preview(&self) -> Result<(), CartError> {
        let response = self.inner.transport.mini_cart().await?;

        let shown = self
            .inner
            .view
            .lock()
            .show_fragment(ids::MINI_CART, &response.html);
        if !shown {
            return Ok(());
        }

        let view = Arc::clone(&self.inner.view);
        let delay = self.inner.settings.mini_cart_hide_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            view.lock().hide(ids::MINI_CART);
        });
        Ok(())
    }

    /// Refresh the badge and the preview together. Failures are logged and
    /// otherwise ignored; the page keeps whatever it showed before.
    pub async fn refresh(&self) {
        let (count, preview) = futures::join!(self.refresh_count(), self.refresh_preview());
        if let Err(e) = count {
            tracing::debug!("cart count refresh failed: {}", e);
        }
        if let Err(e) = preview {
            tracing::debug!("mini-cart refresh failed: {}", e);
        }
    }
}
