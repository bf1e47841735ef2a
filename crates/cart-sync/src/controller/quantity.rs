//! Line-item increase/decrease.
//!
//! Per row the page moves between "below max" and "at max" and ends at
//! "removed", driven only by the quantity the server reports. Nothing here
//! adds or subtracts; totals are always the server's.

use crate::api::cart::quantity::{Direction, QuantityUpdate};
use crate::csrf::token_from_cookies;
use crate::transport::CartTransport;
use crate::view::{
    ids, resolve_max_quantity, stock_ceiling_message, CartView, ControlState, Notification,
    ProductId, DATA_MAX,
};

use super::{CartError, CartSyncController, Outcome};

impl<T: CartTransport, V: CartView> CartSyncController<T, V> {
    /// Add one unit of `product_id`.
    pub async fn increase(&self, product_id: &ProductId) -> Result<Outcome, CartError> {
        let (max_quantity, token) = {
            let view = self.inner.view.lock();
            let control = view.increase_control(product_id);
            if control.as_ref().is_some_and(|c| c.state.disabled) {
                tracing::debug!("increase for {} ignored, control disabled", product_id);
                return Ok(Outcome::Skipped);
            }
            let max_quantity = control
                .and_then(|c| c.data_max)
                .and_then(|raw| resolve_max_quantity(Some(&raw)))
                .or_else(|| {
                    resolve_max_quantity(view.row_attribute(product_id, DATA_MAX).as_deref())
                });
            (max_quantity, token_from_cookies(&view.cookies()))
        };

        let Some((sequence, update)) = self
            .request(product_id, Direction::Increase, &token)
            .await?
        else {
            return Ok(Outcome::Malformed);
        };

        {
            let mut view = self.inner.view.lock();
            if !self.admit(product_id, sequence) {
                return Ok(Outcome::Stale { sequence });
            }
            let was_locked = max_quantity.map(|max| locked(&*view, product_id, max));
            self.write_line_item(&mut *view, product_id, &update);
            self.write_cart_total(&mut *view, sequence, &update);
            if let (Some(max), Some(was_locked)) = (max_quantity, was_locked) {
                self.apply_ceiling(&mut *view, product_id, update.quantity, max, was_locked);
            }
        }

        self.refresh().await;
        Ok(Outcome::Applied(update))
    }

    /// Remove one unit of `product_id`, dropping its row at zero.
    pub async fn decrease(&self, product_id: &ProductId) -> Result<Outcome, CartError> {
        let (max_quantity, token) = {
            let view = self.inner.view.lock();
            let raw_max = view.row_attribute(product_id, DATA_MAX);
            (
                resolve_max_quantity(raw_max.as_deref()),
                token_from_cookies(&view.cookies()),
            )
        };

        let Some((sequence, update)) = self
            .request(product_id, Direction::Decrease, &token)
            .await?
        else {
            return Ok(Outcome::Malformed);
        };

        let outcome = {
            let mut view = self.inner.view.lock();
            if !self.admit(product_id, sequence) {
                return Ok(Outcome::Stale { sequence });
            }
            let was_locked = max_quantity.map(|max| locked(&*view, product_id, max));

            let outcome = if update.quantity > 0 {
                self.write_line_item(&mut *view, product_id, &update);
                Outcome::Applied(update)
            } else {
                if !view.remove_row(product_id) {
                    tracing::debug!("no row for {} to remove", product_id);
                }
                Outcome::Removed {
                    cart_total: update.cart_total,
                }
            };
            self.write_cart_total(&mut *view, sequence, &update);

            if update.quantity > 0 {
                if let (Some(max), Some(was_locked)) = (max_quantity, was_locked) {
                    self.apply_ceiling(&mut *view, product_id, update.quantity, max, was_locked);
                }
            }
            outcome
        };

        self.refresh().await;
        Ok(outcome)
    }

    /// Send one adjustment and run the malformed-response guard.
    ///
    /// Transport and decode failures are logged and returned; the page is
    /// left as it was.
    async fn request(
        &self,
        product_id: &ProductId,
        direction: Direction,
        token: &str,
    ) -> Result<Option<(u64, QuantityUpdate)>, CartError> {
        let sequence = self.inner.sequencer.issue();
        let raw = match self
            .inner
            .transport
            .adjust(product_id, direction, token)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("{:?} for {} failed: {}", direction, product_id, e);
                return Err(e.into());
            }
        };

        match QuantityUpdate::from_response(&raw) {
            Some(update) => {
                tracing::debug!(
                    "{:?} for {} (#{}) -> quantity {}",
                    direction,
                    product_id,
                    sequence,
                    update.quantity
                );
                Ok(Some((sequence, update)))
            }
            None => {
                tracing::debug!("{:?} for {}: reply has no quantity", direction, product_id);
                Ok(None)
            }
        }
    }

    fn admit(&self, product_id: &ProductId, sequence: u64) -> bool {
        let admitted =
            self.inner
                .sequencer
                .admit(self.inner.settings.stale_policy, product_id, sequence);
        if !admitted {
            tracing::debug!("dropping stale reply #{} for {}", sequence, product_id);
        }
        admitted
    }

    fn write_line_item(&self, view: &mut V, product_id: &ProductId, update: &QuantityUpdate) {
        view.set_text(&ids::quantity(product_id), &update.quantity.to_string());
        if let Some(item_total) = update.item_total {
            view.set_text(&ids::price(product_id), &self.format_amount(item_total));
        }
    }

    /// `cart-total` is shared by every row, so a reply older than the one
    /// that last wrote it leaves it alone.
    fn write_cart_total(&self, view: &mut V, sequence: u64, update: &QuantityUpdate) {
        let Some(cart_total) = update.cart_total else {
            return;
        };
        let policy = self.inner.settings.stale_policy;
        if !self.inner.sequencer.admit_cart_total(policy, sequence) {
            tracing::debug!("reply #{} is older than the shown cart total", sequence);
            return;
        }
        view.set_text(ids::CART_TOTAL, &self.format_amount(cart_total));
    }

    /// Lock or unlock the increase button against the stock ceiling.
    ///
    /// The "only N in stock" notice is raised only on the transition into
    /// the locked state.
    fn apply_ceiling(
        &self,
        view: &mut V,
        product_id: &ProductId,
        quantity: u64,
        max: u64,
        was_locked: bool,
    ) {
        let state = ControlState::for_quantity(quantity, max);
        view.set_increase_control(product_id, &state);

        if state.disabled {
            view.set_text(&ids::max_msg(product_id), &stock_ceiling_message(max));
            if !was_locked {
                view.notify(Notification::stock_ceiling(max));
            }
        } else {
            view.set_text(&ids::max_msg(product_id), "");
        }
    }
}

/// Whether the row already shows the stock ceiling, read before a reply is
/// written. The increase button decides when there is one; otherwise the
/// ceiling message, then the displayed quantity.
fn locked<V: CartView>(view: &V, product_id: &ProductId, max: u64) -> bool {
    if let Some(control) = view.increase_control(product_id) {
        return control.state.disabled;
    }
    if let Some(message) = view.element_text(&ids::max_msg(product_id)) {
        return !message.is_empty();
    }
    view.element_text(&ids::quantity(product_id))
        .and_then(|text| text.trim().parse::<u64>().ok())
        .is_some_and(|shown| shown >= max)
}
