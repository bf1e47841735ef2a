//! The page the controller renders into.
//!
//! [`CartView`] is the only way the controller touches the page. Every write
//! names an element by its id from the server-rendered template, and a write
//! to an element that is not on the page is simply dropped.

mod document;
mod notification;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use document::{Document, Element, IncreaseControl, Row};
pub use notification::{Notification, NotificationLevel};
pub(crate) use notification::stock_ceiling_message;

/// Ceiling used when a row carries no `data-max` attribute.
pub const UNBOUNDED_MAX: u64 = 999_999;

/// Attribute holding the stock ceiling on a row or an increase button.
pub const DATA_MAX: &str = "data-max";

/// Element ids and class markers the page template provides.
pub mod ids {
    use super::ProductId;

    pub const CART_COUNT: &str = "cart-count";
    pub const MINI_CART: &str = "mini-cart-container";
    pub const CART_TOTAL: &str = "cart-total";

    pub const INCREASE_BUTTON_CLASS: &str = "cart-increase-btn";
    pub const DECREASE_BUTTON_CLASS: &str = "cart-decrease-btn";
    pub const ADD_TO_CART_FORM_CLASS: &str = "add-to-cart-form";

    pub fn quantity(product_id: &ProductId) -> String {
        format!("quantity-{}", product_id)
    }

    pub fn price(product_id: &ProductId) -> String {
        format!("price-{}", product_id)
    }

    pub fn max_msg(product_id: &ProductId) -> String {
        format!("max-msg-{}", product_id)
    }
}

/// Opaque product identifier, as it appears in `data-product-id`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Visual state of a row's increase button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub disabled: bool,
    pub label: String,
    /// Rendered with the muted "secondary" style
    pub secondary: bool,
    pub aria_disabled: bool,
}

impl ControlState {
    pub const ENABLED_LABEL: &'static str = "+";
    pub const AT_CEILING_LABEL: &'static str = "Max";

    pub fn enabled() -> Self {
        Self {
            disabled: false,
            label: Self::ENABLED_LABEL.to_string(),
            secondary: false,
            aria_disabled: false,
        }
    }

    pub fn at_ceiling() -> Self {
        Self {
            disabled: true,
            label: Self::AT_CEILING_LABEL.to_string(),
            secondary: true,
            aria_disabled: true,
        }
    }

    pub fn for_quantity(quantity: u64, max_quantity: u64) -> Self {
        if quantity >= max_quantity {
            Self::at_ceiling()
        } else {
            Self::enabled()
        }
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::enabled()
    }
}

/// Resolve a raw `data-max` attribute.
///
/// Absent means unbounded. Present but not a non-negative integer yields
/// `None`, and the caller leaves the increase button alone.
pub fn resolve_max_quantity(raw: Option<&str>) -> Option<u64> {
    match raw {
        None => Some(UNBOUNDED_MAX),
        Some(value) => value.trim().parse::<u64>().ok(),
    }
}

/// Render a server-provided amount for display.
pub fn format_amount(currency_symbol: &str, amount: f64) -> String {
    format!("{}{:.2}", currency_symbol, amount)
}

/// Rendering surface for cart state.
///
/// Implementations mirror a document: elements addressed by id, line-item
/// rows addressed by product id, and a notification area.
pub trait CartView: Send + 'static {
    /// Replace an element's text. Returns `false` when the element is absent.
    fn set_text(&mut self, id: &str, text: &str) -> bool;

    /// Inject markup into an element and make it visible.
    fn show_fragment(&mut self, id: &str, html: &str) -> bool;

    fn element_text(&self, id: &str) -> Option<String>;

    fn hide(&mut self, id: &str);

    /// Remove a line-item row and everything inside it.
    fn remove_row(&mut self, product_id: &ProductId) -> bool;

    fn row_attribute(&self, product_id: &ProductId, name: &str) -> Option<String>;

    fn increase_control(&self, product_id: &ProductId) -> Option<IncreaseControl>;

    fn set_increase_control(&mut self, product_id: &ProductId, state: &ControlState);

    /// The page's cookie string, `name=value; name=value`.
    fn cookies(&self) -> String;

    fn notify(&mut self, notification: Notification);
}
