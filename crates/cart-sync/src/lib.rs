//! Keeps a storefront's cart widget in step with the server-side cart.
//!
//! The server owns every number shown in the cart. This crate fetches those
//! numbers, submits add-to-cart forms, and bumps line-item quantities, then
//! mirrors each response into a [`CartView`]. The HTTP side sits behind
//! [`CartTransport`] so the controller can be driven without a network.

pub mod api;
pub mod config;
pub mod controller;
pub mod csrf;
pub mod transport;
pub mod view;

pub use api::{ApiClient, ApiError};
pub use config::{Config, ConfigError};
pub use controller::{
    CartError, CartSyncController, Outcome, StalePolicy, Subscription, SyncSettings, UiEvent,
};
pub use transport::CartTransport;
pub use view::{CartView, ControlState, Document, Notification, NotificationLevel, ProductId};
