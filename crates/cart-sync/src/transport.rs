use async_trait::async_trait;

use crate::api::cart::add::AddToCartForm;
use crate::api::cart::count::CartCountResponse;
use crate::api::cart::mini::MiniCartResponse;
use crate::api::cart::quantity::{Direction, RawQuantityResponse};
use crate::api::ApiError;
use crate::view::ProductId;

/// The server side of the cart, as seen by the controller.
///
/// [`crate::ApiClient`] talks to a real storefront; tests script replies.
#[async_trait]
pub trait CartTransport: Send + Sync + 'static {
    async fn cart_count(&self) -> Result<CartCountResponse, ApiError>;

    async fn mini_cart(&self) -> Result<MiniCartResponse, ApiError>;

    /// Move one line item by a single unit.
    async fn adjust(
        &self,
        product_id: &ProductId,
        direction: Direction,
        csrf_token: &str,
    ) -> Result<RawQuantityResponse, ApiError>;

    async fn add_to_cart(&self, form: &AddToCartForm) -> Result<serde_json::Value, ApiError>;
}
