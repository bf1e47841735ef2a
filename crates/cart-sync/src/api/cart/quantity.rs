//! Increment/decrement of a single line item.
//!
//! Both routes answer with the same payload. The payload is kept loosely
//! typed ([`RawQuantityResponse`]) so that a reply missing its quantity is a
//! value the controller can inspect rather than a decode failure.

use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{ApiError, ApiRequest, CSRF_HEADER, REQUESTED_WITH_HEADER, XML_HTTP_REQUEST};
use crate::view::ProductId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Increase,
    Decrease,
}

impl Direction {
    pub fn path(&self, product_id: &ProductId) -> String {
        match self {
            Direction::Increase => format!("/cart/increase/{}/", product_id),
            Direction::Decrease => format!("/cart/decrease/{}/", product_id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuantityRequest {
    pub product_id: ProductId,
    pub direction: Direction,
    /// Token from the `csrftoken` cookie, may be empty
    pub csrf_token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawQuantityResponse {
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub item_total: Option<Value>,
    #[serde(default)]
    pub cart_total: Option<Value>,
}

/// A quantity response that passed the malformed-response guard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityUpdate {
    pub quantity: u64,
    pub item_total: Option<f64>,
    pub cart_total: Option<f64>,
}

impl QuantityUpdate {
    /// Returns `None` unless the payload carries a non-negative integer
    /// quantity. Totals that are missing or not numbers are left as `None`
    /// and their displays are not written.
    pub fn from_response(raw: &RawQuantityResponse) -> Option<Self> {
        let quantity = raw.quantity.as_ref().and_then(as_quantity)?;

        Some(Self {
            quantity,
            item_total: raw.item_total.as_ref().and_then(Value::as_f64),
            cart_total: raw.cart_total.as_ref().and_then(Value::as_f64),
        })
    }
}

fn as_quantity(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    // Python floats such as `3.0` still count.
    value
        .as_f64()
        .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
        .map(|f| f as u64)
}

impl ApiRequest for QuantityRequest {
    type Response = RawQuantityResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = base_url.join(&self.direction.path(&self.product_id))?;
        Ok(client
            .post(full_url)
            .header(CSRF_HEADER, self.csrf_token)
            .header(REQUESTED_WITH_HEADER, XML_HTTP_REQUEST))
    }
}
