//! Shared fixtures: a scripted transport, a simulated cart server, and page
//! helpers.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::StatusCode;
use serde_json::Value;

use cart_sync::api::cart::add::AddToCartForm;
use cart_sync::api::cart::count::CartCountResponse;
use cart_sync::api::cart::mini::MiniCartResponse;
use cart_sync::api::cart::quantity::{Direction, RawQuantityResponse};
use cart_sync::{
    ApiError, CartSyncController, CartTransport, Document, ProductId, SyncSettings,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// A failure the fake server can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Non-2xx status
    Status(u16),
    /// 200 with an HTML body
    NotJson,
}

impl Failure {
    fn into_error(self) -> ApiError {
        match self {
            Failure::Status(code) => ApiError::HttpStatus(
                StatusCode::from_u16(code).unwrap(),
                "server error".to_string(),
            ),
            Failure::NotJson => {
                ApiError::Decode(serde_json::from_str::<Value>("<html>").unwrap_err())
            }
        }
    }
}

/// One scripted reply to an adjust call.
#[derive(Debug, Clone)]
pub struct Scripted {
    pub delay: Duration,
    pub reply: Result<Value, Failure>,
}

impl Scripted {
    pub fn json(value: Value) -> Self {
        Self {
            delay: Duration::ZERO,
            reply: Ok(value),
        }
    }

    pub fn fail(failure: Failure) -> Self {
        Self {
            delay: Duration::ZERO,
            reply: Err(failure),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Count,
    Mini,
    Adjust {
        product_id: ProductId,
        direction: Direction,
        token: String,
    },
    Add(AddToCartForm),
}

/// Transport that answers from a script and records every call.
#[derive(Debug)]
pub struct ScriptedTransport {
    pub count: Mutex<Result<u64, Failure>>,
    pub mini_html: Mutex<Result<String, Failure>>,
    pub adjust_replies: Mutex<VecDeque<Scripted>>,
    pub add_reply: Mutex<Result<Value, Failure>>,
    pub calls: Mutex<Vec<Call>>,
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self {
            count: Mutex::new(Ok(0)),
            mini_html: Mutex::new(Ok("<ul></ul>".to_string())),
            adjust_replies: Mutex::new(VecDeque::new()),
            add_reply: Mutex::new(Ok(serde_json::json!({"success": true}))),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedTransport {
    pub fn with_adjust(self, replies: impl IntoIterator<Item = Scripted>) -> Self {
        self.adjust_replies.lock().extend(replies);
        self
    }

    pub fn with_count(self, count: u64) -> Self {
        *self.count.lock() = Ok(count);
        self
    }

    pub fn with_mini(self, html: &str) -> Self {
        *self.mini_html.lock() = Ok(html.to_string());
        self
    }

    pub fn adjust_calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, Call::Adjust { .. }))
            .cloned()
            .collect()
    }

    pub fn count_calls(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, Call::Count))
            .count()
    }
}

#[async_trait]
impl CartTransport for ScriptedTransport {
    async fn cart_count(&self) -> Result<CartCountResponse, ApiError> {
        self.calls.lock().push(Call::Count);
        let count = *self.count.lock();
        count
            .map(|cart_count| CartCountResponse { cart_count })
            .map_err(Failure::into_error)
    }

    async fn mini_cart(&self) -> Result<MiniCartResponse, ApiError> {
        self.calls.lock().push(Call::Mini);
        let html = self.mini_html.lock().clone();
        html.map(|html| MiniCartResponse { html })
            .map_err(Failure::into_error)
    }

    async fn adjust(
        &self,
        product_id: &ProductId,
        direction: Direction,
        csrf_token: &str,
    ) -> Result<RawQuantityResponse, ApiError> {
        self.calls.lock().push(Call::Adjust {
            product_id: product_id.clone(),
            direction,
            token: csrf_token.to_string(),
        });
        let scripted = self
            .adjust_replies
            .lock()
            .pop_front()
            .expect("no scripted adjust reply left");

        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        let value = scripted.reply.map_err(Failure::into_error)?;
        Ok(serde_json::from_value(value)?)
    }

    async fn add_to_cart(&self, form: &AddToCartForm) -> Result<Value, ApiError> {
        self.calls.lock().push(Call::Add(form.clone()));
        let reply = self.add_reply.lock().clone();
        reply.map_err(Failure::into_error)
    }
}

/// A tiny cart server: unit prices per product and a quantity per line
/// item, answering the way the storefront does.
#[derive(Debug, Default)]
pub struct SimulatedCart {
    pub prices: HashMap<ProductId, f64>,
    pub quantities: Mutex<HashMap<ProductId, u64>>,
}

impl SimulatedCart {
    pub fn with_item(mut self, product_id: &str, unit_price: f64, quantity: u64) -> Self {
        let id = ProductId::from(product_id);
        self.prices.insert(id.clone(), unit_price);
        self.quantities.get_mut().insert(id, quantity);
        self
    }

    fn total(&self, quantities: &HashMap<ProductId, u64>) -> f64 {
        quantities
            .iter()
            .map(|(id, q)| self.prices.get(id).copied().unwrap_or(0.0) * *q as f64)
            .sum()
    }
}

#[async_trait]
impl CartTransport for SimulatedCart {
    async fn cart_count(&self) -> Result<CartCountResponse, ApiError> {
        let cart_count = self.quantities.lock().values().sum();
        Ok(CartCountResponse { cart_count })
    }

    async fn mini_cart(&self) -> Result<MiniCartResponse, ApiError> {
        let html = format!("<p>{} lines</p>", self.quantities.lock().len());
        Ok(MiniCartResponse { html })
    }

    async fn adjust(
        &self,
        product_id: &ProductId,
        direction: Direction,
        _csrf_token: &str,
    ) -> Result<RawQuantityResponse, ApiError> {
        let mut quantities = self.quantities.lock();
        let Some(current) = quantities.get(product_id).copied() else {
            return Err(ApiError::HttpStatus(StatusCode::NOT_FOUND, "Not Found".into()));
        };
        let quantity = match direction {
            Direction::Increase => current + 1,
            Direction::Decrease => current.saturating_sub(1),
        };
        if quantity == 0 {
            quantities.remove(product_id);
        } else {
            quantities.insert(product_id.clone(), quantity);
        }
        let unit = self.prices.get(product_id).copied().unwrap_or(0.0);
        let cart_total = self.total(&quantities);

        Ok(serde_json::from_value(serde_json::json!({
            "quantity": quantity,
            "item_total": unit * quantity as f64,
            "cart_total": cart_total,
        }))?)
    }

    async fn add_to_cart(&self, _form: &AddToCartForm) -> Result<Value, ApiError> {
        Ok(serde_json::json!({"success": true}))
    }
}

pub fn controller<T: CartTransport>(
    transport: T,
    page: Document,
) -> CartSyncController<T, Document> {
    controller_with(transport, page, SyncSettings::default())
}

pub fn controller_with<T: CartTransport>(
    transport: T,
    page: Document,
    settings: SyncSettings,
) -> CartSyncController<T, Document> {
    init_tracing();
    CartSyncController::new(transport, Arc::new(Mutex::new(page)), settings)
}

/// Snapshot of the page behind a controller.
pub fn page<T: CartTransport>(controller: &CartSyncController<T, Document>) -> Document {
    controller.view().lock().clone()
}
