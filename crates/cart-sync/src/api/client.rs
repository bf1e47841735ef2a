use async_trait::async_trait;
use reqwest::{header::HeaderMap, header::HeaderValue, header::ACCEPT, Client};
use url::Url;

use super::cart::add::{AddToCartForm, AddToCartRequest};
use super::cart::count::{CartCountRequest, CartCountResponse};
use super::cart::mini::{MiniCartRequest, MiniCartResponse};
use super::cart::quantity::{Direction, QuantityRequest, RawQuantityResponse};
use super::error::ApiError;
use super::ApiRequest;
use crate::transport::CartTransport;
use crate::view::ProductId;

/// HTTP client for the storefront's cart routes.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub remote: Url,
    client: Client,
}

impl ApiClient {
    pub fn new(remote: &Url) -> Result<Self, ApiError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder().default_headers(default_headers).build()?;

        Ok(Self {
            remote: remote.clone(),
            client,
        })
    }

    pub async fn call<T: ApiRequest>(&self, request: T) -> Result<T::Response, ApiError> {
        let request_builder = request.build_request(&self.remote, &self.client)?;
        let response = request_builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status, response.text().await?));
        }

        // Decode from bytes so a non-JSON body is reported as such rather
        // than as a transport failure.
        let body = response.bytes().await?;
        Ok(serde_json::from_slice::<T::Response>(&body)?)
    }

    /// Get the base URL for API requests
    pub fn base_url(&self) -> &Url {
        &self.remote
    }

    /// Get the underlying HTTP client for custom requests
    pub fn http_client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl CartTransport for ApiClient {
    async fn cart_count(&self) -> Result<CartCountResponse, ApiError> {
        self.call(CartCountRequest).await
    }

    async fn mini_cart(&self) -> Result<MiniCartResponse, ApiError> {
        self.call(MiniCartRequest).await
    }

    async fn adjust(
        &self,
        product_id: &ProductId,
        direction: Direction,
        csrf_token: &str,
    ) -> Result<RawQuantityResponse, ApiError> {
        tracing::debug!("POST {} for product {}", direction.path(product_id), product_id);
        self.call(QuantityRequest {
            product_id: product_id.clone(),
            direction,
            csrf_token: csrf_token.to_string(),
        })
        .await
    }

    async fn add_to_cart(&self, form: &AddToCartForm) -> Result<serde_json::Value, ApiError> {
        tracing::debug!("submitting add-to-cart form to {}", form.action);
        self.call(AddToCartRequest { form: form.clone() }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_resolve_against_site_root() {
        let base = Url::parse("http://shop.test/products/list/").unwrap();
        let client = ApiClient::new(&base).unwrap();

        let request = CartCountRequest
            .build_request(client.base_url(), client.http_client())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(request.url().as_str(), "http://shop.test/cart/count/");
        assert_eq!(request.method(), reqwest::Method::GET);
    }

    #[test]
    fn test_quantity_request_carries_ajax_headers() {
        let base = Url::parse("http://shop.test/").unwrap();
        let client = ApiClient::new(&base).unwrap();

        let request = QuantityRequest {
            product_id: ProductId::from("42"),
            direction: Direction::Decrease,
            csrf_token: "tok".to_string(),
        }
        .build_request(client.base_url(), client.http_client())
        .unwrap()
        .build()
        .unwrap();

        assert_eq!(request.url().as_str(), "http://shop.test/cart/decrease/42/");
        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.headers()["X-CSRFToken"], "tok");
        assert_eq!(request.headers()["X-Requested-With"], "XMLHttpRequest");
    }
}
