pub mod cart;
mod client;
mod error;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

pub use client::ApiClient;
pub use error::ApiError;

/// Header carrying the anti-forgery token on state-changing requests.
pub const CSRF_HEADER: &str = "X-CSRFToken";
/// Header the server checks to decide between a JSON reply and a redirect.
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
pub const XML_HTTP_REQUEST: &str = "XMLHttpRequest";

/// A typed request against the cart endpoints.
///
/// Each route lives next to its request/response pair and knows how to turn
/// itself into a [`RequestBuilder`]; [`ApiClient::call`] does the rest.
pub trait ApiRequest {
    type Response: DeserializeOwned;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError>;
}
