use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, ApiRequest};

/// `GET /cart/count/`
#[derive(Debug, Clone, Copy, Default)]
pub struct CartCountRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCountResponse {
    /// Sum of quantities across every line item
    pub cart_count: u64,
}

impl ApiRequest for CartCountRequest {
    type Response = CartCountResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = base_url.join("/cart/count/")?;
        Ok(client.get(full_url))
    }
}
