use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, ApiRequest};

/// `GET /cart/mini/`
#[derive(Debug, Clone, Copy, Default)]
pub struct MiniCartRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniCartResponse {
    /// Server-rendered preview fragment, injected as-is
    pub html: String,
}

impl ApiRequest for MiniCartRequest {
    type Response = MiniCartResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = base_url.join("/cart/mini/")?;
        Ok(client.get(full_url))
    }
}
