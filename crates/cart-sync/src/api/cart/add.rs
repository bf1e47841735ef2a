use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, ApiRequest, CSRF_HEADER, REQUESTED_WITH_HEADER, XML_HTTP_REQUEST};

/// Hidden form field holding the anti-forgery token.
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// An add-to-cart form as rendered on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCartForm {
    /// The form's `action`, absolute or relative to the site
    pub action: String,
    /// Every field in document order, hidden ones included
    pub fields: Vec<(String, String)>,
}

impl AddToCartForm {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Value of the hidden anti-forgery field, if the form has one.
    pub fn csrf_token(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == CSRF_FIELD)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct AddToCartRequest {
    pub form: AddToCartForm,
}

impl ApiRequest for AddToCartRequest {
    /// The body shape is not inspected, it only has to be JSON.
    type Response = serde_json::Value;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let token = self
            .form
            .csrf_token()
            .ok_or(ApiError::MissingCsrfToken)?
            .to_string();
        let full_url = base_url.join(&self.form.action)?;

        Ok(client
            .post(full_url)
            .header(CSRF_HEADER, token)
            .header(REQUESTED_WITH_HEADER, XML_HTTP_REQUEST)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(&self.form.fields))
    }
}
