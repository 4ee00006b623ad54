use crate::endpoint::Endpoint;
use crate::schema::{ProductId, SlotValue, WriteQuery};
use crate::Result;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, COOKIE};
use reqwest::StatusCode;

/// Static header values Etron expects on every request.
#[derive(Clone, Debug, Default)]
pub struct Auth {
    pub authorization: String,
    pub cookie: String,
}

#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: &str, auth: &Auth) -> Result<Self> {
        let client = reqwest::Client::builder()
            .default_headers(auth_headers(auth)?)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Writes one field onto a product template.
    ///
    /// A non-success status is logged and returned, not turned into an error.
    pub async fn write_product(&self, id: ProductId, value: &SlotValue) -> Result<StatusCode> {
        let query = serde_qs::to_string(&WriteQuery::new(id, value))?;
        let url = format!(
            "{}{}?{query}",
            self.base_url,
            Endpoint::WriteProductTemplate
        );

        let status = self.client.put(url).send().await?.status();
        if !status.is_success() {
            log::debug!("Etron answered {status} for product {id}");
        }
        Ok(status)
    }
}

fn auth_headers(auth: &Auth) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    if !auth.authorization.is_empty() {
        let mut value = HeaderValue::from_str(&auth.authorization)?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    if !auth.cookie.is_empty() {
        let mut value = HeaderValue::from_str(&auth.cookie)?;
        value.set_sensitive(true);
        headers.insert(COOKIE, value);
    }

    Ok(headers)
}
