use crate::endpoint::Endpoint;
use crate::schema::{AuthRequest, AuthResponse, Order, OrderNumber};
use crate::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;

pub const DEFAULT_BASE_URL: &str = "https://posapi.at.tixly.com/v2";

#[derive(Clone, Debug, Default)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Authenticated Tixly client. The bearer token is fetched once in
/// [`HttpClient::connect`] and sent with every following request.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Exchanges the client credentials for a bearer token.
    ///
    /// A non-success status or an empty token is an error; there is no retry.
    pub async fn connect(base_url: &str, credentials: &Credentials) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let token = authenticate(&reqwest::Client::new(), &base_url, credentials).await?;

        let mut headers = HeaderMap::new();
        let mut bearer = HeaderValue::from_str(&format!("Bearer {token}"))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Looks up a single order. The body is decoded whatever the HTTP status,
    /// since Tixly reports missing orders through `Status.Status`.
    pub async fn fetch_order(&self, order_number: OrderNumber) -> Result<Order> {
        let url = format!("{}{}/{order_number}", self.base_url, Endpoint::OrderGet);
        let response = self.client.get(url).send().await?;
        decode(response.text().await?)
    }
}

async fn authenticate(
    client: &reqwest::Client,
    base_url: &str,
    credentials: &Credentials,
) -> Result<String> {
    let response = client
        .post(format!("{base_url}{}", Endpoint::AuthToken))
        .json(&AuthRequest {
            client_id: &credentials.client_id,
            client_secret: &credentials.client_secret,
        })
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        log::error!("Authentication failed with status code {status}");
        return Err(Error::Response(status, response.text().await?));
    }

    let auth: AuthResponse = decode(response.text().await?)?;
    if auth.data.token.is_empty() {
        return Err(Error::EmptyToken);
    }

    log::info!("Authenticated against {base_url}");
    Ok(auth.data.token)
}

fn decode<T: DeserializeOwned>(text: String) -> Result<T> {
    serde_json::from_str(&text).map_err(|_| Error::Deserialize(text))
}
