//! Remote access to the item-storage service.

use crate::models::{CompleteRequest, CreateItemRequest, Item, NewItem, UpdateValueRequest};
use crate::validation::ValidationError;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server replied {status}: {message}")]
    Status { status: u16, message: String },
    #[error("request cancelled")]
    Cancelled,
}

/// Operations the board needs from whatever stores the items.
pub trait ItemService {
    fn fetch_items(&self) -> impl Future<Output = Result<Vec<Item>, ClientError>> + Send;

    fn create_item(&self, new: &NewItem) -> impl Future<Output = Result<Item, ClientError>> + Send;

    fn complete_task(&self, id: &str) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn log_value(&self, id: &str, value: f64) -> impl Future<Output = Result<Item, ClientError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpItemService {
    base_url: String,
    http: Client,
}

impl HttpItemService {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ItemService for HttpItemService {
    async fn fetch_items(&self) -> Result<Vec<Item>, ClientError> {
        let response = self.http.get(format!("{}/api/items", self.base_url)).send().await?;
        decode(response).await
    }

    async fn create_item(&self, new: &NewItem) -> Result<Item, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/items", self.base_url))
            .json(&CreateItemRequest::from(new))
            .send()
            .await?;
        decode(response).await
    }

    async fn complete_task(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(format!("{}/api/items/{id}/complete", self.base_url))
            .json(&CompleteRequest::default())
            .send()
            .await?;
        check(response).await.map(|_| ())
    }

    async fn log_value(&self, id: &str, value: f64) -> Result<Item, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/items/{id}/update", self.base_url))
            .json(&UpdateValueRequest { value, note: None })
            .send()
            .await?;
        decode(response).await
    }
}

async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    Ok(check(response).await?.json::<T>().await?)
}
