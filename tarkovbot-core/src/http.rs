//! HTTP client abstraction for the tarkovbot API.
//!
//! Everything that talks to the network goes through [`HttpClient`] so the
//! actions and refreshers can be exercised in tests without real requests.
//! The default implementation wraps reqwest.

use std::collections::HashMap;
use async_trait::async_trait;
use reqwest;

use crate::Error;

/// Status and raw body of a completed request. Non-200 statuses are not
/// errors at this layer; [`crate::api::RemoteDataClient`] decides.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: String, headers: HashMap<String, String>) -> Result<HttpResponse, Error>;
}

#[derive(Clone, Default)]
pub struct DefaultHttpClient {
    client: reqwest::Client,
}

impl DefaultHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HttpClient for DefaultHttpClient {
    async fn get(&self, url: String, headers: HashMap<String, String>) -> Result<HttpResponse, Error> {
        let mut request = self.client.get(&url);
        for (key, value) in headers {
            request = request.header(&key, value);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}
