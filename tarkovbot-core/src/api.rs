// File: tarkovbot-core/src/api.rs

use std::collections::HashMap;
use std::sync::Arc;
use serde::de::DeserializeOwned;
use tracing::debug;

use tarkovbot_common::models::{
    GameMode, GoonsLocationResponse, TraderResetsResponse, TraderRestockRecord,
};

use crate::Error;
use crate::http::HttpClient;

/// Header the goons endpoint reads the user's token from.
pub const AUTH_HEADER: &str = "AUTH-TOKEN";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiEndpoints {
    pub trader_resets: String,
    pub pve_trader_resets: String,
    pub goons_location: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            trader_resets: "https://tarkovbot.eu/api/trader-resets/".to_string(),
            pve_trader_resets: "https://tarkovbot.eu/api/pve/trader-resets/".to_string(),
            goons_location: "https://tarkovbot.eu/api/streamdeck/goonslocation".to_string(),
        }
    }
}

impl ApiEndpoints {
    pub fn trader_resets_for(&self, mode: GameMode) -> &str {
        match mode {
            GameMode::Regular => &self.trader_resets,
            GameMode::Pve => &self.pve_trader_resets,
        }
    }
}

/// Thin GET + JSON client for the three tarkovbot endpoints.
///
/// No retries and no timeout: a request either resolves with the decoded
/// body (status 200) or fails with `Error::Status(code)` carrying the raw
/// HTTP status. Transport and decoding failures surface as `Error::Http` /
/// `Error::Json`.
pub struct RemoteDataClient {
    http: Arc<dyn HttpClient>,
    endpoints: ApiEndpoints,
}

impl RemoteDataClient {
    pub fn new(http: Arc<dyn HttpClient>, endpoints: ApiEndpoints) -> Self {
        Self { http, endpoints }
    }

    pub async fn fetch<T: DeserializeOwned>(&self, url: &str, token: Option<&str>) -> Result<T, Error> {
        let mut headers = HashMap::new();
        if let Some(token) = token {
            headers.insert(AUTH_HEADER.to_string(), token.to_string());
        }

        let response = self.http.get(url.to_string(), headers).await?;
        if response.status != 200 {
            debug!("GET {} => status {}", url, response.status);
            return Err(Error::Status(response.status));
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    pub async fn trader_resets(&self, mode: GameMode) -> Result<Vec<TraderRestockRecord>, Error> {
        let response: TraderResetsResponse =
            self.fetch(self.endpoints.trader_resets_for(mode), None).await?;
        Ok(response.data.traders)
    }

    pub async fn goons_location(&self, token: &str) -> Result<GoonsLocationResponse, Error> {
        self.fetch(&self.endpoints.goons_location, Some(token)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpResponse, MockHttpClient};
    use mockall::predicate::*;

    fn client_with(mock: MockHttpClient) -> RemoteDataClient {
        RemoteDataClient::new(Arc::new(mock), ApiEndpoints::default())
    }

    #[tokio::test]
    async fn token_goes_into_auth_header() {
        let mut mock = MockHttpClient::new();
        mock.expect_get()
            .with(
                eq("https://tarkovbot.eu/api/streamdeck/goonslocation".to_string()),
                function(|h: &HashMap<String, String>| {
                    h.get(AUTH_HEADER).map(String::as_str) == Some("secret")
                }),
            )
            .times(1)
            .returning(|_, _| {
                Ok(HttpResponse::new(
                    200,
                    r#"{"location":"Woods","reported":"2024-05-01T12:00:00Z"}"#,
                ))
            });

        let resp = client_with(mock).goons_location("secret").await.unwrap();
        assert_eq!(resp.0["location"], "Woods");
    }

    #[tokio::test]
    async fn non_200_is_raw_status() {
        let mut mock = MockHttpClient::new();
        mock.expect_get()
            .returning(|_, _| Ok(HttpResponse::new(401, "nope")));

        let err = client_with(mock).goons_location("bad").await.unwrap_err();
        assert!(matches!(err, Error::Status(401)));
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn trader_resets_hits_mode_endpoint_without_token() {
        let mut mock = MockHttpClient::new();
        mock.expect_get()
            .with(
                eq("https://tarkovbot.eu/api/pve/trader-resets/".to_string()),
                function(|h: &HashMap<String, String>| h.is_empty()),
            )
            .times(1)
            .returning(|_, _| {
                Ok(HttpResponse::new(
                    200,
                    r#"{"data":{"traders":[{"name":"Jaeger","resetTime":"2024-05-01T12:00:00Z"}]}}"#,
                ))
            });

        let traders = client_with(mock).trader_resets(GameMode::Pve).await.unwrap();
        assert_eq!(traders.len(), 1);
        assert_eq!(traders[0].name, "Jaeger");
    }

    #[tokio::test]
    async fn malformed_body_is_json_error() {
        let mut mock = MockHttpClient::new();
        mock.expect_get()
            .returning(|_, _| Ok(HttpResponse::new(200, "<html>")));

        let err = client_with(mock).trader_resets(GameMode::Regular).await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
