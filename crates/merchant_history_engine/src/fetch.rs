use std::time::Duration;

use futures_util::StreamExt;
use history_logging::history_debug;
use reqwest::header::AUTHORIZATION;
use reqwest::Url;
use serde::Deserialize;

use crate::{DataSourceError, FailureKind, ParcelMode, ParcelRecord};

/// Current-user field holding the merchant's past tracking numbers.
pub const PAST_PARCELS_FIELD: &str = "pastParcels";

/// Transport limits. Timeouts are off unless configured: a slow fetch waits.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            request_timeout: None,
            max_bytes: 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait UserDataSource: Send + Sync {
    async fn fetch_field(&self, field: &str) -> Result<serde_json::Value, DataSourceError>;

    async fn fetch_past_parcels(&self) -> Result<Vec<String>, DataSourceError> {
        let value = self.fetch_field(PAST_PARCELS_FIELD).await?;
        serde_json::from_value(value)
            .map_err(|err| DataSourceError::new(FailureKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
pub trait ParcelDataSource: Send + Sync {
    async fn fetch_parcel(
        &self,
        tracking_number: &str,
        mode: ParcelMode,
    ) -> Result<ParcelRecord, DataSourceError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP backed current-user and parcel data source.
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    base_url: Url,
    client: reqwest::Client,
    settings: FetchSettings,
    bearer_token: Option<String>,
}

impl HttpDataSource {
    pub fn new(base_url: &str, settings: FetchSettings) -> Result<Self, DataSourceError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| DataSourceError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(DataSourceError::new(
                FailureKind::InvalidUrl,
                format!("{base_url} cannot be used as a base url"),
            ));
        }
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| DataSourceError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            base_url,
            client,
            settings,
            bearer_token: None,
        })
    }

    pub fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token;
        self
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base urls, so the segments are always writable.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, DataSourceError> {
        history_debug!("GET {}", url);
        let mut request = self.client.get(url);
        if let Some(token) = &self.bearer_token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|body| body.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(DataSourceError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    fn too_large(&self, actual: Option<u64>) -> DataSourceError {
        DataSourceError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual,
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl UserDataSource for HttpDataSource {
    async fn fetch_field(&self, field: &str) -> Result<serde_json::Value, DataSourceError> {
        let bytes = self.get_bytes(self.endpoint(&["users", "me", field])).await?;
        decode(&bytes)
    }
}

#[async_trait::async_trait]
impl ParcelDataSource for HttpDataSource {
    async fn fetch_parcel(
        &self,
        tracking_number: &str,
        mode: ParcelMode,
    ) -> Result<ParcelRecord, DataSourceError> {
        let mut url = self.endpoint(&["parcels", tracking_number]);
        url.query_pairs_mut().append_pair("mode", mode.as_str());
        let bytes = self.get_bytes(url).await?;
        decode(&bytes)
    }
}

fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, DataSourceError> {
    serde_json::from_slice(bytes)
        .map_err(|err| DataSourceError::new(FailureKind::Decode, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> DataSourceError {
    if err.is_timeout() {
        return DataSourceError::new(FailureKind::Timeout, err.to_string());
    }
    DataSourceError::new(FailureKind::Network, err.to_string())
}
