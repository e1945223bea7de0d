//! Read-only access to the remote store's collections.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use shared::{
    error::{FetchError, FetchFailure, StoreErrorBody},
    query::CollectionQuery,
};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::Settings;

const REST_PATH: &str = "rest/v1";

#[derive(Debug, Error)]
pub enum StoreConfigError {
    #[error("store url is missing")]
    MissingUrl,
    #[error("store access key is missing")]
    MissingKey,
    #[error("invalid store url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// One whole-collection read per call, rows returned as raw JSON objects.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn select_all(
        &self,
        query: &CollectionQuery,
    ) -> Result<Vec<serde_json::Value>, FetchError>;
}

/// Stands in when settings lack a url or key; every read fails.
pub struct UnconfiguredStore {
    reason: String,
}

impl UnconfiguredStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl RemoteStore for UnconfiguredStore {
    async fn select_all(
        &self,
        query: &CollectionQuery,
    ) -> Result<Vec<serde_json::Value>, FetchError> {
        Err(FetchError::new(
            query.collection.clone(),
            FetchFailure::Unconfigured(self.reason.clone()),
        ))
    }
}

/// PostgREST client authenticated with a public read key.
pub struct RestStore {
    http: Client,
    base_url: Url,
    anon_key: String,
}

impl RestStore {
    pub fn new(
        store_url: &str,
        anon_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, StoreConfigError> {
        let anon_key = anon_key.into();
        if anon_key.trim().is_empty() {
            return Err(StoreConfigError::MissingKey);
        }

        let base_url = normalize_store_url(store_url)?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.connect_timeout(timeout).timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
            anon_key,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, StoreConfigError> {
        let url = settings
            .store_url
            .as_deref()
            .ok_or(StoreConfigError::MissingUrl)?;
        let key = settings
            .anon_key
            .as_deref()
            .ok_or(StoreConfigError::MissingKey)?;
        Self::new(url, key, settings.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn collection_url(&self, collection: &str) -> Url {
        let mut url = self.base_url.clone();
        {
            // Normalized base urls are never cannot-be-a-base.
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty();
                segments.extend(REST_PATH.split('/'));
                segments.push(collection);
            }
        }
        url
    }
}

#[async_trait]
impl RemoteStore for RestStore {
    async fn select_all(
        &self,
        query: &CollectionQuery,
    ) -> Result<Vec<serde_json::Value>, FetchError> {
        let collection = query.collection.as_str();
        let url = self.collection_url(collection);
        debug!(%url, order = %query.order, "issuing collection read");

        let response = self
            .http
            .get(url)
            .query(&query.query_pairs())
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| FetchError::transport(collection, describe_transport_error(&err)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| FetchError::transport(collection, describe_transport_error(&err)))?;

        if !status.is_success() {
            return Err(FetchError::new(
                collection,
                FetchFailure::Status {
                    status: status.as_u16(),
                    body: StoreErrorBody::parse(&body),
                },
            ));
        }

        decode_rows(collection, status, &body)
    }
}

fn decode_rows(
    collection: &str,
    status: StatusCode,
    body: &str,
) -> Result<Vec<serde_json::Value>, FetchError> {
    // PostgREST answers 204/empty body for some proxies; treat it as no rows.
    if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str::<Vec<serde_json::Value>>(body)
        .map_err(|err| FetchError::decode(collection, format!("expected a JSON array: {err}")))
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("failed to connect: {err}")
    } else {
        err.to_string()
    }
}

pub fn normalize_store_url(raw: &str) -> Result<Url, StoreConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(StoreConfigError::MissingUrl);
    }

    let url = Url::parse(trimmed).map_err(|err| StoreConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(StoreConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(StoreConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: "missing host".to_string(),
        });
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(StoreConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: "query strings and fragments are not allowed".to_string(),
        });
    }

    Ok(url)
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
