//! # HTTP Repository
//!
//! Rows behind a REST collection.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list     GET    {base}            → 200 [row, ...]                    │
//! │  get      GET    {base}/{id}       → 200 row | 404 → None              │
//! │  update   PUT    {base}/{id}       ← row as JSON → 2xx                 │
//! │  delete   DELETE {base}/{id}       → 2xx                               │
//! │                                                                         │
//! │  Any other status → StoreError::Status (no retry)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::marker::PhantomData;
use tracing::debug;

use super::{Entity, Repository};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

/// REST-backed repository.
///
/// ## Usage
/// ```rust,ignore
/// let repo: HttpRepository<Customer> = HttpRepository::new(StoreConfig::default())?;
/// repo.delete("USR-010").await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpRepository<T> {
    client: Client,
    config: StoreConfig,
    _rows: PhantomData<fn() -> T>,
}

impl<T: Entity> HttpRepository<T> {
    /// Builds the HTTP client from `config`.
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(StoreError::Config("base URL is empty".to_string()));
        }

        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone());
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(HttpRepository {
            client,
            config,
            _rows: PhantomData,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

/// Turns a non-success status into `StoreError::Status`.
fn ensure_success(method: &str, url: &str, response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(StoreError::status(method, url, status.as_u16()))
}

#[async_trait]
impl<T: Entity> Repository<T> for HttpRepository<T> {
    async fn get(&self, id: &str) -> StoreResult<Option<T>> {
        let url = self.config.row_url(id);
        debug!(kind = T::KIND, url = %url, "GET row");

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = ensure_success("GET", &url, response)?;
        Ok(Some(response.json::<T>().await?))
    }

    async fn list(&self) -> StoreResult<Vec<T>> {
        let url = &self.config.base_url;
        debug!(kind = T::KIND, url = %url, "GET rows");

        let response = self.client.get(url).send().await?;
        let rows = ensure_success("GET", url, response)?.json::<Vec<T>>().await?;

        debug!(count = rows.len(), "Fetched rows");
        Ok(rows)
    }

    async fn update(&self, row: &T) -> StoreResult<T> {
        let url = self.config.row_url(row.id());
        debug!(kind = T::KIND, url = %url, "PUT row");

        let response = self.client.put(&url).json(row).send().await?;
        let body = ensure_success("PUT", &url, response)?.bytes().await?;

        // Servers may echo the stored row, answer with a status object, or
        // send nothing. Only an echoed row replaces what was sent.
        if body.is_empty() {
            return Ok(row.clone());
        }
        match serde_json::from_slice::<T>(&body) {
            Ok(stored) => Ok(stored),
            Err(err) => {
                debug!(error = %err, "PUT response is not a row, keeping the sent row");
                Ok(row.clone())
            }
        }
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let url = self.config.row_url(id);
        debug!(kind = T::KIND, url = %url, "DELETE row");

        let response = self.client.delete(&url).send().await?;
        ensure_success("DELETE", &url, response)?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
