//! Document store client
//!
//! A narrow client for the external document store: named collections of
//! JSON documents addressed by key. Writes are upserts; the conflict
//! resolution (replace, create-only, merge) is selected per request.

mod types;

use log::debug;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use crate::error::Error;
use crate::fetch::Fetch;

pub use types::*;

const CLIENT_INFO: &str = "profile-provisioner/0.1.0";

/// Client for the document store
#[derive(Debug, Clone)]
pub struct DocumentStore {
    /// The base URL for the store
    url: String,

    /// The API key for the store
    key: String,

    /// HTTP client used for requests
    client: Client,

    /// Per-request timeout
    timeout: Option<Duration>,
}

impl DocumentStore {
    /// Create a new DocumentStore client
    pub(crate) fn new(url: &str, key: &str, client: Client, timeout: Option<Duration>) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            client,
            timeout,
        }
    }

    /// Get a client for a named collection
    pub fn collection(&self, name: &str) -> CollectionClient {
        CollectionClient {
            url: self.url.clone(),
            key: self.key.clone(),
            name: name.to_string(),
            client: self.client.clone(),
            timeout: self.timeout,
        }
    }
}

/// Client for a collection of documents
pub struct CollectionClient {
    url: String,
    key: String,
    name: String,
    client: Client,
    timeout: Option<Duration>,
}

impl CollectionClient {
    /// Get a client for the document with the given key
    pub fn doc(&self, id: &str) -> DocumentClient {
        DocumentClient {
            url: format!("{}/docs/v1/{}/{}", self.url, self.name, id),
            key: self.key.clone(),
            client: self.client.clone(),
            timeout: self.timeout,
        }
    }
}

/// Client for a single document
pub struct DocumentClient {
    url: String,
    key: String,
    client: Client,
    timeout: Option<Duration>,
}

impl DocumentClient {
    /// Start a write of the given value to this document.
    ///
    /// The default resolution is a plain upsert (replace-or-create); use
    /// [`SetBuilder::create_only`] or [`SetBuilder::merge`] to change it.
    pub fn set<'a, T: Serialize>(&'a self, value: &'a T) -> SetBuilder<'a, T> {
        SetBuilder {
            doc: self,
            value,
            resolution: WriteResolution::Replace,
        }
    }

    /// Start a read of this document
    pub fn get(&self) -> GetBuilder<'_> {
        GetBuilder { doc: self }
    }
}

/// Conflict resolution for document writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteResolution {
    Replace,
    CreateOnly,
    Merge,
}

/// Builder for document writes
pub struct SetBuilder<'a, T: Serialize> {
    doc: &'a DocumentClient,
    value: &'a T,
    resolution: WriteResolution,
}

impl<'a, T: Serialize> SetBuilder<'a, T> {
    /// Create the document only if it does not exist; an existing document
    /// is left untouched and the write reports success
    pub fn create_only(mut self) -> Self {
        self.resolution = WriteResolution::CreateOnly;
        self
    }

    /// Merge the given fields into the document, creating it if absent;
    /// fields not present in the value are preserved
    pub fn merge(mut self) -> Self {
        self.resolution = WriteResolution::Merge;
        self
    }

    /// Execute the write
    pub async fn execute(&self) -> Result<(), Error> {
        let mut fetch = match self.resolution {
            WriteResolution::Merge => Fetch::patch(&self.doc.client, &self.doc.url),
            _ => Fetch::put(&self.doc.client, &self.doc.url),
        }
        .header("apikey", &self.doc.key)
        .header("X-Client-Info", CLIENT_INFO)
        .bearer_auth(&self.doc.key)
        .timeout(self.doc.timeout);

        match self.resolution {
            WriteResolution::CreateOnly => {
                fetch = fetch.header("Prefer", "resolution=ignore-duplicates");
            }
            WriteResolution::Merge => {
                fetch = fetch.header("Prefer", "resolution=merge-duplicates");
            }
            WriteResolution::Replace => {}
        }

        debug!("writing document at {}", self.doc.url);
        let response = fetch.json(self.value)?.execute_raw().await?;
        error_for_status(response).await?;
        Ok(())
    }
}

/// Builder for document reads
pub struct GetBuilder<'a> {
    doc: &'a DocumentClient,
}

impl<'a> GetBuilder<'a> {
    /// Execute the read, returning `Ok(None)` when the document does not exist
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<Option<T>, Error> {
        let response = Fetch::get(&self.doc.client, &self.doc.url)
            .header("apikey", &self.doc.key)
            .header("X-Client-Info", CLIENT_INFO)
            .bearer_auth(&self.doc.key)
            .timeout(self.doc.timeout)
            .execute_raw()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = error_for_status(response).await?;
        Ok(Some(response.json::<T>().await?))
    }
}

/// Map a non-success response to a store error carrying status and body
async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(Error::store(status.as_u16(), message))
}
