//! Profile Provisioner
//!
//! Reacts to account-created events from an external authentication service
//! by writing an initial profile document into an external document store,
//! keyed by the account identifier. Duplicate deliveries are tolerated: the
//! document is created at most once and redeliveries only refresh its
//! mutable fields.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod fetch;
pub mod profile;
pub mod store;

use async_trait::async_trait;
use log::{error, info};
use reqwest::Client;

use crate::config::ProvisionerOptions;
use crate::dispatch::AccountEventHandler;
use crate::error::Error;
use crate::event::Account;
use crate::profile::{NewProfileRecord, ProfileRefresh};
use crate::store::DocumentStore;

/// The main entry point for profile provisioning.
///
/// One value is constructed at process start and shared (behind `Arc`)
/// across event invocations; it owns the HTTP connection pool used for all
/// store requests. Invocations are independent and may run concurrently —
/// idempotence comes from the store's keyed, conflict-resolved writes, not
/// from any coordination here.
pub struct ProfileProvisioner {
    /// The base URL for the document store
    pub url: String,
    /// The API key for the document store
    pub key: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Provisioner options
    pub options: ProvisionerOptions,
}

impl ProfileProvisioner {
    /// Create a new ProfileProvisioner
    ///
    /// # Arguments
    ///
    /// * `store_url` - The base URL for the document store
    /// * `store_key` - The API key for the document store
    ///
    /// # Example
    ///
    /// ```
    /// use profile_provisioner::ProfileProvisioner;
    ///
    /// let provisioner = ProfileProvisioner::new("https://docs.example.com", "service-key");
    /// ```
    pub fn new(store_url: &str, store_key: &str) -> Self {
        Self::new_with_options(store_url, store_key, ProvisionerOptions::default())
    }

    /// Create a new ProfileProvisioner with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use profile_provisioner::{config::ProvisionerOptions, ProfileProvisioner};
    ///
    /// let options = ProvisionerOptions::default().with_users_collection("profiles");
    /// let provisioner =
    ///     ProfileProvisioner::new_with_options("https://docs.example.com", "service-key", options);
    /// ```
    pub fn new_with_options(
        store_url: &str,
        store_key: &str,
        options: ProvisionerOptions,
    ) -> Self {
        Self {
            url: store_url.to_string(),
            key: store_key.to_string(),
            http_client: Client::new(),
            options,
        }
    }

    /// Create a ProfileProvisioner from the process environment.
    ///
    /// Reads `DOCSTORE_URL` and `DOCSTORE_KEY`, and optionally
    /// `ACCOUNT_EVENT_SECRET` for delivery signature verification.
    pub fn from_env() -> Result<Self, Error> {
        let url = std::env::var("DOCSTORE_URL")
            .map_err(|_| Error::config("DOCSTORE_URL must be set"))?;
        let key = std::env::var("DOCSTORE_KEY")
            .map_err(|_| Error::config("DOCSTORE_KEY must be set"))?;

        let mut options = ProvisionerOptions::default();
        if let Ok(secret) = std::env::var("ACCOUNT_EVENT_SECRET") {
            options = options.with_event_secret(&secret);
        }

        Ok(Self::new_with_options(&url, &key, options))
    }

    /// Get a client for the document store
    pub fn store(&self) -> DocumentStore {
        DocumentStore::new(
            &self.url,
            &self.key,
            self.http_client.clone(),
            self.options.request_timeout,
        )
    }

    /// Create and persist the profile document for a newly created account.
    ///
    /// Two individually idempotent writes against `users/{identifier}`:
    /// a create-only write of the full record (first delivery wins, which is
    /// what pins `createdAt`), then a merge write refreshing the mirrored
    /// fields and `lastLoginAt`. Safe under at-least-once delivery and under
    /// concurrent redelivery for the same identifier.
    pub async fn provision(&self, account: &Account) -> Result<(), Error> {
        if account.identifier.is_empty() {
            return Err(Error::event("account identifier must not be empty"));
        }

        info!(
            "creating profile document for account {}",
            account.identifier
        );

        let store = self.store();
        let doc = store
            .collection(&self.options.users_collection)
            .doc(&account.identifier);

        doc.set(&NewProfileRecord::from_account(account))
            .create_only()
            .execute()
            .await?;

        doc.set(&ProfileRefresh::from_account(account))
            .merge()
            .execute()
            .await?;

        info!("provisioned profile for account {}", account.identifier);
        Ok(())
    }

    /// Platform-facing boundary for account-created notifications.
    ///
    /// Best-effort: a failed provision is logged with the account identifier
    /// and suppressed. The invoking platform does not inspect the outcome;
    /// failures are visible only through logs.
    pub async fn on_account_created(&self, account: &Account) {
        if let Err(e) = self.provision(account).await {
            error!(
                "failed to provision profile for account {}: {}",
                account.identifier, e
            );
        }
    }
}

#[async_trait]
impl AccountEventHandler for ProfileProvisioner {
    async fn on_account_created(&self, account: &Account) {
        ProfileProvisioner::on_account_created(self, account).await;
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::ProvisionerOptions;
    pub use crate::dispatch::{AccountEventHandler, EventDispatcher};
    pub use crate::error::Error;
    pub use crate::event::{Account, AccountEvent};
    pub use crate::ProfileProvisioner;
}
