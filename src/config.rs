//! Configuration options for the profile provisioner

use std::time::Duration;

/// Configuration options for the profile provisioner
#[derive(Debug, Clone)]
pub struct ProvisionerOptions {
    /// The collection profile documents are written to
    pub users_collection: String,

    /// The request timeout applied to store requests
    pub request_timeout: Option<Duration>,

    /// Shared secret for verifying inbound event delivery signatures.
    /// When unset, deliveries are accepted without verification.
    pub event_secret: Option<String>,
}

impl Default for ProvisionerOptions {
    fn default() -> Self {
        Self {
            users_collection: "users".to_string(),
            request_timeout: Some(Duration::from_secs(30)),
            event_secret: None,
        }
    }
}

impl ProvisionerOptions {
    /// Set the collection profile documents are written to
    pub fn with_users_collection(mut self, value: &str) -> Self {
        self.users_collection = value.to_string();
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the shared secret for delivery signature verification
    pub fn with_event_secret(mut self, value: &str) -> Self {
        self.event_secret = Some(value.to_string());
        self
    }
}
