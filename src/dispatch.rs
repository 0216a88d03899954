//! Event dispatch seam
//!
//! The hosting environment decides how account events arrive (queue
//! consumer, webhook endpoint, SDK listener). This module is the seam
//! between that delivery mechanism and the handlers: raw delivery bodies go
//! in, registered handlers are invoked for the event types they understand.

use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use crate::error::Error;
use crate::event::{self, Account, AccountEvent, ACCOUNT_CREATED};

/// Handler for account lifecycle events
#[async_trait]
pub trait AccountEventHandler: Send + Sync {
    /// Invoked once per delivered account-created notification.
    ///
    /// Implementations are expected to be self-contained: they log their own
    /// failures and do not surface them to the dispatcher.
    async fn on_account_created(&self, account: &Account);
}

/// Routes raw event deliveries to registered handlers
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn AccountEventHandler>>,
    secret: Option<String>,
}

impl EventDispatcher {
    /// Create a dispatcher that accepts deliveries without verification
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher that verifies delivery signatures with the given
    /// shared secret before decoding
    pub fn with_secret(secret: &str) -> Self {
        Self {
            handlers: Vec::new(),
            secret: Some(secret.to_string()),
        }
    }

    /// Register a handler for account events
    pub fn register(mut self, handler: Arc<dyn AccountEventHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Verify, decode, and route a raw delivery.
    ///
    /// Events of types no handler understands are ignored. Handler outcomes
    /// do not affect the result; an `Err` here means the delivery itself was
    /// unacceptable (bad signature or undecodable payload).
    pub async fn dispatch(&self, body: &[u8], signature: Option<&str>) -> Result<(), Error> {
        if let Some(secret) = &self.secret {
            let token =
                signature.ok_or_else(|| Error::signature("missing delivery signature"))?;
            event::verify_signature(body, token, secret)?;
        }

        // Only account-created deliveries need to decode fully; anything
        // else is ignored by type alone.
        let probe: serde_json::Value = serde_json::from_slice(body)?;
        let event_type = probe.get("type").and_then(|v| v.as_str()).unwrap_or_default();
        if event_type != ACCOUNT_CREATED {
            debug!("ignoring event of type {:?}", event_type);
            return Ok(());
        }

        let event = AccountEvent::from_slice(body)?;
        for handler in &self.handlers {
            handler.on_account_created(&event.account).await;
        }

        Ok(())
    }
}
