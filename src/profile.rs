//! Profile document models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Account;
use crate::store::ServerValue;

/// The full profile document written when an account is first seen.
///
/// Missing optional account fields are mirrored as empty strings so the
/// document shape is uniform across accounts. Both timestamps are server
/// value sentinels; the store assigns them at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProfileRecord {
    pub email: String,

    #[serde(rename = "displayName")]
    pub display_name: String,

    #[serde(rename = "photoURL")]
    pub photo_url: String,

    #[serde(rename = "createdAt")]
    pub created_at: ServerValue,

    #[serde(rename = "lastLoginAt")]
    pub last_login_at: ServerValue,
}

impl NewProfileRecord {
    /// Build the initial profile record for an account
    pub fn from_account(account: &Account) -> Self {
        Self {
            email: account.email.clone().unwrap_or_default(),
            display_name: account.display_name.clone().unwrap_or_default(),
            photo_url: account.avatar_url.clone().unwrap_or_default(),
            created_at: ServerValue::Timestamp,
            last_login_at: ServerValue::Timestamp,
        }
    }
}

/// The fields refreshed on every delivery.
///
/// `createdAt` is deliberately absent: it is written once by the create-only
/// write and preserved across redeliveries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileRefresh {
    pub email: String,

    #[serde(rename = "displayName")]
    pub display_name: String,

    #[serde(rename = "photoURL")]
    pub photo_url: String,

    #[serde(rename = "lastLoginAt")]
    pub last_login_at: ServerValue,
}

impl ProfileRefresh {
    /// Build the refresh payload for an account
    pub fn from_account(account: &Account) -> Self {
        Self {
            email: account.email.clone().unwrap_or_default(),
            display_name: account.display_name.clone().unwrap_or_default(),
            photo_url: account.avatar_url.clone().unwrap_or_default(),
            last_login_at: ServerValue::Timestamp,
        }
    }
}

/// A profile document as read back from the store
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRecord {
    #[serde(default)]
    pub email: String,

    #[serde(rename = "displayName", default)]
    pub display_name: String,

    #[serde(rename = "photoURL", default)]
    pub photo_url: String,

    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(rename = "lastLoginAt", default)]
    pub last_login_at: Option<DateTime<Utc>>,
}
