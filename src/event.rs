//! Inbound account event payloads and delivery signature verification

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

use crate::error::Error;

/// Event type emitted when a new account is registered with the auth service
pub const ACCOUNT_CREATED: &str = "account.created";

/// An account as described by the external authentication service.
///
/// Only `identifier` is guaranteed by the delivery contract; the remaining
/// fields may be absent depending on how the account was registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The unique, stable account identifier
    pub identifier: String,

    /// The account's email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// The account's display name
    #[serde(
        rename = "displayName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,

    /// The account's avatar URL
    #[serde(rename = "avatarURL", default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// A notification delivered by the authentication service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountEvent {
    /// The event type discriminator
    #[serde(rename = "type")]
    pub event_type: String,

    /// The account the event concerns
    #[serde(flatten)]
    pub account: Account,
}

impl AccountEvent {
    /// Decode an event from a raw delivery body
    pub fn from_slice(body: &[u8]) -> Result<Self, Error> {
        Ok(serde_json::from_slice(body)?)
    }
}

/// Claims carried by the delivery signature token
#[derive(Debug, Serialize, Deserialize)]
struct SignatureClaims {
    /// Hex SHA-256 digest of the raw delivery body
    sha256: String,
}

/// Verify a delivery signature against the raw body.
///
/// The event source signs each delivery with an HS256 JWT whose claims carry
/// the hex SHA-256 of the body. The token carries no expiry; freshness is the
/// delivery platform's concern.
pub fn verify_signature(body: &[u8], token: &str, secret: &str) -> Result<(), Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims = HashSet::new();

    let data = decode::<SignatureClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;

    let digest: String = Sha256::digest(body)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect();

    if data.claims.sha256 != digest {
        return Err(Error::signature("payload digest mismatch"));
    }

    Ok(())
}
