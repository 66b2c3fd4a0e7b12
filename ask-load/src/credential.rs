//! Static bearer token and its expiry
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use reqwest::header::{HeaderValue, InvalidHeaderValue};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// An opaque bearer token, sent unchanged on every request.
///
/// The token is never refreshed. If it is JWT-shaped its `exp` claim can be
/// inspected up front so an expired token is reported before the run rather
/// than showing up as a wall of failed status checks.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Bearer token is empty")]
    Empty,

    #[error("Bearer token is not a valid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
}

/// How the token's expiry relates to a planned run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expiry {
    /// Not a JWT, or no `exp` claim.
    Unknown,
    Expired { since: Duration },
    ExpiresDuringRun { remaining: Duration },
    Valid { remaining: Duration },
}

#[derive(Deserialize)]
struct Claims {
    exp: Option<u64>,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Result<Self, CredentialError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(CredentialError::Empty);
        }

        let credential = Self { token };
        credential.authorization()?;
        Ok(credential)
    }

    /// Value for the `Authorization` header.
    pub fn authorization(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token))?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// The `exp` claim, if the token is a JWT that carries one.
    ///
    /// The signature is not verified; only the claim is read. An `exp` past
    /// what `SystemTime` can represent is treated as absent.
    pub fn expires_at(&self) -> Option<SystemTime> {
        let claims = decode::<Claims>(&self.token, &DecodingKey::from_secret(&[]), &claims_only())
            .ok()?
            .claims;
        UNIX_EPOCH.checked_add(Duration::from_secs(claims.exp?))
    }

    /// Classify the token's expiry for a run starting at `now` and lasting `run`.
    pub fn expiry(&self, now: SystemTime, run: Duration) -> Expiry {
        let Some(expires_at) = self.expires_at() else {
            return Expiry::Unknown;
        };

        match expires_at.duration_since(now) {
            Err(err) => Expiry::Expired {
                since: err.duration(),
            },
            Ok(remaining) if remaining <= run => Expiry::ExpiresDuringRun { remaining },
            Ok(remaining) => Expiry::Valid { remaining },
        }
    }
}

fn claims_only() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::new();
    validation
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .finish()
    }
}
