//! [`Session`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::DateTimeOf;
use derive_more::{AsRef, Display, FromStr};
use serde::{Deserialize, Serialize};

use crate::domain::user;

/// Session of an authenticated user.
///
/// Issued by the external authentication service as a [JWT] signed with the
/// shared secret, only verified here.
///
/// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct Session {
    /// ID of the user this [`Session`] belongs to.
    #[serde(rename = "uid")]
    pub user_id: user::Id,

    /// [`DateTime`] when this [`Session`] expires.
    #[serde(rename = "exp", with = "common::datetime::serde::unix_timestamp")]
    pub expires_at: ExpirationDateTime,
}

/// Access token of a [`Session`].
#[derive(AsRef, Clone, Debug, Display, FromStr)]
#[as_ref(str)]
pub struct Token(String);

impl Token {
    /// Wraps the provided raw `token`.
    ///
    /// Nothing is checked until the [`Token`] is authorized.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

/// Marker type indicating [`Session`] expiration.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;

/// [`DateTime`] of a [`Session`] expiration.
pub type ExpirationDateTime = DateTimeOf<(Session, Expiration)>;
