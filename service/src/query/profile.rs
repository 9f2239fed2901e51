//! [`Query`] collection related to a single [`Profile`].

use common::operations::By;

use crate::domain::{user, Profile};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Profile`] of a user.
///
/// [`None`] is returned if the [`Profile`] has never been updated.
pub type ByUser = DatabaseQuery<By<Option<Profile>, user::Id>>;
