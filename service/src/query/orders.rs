//! [`Query`] collection related to the multiple [`Order`].

use common::operations::By;

use crate::domain::{user, Order};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`Order`]s placed by a user, oldest first.
pub type ByUser = DatabaseQuery<By<Vec<Order>, user::Id>>;
