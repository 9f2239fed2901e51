//! [`Query`] collection related to the multiple [`City`].

use common::operations::By;

use crate::domain::City;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`City`]s in their registration order.
pub type All = DatabaseQuery<By<Vec<City>, ()>>;
