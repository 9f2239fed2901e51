//! [`Query`] collection related to the multiple [`Category`].

use common::operations::By;

use crate::domain::Category;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`Category`]s in their registration order.
pub type All = DatabaseQuery<By<Vec<Category>, ()>>;
