//! [`Query`] collection related to a single [`Category`].

use common::operations::By;

use crate::domain::{category, Category};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries the earliest registered [`Category`] addressed by a
/// [`category::Key`].
pub type ByKey = DatabaseQuery<By<Option<Category>, category::Key>>;
