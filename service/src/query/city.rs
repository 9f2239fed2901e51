//! [`Query`] collection related to a single [`City`].

use common::operations::By;

use crate::domain::{city, City};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries the earliest registered [`City`] addressed by a [`city::Key`].
pub type ByKey = DatabaseQuery<By<Option<City>, city::Key>>;
