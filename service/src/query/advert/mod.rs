//! [`Query`] collection related to a single [`Advert`].

pub mod by_id;
pub mod by_path;

#[cfg(doc)]
use crate::{domain::Advert, Query};

pub use self::{by_id::ById, by_path::ByPath};
