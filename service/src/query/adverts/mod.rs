//! [`Query`] collection related to the multiple [`Advert`].
//!
//! Listings scan forward from the requested cursor, inclusively, and only
//! ever contain listed [`Advert`]s. A page shorter than requested is not an
//! error.

pub mod by_category;
pub mod by_city;

#[cfg(doc)]
use crate::{domain::Advert, Query};

pub use self::{by_category::ByCategory, by_city::ByCity};
