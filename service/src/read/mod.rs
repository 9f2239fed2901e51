//! Read entities definitions.

pub mod advert;
pub mod cart;
