//! Domain definitions.

pub mod advert;
pub mod cart;
pub mod category;
pub mod city;
pub mod order;
pub mod profile;
mod taxonomy;
pub mod user;

pub use self::{
    advert::Advert, category::Category, city::City, order::Order,
    profile::Profile, user::Session,
};
