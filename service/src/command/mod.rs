//! [`Command`] definition.

pub mod authorize_user_session;
pub mod close_advert;
pub mod create_advert;
pub mod create_category;
pub mod create_city;
pub mod create_order;
pub mod delete_advert;
pub mod edit_advert;
pub mod remove_cart_item;
pub mod toggle_cart_item;
pub mod update_profile;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession, close_advert::CloseAdvert,
    create_advert::CreateAdvert, create_category::CreateCategory,
    create_city::CreateCity, create_order::CreateOrder,
    delete_advert::DeleteAdvert, edit_advert::EditAdvert,
    remove_cart_item::RemoveCartItem, toggle_cart_item::ToggleCartItem,
    update_profile::UpdateProfile,
};
