//! Cart and favourites ledger definitions.

use common::define_kind;

use crate::domain::{advert, user};
#[cfg(doc)]
use crate::domain::Advert;

/// Membership of an [`Advert`] in a user's [`List`].
///
/// Carries no quantity: a pair is either present in a [`List`] or not.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Item {
    /// ID of the user owning the [`List`].
    pub user_id: user::Id,

    /// ID of the [`Advert`] held in the [`List`].
    pub advert_id: advert::Id,

    /// [`List`] this [`Item`] belongs to.
    pub list: List,
}

define_kind! {
    #[doc = "List of the ledger an [`Item`] belongs to."]
    enum List {
        #[doc = "Items to be converted into orders."]
        Cart = 1,

        #[doc = "Items bookmarked by a user."]
        Favourites = 2,
    }
}
