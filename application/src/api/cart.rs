//! Cart and favourites definitions.

use juniper::GraphQLEnum;
use service::domain;

/// List of adverts kept by a user.
#[derive(Clone, Copy, Debug, Default, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "CartList")]
pub enum List {
    /// Adverts to be ordered.
    #[default]
    Cart,

    /// Bookmarked adverts.
    Favourites,
}

impl From<List> for domain::cart::List {
    fn from(list: List) -> Self {
        match list {
            List::Cart => Self::Cart,
            List::Favourites => Self::Favourites,
        }
    }
}
