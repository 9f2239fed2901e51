//! GraphQL API definitions.

pub mod advert;
pub mod cart;
pub mod category;
pub mod city;
mod mutation;
pub mod order;
pub mod profile;
mod query;
pub mod scalar;
pub mod user;

use juniper::EmptySubscription;

use crate::{define_error, Context};

pub use self::{
    advert::Advert, category::Category, city::City, mutation::Mutation,
    order::Order, profile::Profile, query::Query,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

/// Creates a new [`Schema`].
#[must_use]
pub fn schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}

define_error! {
    enum AdvertError {
        #[code = "ADVERT_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Advert` with the specified ID does not exist"]
        NotExists,

        #[code = "NOT_ADVERT_OWNER"]
        #[status = FORBIDDEN]
        #[message = "Authenticated user does not own the `Advert`"]
        NotOwner,
    }
}

define_error! {
    enum CartError {
        #[code = "NOT_IN_CART"]
        #[status = CONFLICT]
        #[message = "`Advert` with the specified ID is not in the list"]
        NotInCart,
    }
}

define_error! {
    enum PaginationError {
        #[code = "INVALID_PAGINATION_ARGUMENTS"]
        #[status = BAD_REQUEST]
        #[message = "Invalid pagination arguments"]
        Invalid,

        #[code = "TOO_MANY_REQUESTED"]
        #[status = BAD_REQUEST]
        #[message = "Too many `Advert`s are requested at once"]
        TooManyRequested,
    }
}

define_error! {
    enum TaxonomyError {
        #[code = "UNKNOWN_CATEGORY"]
        #[status = NOT_FOUND]
        #[message = "No `Category` is addressed by the specified key"]
        UnknownCategory,

        #[code = "UNKNOWN_CITY"]
        #[status = NOT_FOUND]
        #[message = "No `City` is addressed by the specified key"]
        UnknownCity,
    }
}
