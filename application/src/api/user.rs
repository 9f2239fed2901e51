//! User-related definitions.
//!
//! Users themselves are owned by the authentication service, so only their
//! identifiers and contact info cross this API.

use derive_more::{AsRef, Display, From, Into};
use juniper::GraphQLScalar;
use service::domain;

use crate::api::scalar;

/// Unique identifier of a user.
#[derive(
    AsRef,
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    From,
    GraphQLScalar,
    Into,
    PartialEq,
)]
#[graphql(name = "UserId", with = scalar::Via::<domain::user::Id>)]
pub struct Id(domain::user::Id);

/// Phone number of a user.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "UserPhone", with = scalar::Via::<domain::user::Phone>)]
pub struct Phone(domain::user::Phone);

/// Email address of a user.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "UserEmail", with = scalar::Via::<domain::user::Email>)]
pub struct Email(domain::user::Email);
