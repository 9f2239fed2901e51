//! [`Profile`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;

use crate::{api, api::scalar, Context};

/// Profile of a user.
#[derive(Clone, Debug, From, Into)]
pub struct Profile(domain::Profile);

/// Profile of a user.
#[graphql_object(context = Context)]
impl Profile {
    /// ID of the user owning this `Profile`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.userId",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn user_id(&self) -> api::user::Id {
        self.0.user_id.into()
    }

    /// Rating of the user.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.rating",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn rating(&self) -> Rating {
        self.0.rating.into()
    }

    /// ID of the `City` the user lives in, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.cityId",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn city_id(&self) -> Option<api::city::Id> {
        self.0.city_id.map(Into::into)
    }

    /// Phone of the user, used for orders placed without one.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.phone",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn phone(&self) -> Option<api::user::Phone> {
        self.0.phone.clone().map(Into::into)
    }

    /// `DateTime` when this `Profile` was last updated.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.updatedAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn updated_at(&self) -> Option<DateTime> {
        self.0.updated_at.map(|at| at.coerce())
    }
}

/// Rating of a user.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ProfileRating",
    with = scalar::Via::<domain::profile::Rating>,
)]
pub struct Rating(domain::profile::Rating);
