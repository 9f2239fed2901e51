//! [`City`]-related definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;

use crate::{api, api::scalar, Context};

/// A city adverts are located in.
#[derive(Clone, Debug, From, Into)]
pub struct City(domain::City);

/// A city adverts are located in.
#[graphql_object(context = Context)]
impl City {
    /// Unique identifier of this `City`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "City.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Canonical name of this `City`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "City.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// Transliterated name of this `City`, used in listing URLs.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "City.translation",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn translation(&self) -> Translation {
        self.0.translation.clone().into()
    }
}

/// Unique identifier of a `City`.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "CityId", with = scalar::Via::<domain::city::Id>)]
pub struct Id(domain::city::Id);

/// Canonical name of a `City`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "CityName", with = scalar::Via::<domain::city::Name>)]
pub struct Name(domain::city::Name);

/// Transliterated name of a `City`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "CityTranslation",
    with = scalar::Via::<domain::city::Translation>,
)]
pub struct Translation(domain::city::Translation);

/// Either a name or a translation addressing a `City`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "CityKey", with = scalar::Via::<domain::city::Key>)]
pub struct Key(domain::city::Key);
