//! [`Category`]-related definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;

use crate::{api, api::scalar, Context};

/// A category adverts are classified under.
#[derive(Clone, Debug, From, Into)]
pub struct Category(domain::Category);

/// A category adverts are classified under.
#[graphql_object(context = Context)]
impl Category {
    /// Unique identifier of this `Category`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Category.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Canonical name of this `Category`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Category.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// Transliterated name of this `Category`, used in listing URLs.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Category.translation",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn translation(&self) -> Translation {
        self.0.translation.clone().into()
    }
}

/// Unique identifier of a `Category`.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "CategoryId", with = scalar::Via::<domain::category::Id>)]
pub struct Id(domain::category::Id);

/// Canonical name of a `Category`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "CategoryName", with = scalar::Via::<domain::category::Name>)]
pub struct Name(domain::category::Name);

/// Transliterated name of a `Category`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "CategoryTranslation",
    with = scalar::Via::<domain::category::Translation>,
)]
pub struct Translation(domain::category::Translation);

/// Either a name or a translation addressing a `Category`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "CategoryKey", with = scalar::Via::<domain::category::Key>)]
pub struct Key(domain::category::Key);
