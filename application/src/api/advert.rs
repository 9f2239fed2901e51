//! [`Advert`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::domain;

use crate::{api, api::scalar, Context, Error};

/// A classified advert.
#[derive(Clone, Debug, From, Into)]
pub struct Advert(domain::Advert);

/// A classified advert.
#[graphql_object(context = Context)]
impl Advert {
    /// Unique identifier of this `Advert`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Advert.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// ID of the user owning this `Advert`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Advert.ownerId",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn owner_id(&self) -> api::user::Id {
        self.0.user_id.into()
    }

    /// Indicator whether this `Advert` is owned by the authenticated user.
    ///
    /// Always `false` for anonymous requests.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Advert.isMine",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn is_mine(&self, ctx: &Context) -> Result<bool, Error> {
        Ok(ctx
            .try_current_session()
            .await?
            .is_some_and(|s| {
                s.user_id == api::user::Id::from(self.0.user_id)
            }))
    }

    /// ID of the `City` this `Advert` is located in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Advert.cityId",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn city_id(&self) -> api::city::Id {
        self.0.city_id.into()
    }

    /// ID of the `Category` this `Advert` is classified under.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Advert.categoryId",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn category_id(&self) -> api::category::Id {
        self.0.category_id.into()
    }

    /// Title of this `Advert`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Advert.title",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn title(&self) -> Title {
        self.0.title.clone().into()
    }

    /// Description of this `Advert`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Advert.description",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn description(&self) -> Description {
        self.0.description.clone().into()
    }

    /// Price of this `Advert` in minor currency units.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Advert.price",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn price(&self) -> Price {
        self.0.price.into()
    }

    /// Indicator whether the item of this `Advert` is second-hand.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Advert.isUsed",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn is_used(&self) -> bool {
        self.0.is_used
    }

    /// Lifecycle status of this `Advert`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Advert.status",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn status(&self) -> Status {
        self.0.status().into()
    }

    /// `DateTime` when this `Advert` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Advert.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }

    /// `DateTime` when this `Advert` was closed, if it is.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Advert.closedAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn closed_at(&self) -> Option<DateTime> {
        self.0.closed_at.map(|at| at.coerce())
    }
}

/// Unique identifier of an `Advert`.
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
#[graphql(name = "AdvertId", with = scalar::Via::<domain::advert::Id>)]
pub struct Id(domain::advert::Id);

/// Title of an `Advert`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "AdvertTitle", with = scalar::Via::<domain::advert::Title>)]
pub struct Title(domain::advert::Title);

/// Description of an `Advert`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "AdvertDescription",
    with = scalar::Via::<domain::advert::Description>,
)]
pub struct Description(domain::advert::Description);

/// Price of an `Advert` in minor currency units.
///
/// Serialized as a string, since it may exceed the GraphQL `Int` range.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "AdvertPrice", with = scalar::Via::<domain::advert::Price>)]
pub struct Price(domain::advert::Price);

/// Lifecycle status of an `Advert`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "AdvertStatus")]
pub enum Status {
    /// Active and visible in listings.
    Listed,

    /// Closed by its owner. Editing lists it again.
    Closed,

    /// Deleted. Never visible again.
    Deleted,
}

impl From<domain::advert::Status> for Status {
    fn from(status: domain::advert::Status) -> Self {
        use domain::advert::Status as S;
        match status {
            S::Listed => Self::Listed,
            S::Closed => Self::Closed,
            S::Deleted => Self::Deleted,
        }
    }
}

pub mod list {
    //! Definitions related to the [`Advert`] list.

    use derive_more::{AsRef, From, Into};
    use juniper::{graphql_object, GraphQLScalar};
    use service::read;

    use super::Advert;
    use crate::{api::scalar, Context};

    /// Cursor for the `Advert` list.
    ///
    /// Listing starts from the `Advert` it points to, inclusively.
    #[derive(AsRef, Clone, Copy, Debug, From, GraphQLScalar, Into)]
    #[from(super::Id, read::advert::list::Cursor)]
    #[graphql(
        name = "AdvertListCursor",
        with = scalar::Via::<read::advert::list::Cursor>,
    )]
    pub struct Cursor(pub read::advert::list::Cursor);

    /// Edge in the [`Advert`] list.
    #[derive(Clone, Debug, From, Into)]
    pub struct Edge(read::advert::list::Edge);

    /// Edge in the `Advert` list.
    #[graphql_object(name = "AdvertListEdge", context = Context)]
    impl Edge {
        /// Cursor of this `AdvertListEdge`.
        #[must_use]
        pub fn cursor(&self) -> Cursor {
            self.0.cursor.into()
        }

        /// Node of this `AdvertListEdge`.
        #[must_use]
        pub fn node(&self) -> Advert {
            self.0.node.clone().into()
        }
    }

    /// Connection of the [`Advert`] list.
    #[derive(Clone, Debug, From, Into)]
    pub struct Connection(read::advert::list::Connection);

    /// Connection of the `Advert` list.
    #[graphql_object(name = "AdvertListConnection", context = Context)]
    impl Connection {
        /// Edges of this `AdvertListConnection`.
        #[must_use]
        pub fn edges(&self) -> Vec<Edge> {
            self.0.edges.iter().cloned().map(Into::into).collect()
        }

        /// Information about the page.
        #[must_use]
        pub fn page_info(&self) -> PageInfo {
            self.0.page_info().into()
        }
    }

    /// Information about a [`Connection`] page.
    #[derive(Clone, Copy, Debug, From)]
    pub struct PageInfo(read::advert::list::PageInfo);

    /// Information about an `AdvertListConnection` page.
    #[graphql_object(name = "AdvertListPageInfo", context = Context)]
    impl PageInfo {
        /// Indicator whether there is a next page.
        ///
        /// Resume listing from the cursor following `endCursor`.
        #[must_use]
        pub fn has_next_page(&self) -> bool {
            self.0.has_next_page
        }

        /// Start cursor of the page.
        #[must_use]
        pub fn start_cursor(&self) -> Option<Cursor> {
            self.0.start_cursor.map(Into::into)
        }

        /// End cursor of the page.
        #[must_use]
        pub fn end_cursor(&self) -> Option<Cursor> {
            self.0.end_cursor.map(Into::into)
        }
    }
}
