//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{query, read, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";

    /// Number of `Advert`s listed when no `count` is requested, unless the
    /// configured maximum page size is lower.
    const DEFAULT_PAGE_SIZE: usize = 10;
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns all the `City`s in the order they were registered.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "cities",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn cities(ctx: &Context) -> Result<Vec<api::City>, Error> {
        ctx.service()
            .execute(query::cities::All::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|cities| cities.into_iter().map(Into::into).collect())
    }

    /// Returns all the `Category`s in the order they were registered.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "categories",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn categories(
        ctx: &Context,
    ) -> Result<Vec<api::Category>, Error> {
        ctx.service()
            .execute(query::categories::All::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|all| all.into_iter().map(Into::into).collect())
    }

    /// Returns the `City` addressed by the provided name or translation.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `UNKNOWN_CITY` - no `City` is addressed by the provided key.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "city",
            key = %key,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn city(
        key: api::city::Key,
        ctx: &Context,
    ) -> Result<api::City, Error> {
        ctx.service()
            .execute(query::city::ByKey::by(key.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| api::TaxonomyError::UnknownCity.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Category` addressed by the provided name or translation.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `UNKNOWN_CATEGORY` - no `Category` is addressed by the provided key.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "category",
            key = %key,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn category(
        key: api::category::Key,
        ctx: &Context,
    ) -> Result<api::Category, Error> {
        ctx.service()
            .execute(query::category::ByKey::by(key.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| api::TaxonomyError::UnknownCategory.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Advert` with the specified ID.
    ///
    /// Closed `Advert`s are returned as well, deleted ones are not.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ADVERT_NOT_EXISTS` - the `Advert` with the specified ID does not
    ///                         exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "advert",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn advert(
        id: api::advert::Id,
        ctx: &Context,
    ) -> Result<api::Advert, Error> {
        ctx.service()
            .execute(query::advert::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Advert` with the specified ID, checking it is located
    /// in the specified `City` and classified under the specified
    /// `Category`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `UNKNOWN_CITY` - no `City` is addressed by the provided key;
    /// - `UNKNOWN_CATEGORY` - no `Category` is addressed by the provided key;
    /// - `ADVERT_NOT_EXISTS` - the `Advert` with the specified ID does not
    ///                         exist;
    /// - `CITY_MISMATCH` - the `Advert` is located in another `City`;
    /// - `CATEGORY_MISMATCH` - the `Advert` is classified under another
    ///                         `Category`.
    #[tracing::instrument(
        skip_all,
        fields(
            category = %category,
            city = %city,
            gql.name = "advertByPath",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn advert_by_path(
        id: api::advert::Id,
        city: api::city::Key,
        category: api::category::Key,
        ctx: &Context,
    ) -> Result<api::Advert, Error> {
        ctx.service()
            .execute(query::advert::ByPath {
                advert_id: id.into(),
                city: city.into(),
                category: category.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Fetches the page of listed `Advert`s located in the specified `City`,
    /// optionally narrowed to the specified `Category`.
    ///
    /// Scanning starts from the `start` cursor inclusively (or from the very
    /// first `Advert`) in ascending ID order.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PAGINATION_ARGUMENTS` - the `count` is negative;
    /// - `TOO_MANY_REQUESTED` - the `count` exceeds the allowed page size;
    /// - `UNKNOWN_CITY` - no `City` is addressed by the provided key;
    /// - `UNKNOWN_CATEGORY` - no `Category` is addressed by the provided key.
    #[tracing::instrument(
        skip_all,
        fields(
            category = ?category.as_ref().map(ToString::to_string),
            city = %city,
            count = ?count,
            gql.name = "adverts",
            otel.name = Self::SPAN_NAME,
            start = ?start,
        ),
    )]
    pub async fn adverts(
        city: api::city::Key,
        category: Option<api::category::Key>,
        start: Option<api::advert::list::Cursor>,
        count: Option<i32>,
        ctx: &Context,
    ) -> Result<api::advert::list::Connection, Error> {
        let count = match count {
            Some(count) => usize::try_from(count).ok(),
            None => Some(
                Self::DEFAULT_PAGE_SIZE
                    .min(ctx.service().config().max_page_size),
            ),
        };
        let arguments = count
            .and_then(|count| {
                read::advert::list::Arguments::new(
                    start.map_or(read::advert::list::Cursor::FIRST, Into::into),
                    count,
                )
            })
            .ok_or_else(|| api::PaginationError::Invalid.into())
            .map_err(ctx.error())?;

        let page = if let Some(category) = category {
            ctx.service()
                .execute(query::adverts::ByCategory {
                    category: category.into(),
                    city: city.into(),
                    arguments,
                })
                .await
                .map_err(AsError::into_error)
        } else {
            ctx.service()
                .execute(query::adverts::ByCity {
                    city: city.into(),
                    arguments,
                })
                .await
                .map_err(AsError::into_error)
        };
        page.map_err(ctx.error()).map(Into::into)
    }

    /// Returns the `Advert`s in the specified list of the authenticated
    /// user, in the order they were added.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `ADVERT_NOT_EXISTS` - one of the `Advert`s in the list was deleted.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myCart",
            list = ?list,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_cart(
        list: Option<api::cart::List>,
        ctx: &Context,
    ) -> Result<Vec<api::Advert>, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(query::cart::ByUser {
                user_id: my_id.into(),
                list: list.unwrap_or_default().into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|adverts| adverts.into_iter().map(Into::into).collect())
    }

    /// Returns the `Order`s placed by the authenticated user, oldest first.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myOrders",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_orders(ctx: &Context) -> Result<Vec<api::Order>, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(query::orders::ByUser::by(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|orders| orders.into_iter().map(Into::into).collect())
    }

    /// Returns the `Profile` of the authenticated user, if it was ever
    /// updated.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myProfile",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_profile(
        ctx: &Context,
    ) -> Result<Option<api::Profile>, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(query::profile::ByUser::by(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|profile| profile.map(Into::into))
    }
}

impl AsError for query::advert::by_id::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::AdvertNotExists(_) => api::AdvertError::NotExists.into(),
            Self::Db(e) => return e.try_as_error(),
        })
    }
}

impl AsError for query::advert::by_path::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "CATEGORY_MISMATCH"]
                #[status = NOT_FOUND]
                #[message = "`Advert` is classified under another `Category`"]
                CategoryMismatch,

                #[code = "CITY_MISMATCH"]
                #[status = NOT_FOUND]
                #[message = "`Advert` is located in another `City`"]
                CityMismatch,
            }
        }

        Some(match self {
            Self::AdvertNotExists(_) => api::AdvertError::NotExists.into(),
            Self::CategoryMismatch { .. } => Error::CategoryMismatch.into(),
            Self::CityMismatch { .. } => Error::CityMismatch.into(),
            Self::Db(e) => return e.try_as_error(),
            Self::UnknownCategory(_) => {
                api::TaxonomyError::UnknownCategory.into()
            }
            Self::UnknownCity(_) => api::TaxonomyError::UnknownCity.into(),
        })
    }
}

impl AsError for query::adverts::by_city::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::TooManyRequested(_) => {
                api::PaginationError::TooManyRequested.into()
            }
            Self::UnknownCity(_) => api::TaxonomyError::UnknownCity.into(),
        })
    }
}

impl AsError for query::adverts::by_category::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::TooManyRequested(_) => {
                api::PaginationError::TooManyRequested.into()
            }
            Self::UnknownCategory(_) => {
                api::TaxonomyError::UnknownCategory.into()
            }
            Self::UnknownCity(_) => api::TaxonomyError::UnknownCity.into(),
        })
    }
}

impl AsError for query::cart::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::AdvertNotExists(_) => api::AdvertError::NotExists.into(),
            Self::Db(e) => return e.try_as_error(),
        })
    }
}
