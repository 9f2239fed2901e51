//! GraphQL [`Mutation`]s definitions.

use juniper::graphql_object;
use service::{command, Command as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new listed `Advert` owned by the authenticated user.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `UNKNOWN_CITY` - no `City` is addressed by the provided key;
    /// - `UNKNOWN_CATEGORY` - no `Category` is addressed by the provided key.
    #[tracing::instrument(
        skip_all,
        fields(
            category = %category,
            city = %city,
            gql.name = "createAdvert",
            otel.name = Self::SPAN_NAME,
            price = %price,
            title = %title,
        ),
    )]
    pub async fn create_advert(
        city: api::city::Key,
        category: api::category::Key,
        title: api::advert::Title,
        description: api::advert::Description,
        price: api::advert::Price,
        is_used: bool,
        ctx: &Context,
    ) -> Result<api::Advert, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::CreateAdvert {
                user_id: my_id.into(),
                city: city.into(),
                category: category.into(),
                title: title.into(),
                description: description.into(),
                price: price.into(),
                is_used,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Replaces the editable fields of the `Advert` with the specified ID.
    ///
    /// A closed `Advert` becomes listed again.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `ADVERT_NOT_EXISTS` - the `Advert` with the specified ID does not
    ///                         exist;
    /// - `NOT_ADVERT_OWNER` - the `Advert` is owned by another user.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "editAdvert",
            id = %id,
            otel.name = Self::SPAN_NAME,
            price = %price,
            title = %title,
        ),
    )]
    pub async fn edit_advert(
        id: api::advert::Id,
        title: api::advert::Title,
        description: api::advert::Description,
        price: api::advert::Price,
        is_used: bool,
        ctx: &Context,
    ) -> Result<api::Advert, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::EditAdvert {
                advert_id: id.into(),
                initiator_id: my_id.into(),
                title: title.into(),
                description: description.into(),
                price: price.into(),
                is_used,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Closes the `Advert` with the specified ID, hiding it from listings.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `ADVERT_NOT_EXISTS` - the `Advert` with the specified ID does not
    ///                         exist;
    /// - `NOT_ADVERT_OWNER` - the `Advert` is owned by another user;
    /// - `ADVERT_ALREADY_CLOSED` - the `Advert` is closed already.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "closeAdvert",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn close_advert(
        id: api::advert::Id,
        ctx: &Context,
    ) -> Result<api::Advert, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::CloseAdvert {
                advert_id: id.into(),
                initiator_id: my_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Advert` with the specified ID for good.
    ///
    /// Returns the ID of the deleted `Advert`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `ADVERT_NOT_EXISTS` - the `Advert` with the specified ID does not
    ///                         exist;
    /// - `NOT_ADVERT_OWNER` - the `Advert` is owned by another user.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteAdvert",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_advert(
        id: api::advert::Id,
        ctx: &Context,
    ) -> Result<api::advert::Id, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::DeleteAdvert {
                advert_id: id.into(),
                initiator_id: my_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| id)
    }

    /// Adds the `Advert` with the specified ID to the specified list of the
    /// authenticated user, or removes it if it is there already.
    ///
    /// Returns `true` if the `Advert` was added, and `false` if removed.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `ADVERT_NOT_EXISTS` - the `Advert` to be added does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            advert_id = %advert_id,
            gql.name = "toggleCartItem",
            list = ?list,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn toggle_cart_item(
        advert_id: api::advert::Id,
        list: Option<api::cart::List>,
        ctx: &Context,
    ) -> Result<bool, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::ToggleCartItem {
                user_id: my_id.into(),
                advert_id: advert_id.into(),
                list: list.unwrap_or_default().into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Removes the `Advert` with the specified ID from the specified list of
    /// the authenticated user.
    ///
    /// Returns the ID of the removed `Advert`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `NOT_IN_CART` - the `Advert` is not in the list.
    #[tracing::instrument(
        skip_all,
        fields(
            advert_id = %advert_id,
            gql.name = "removeCartItem",
            list = ?list,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn remove_cart_item(
        advert_id: api::advert::Id,
        list: Option<api::cart::List>,
        ctx: &Context,
    ) -> Result<api::advert::Id, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::RemoveCartItem {
                user_id: my_id.into(),
                advert_id: advert_id.into(),
                list: list.unwrap_or_default().into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| advert_id)
    }

    /// Turns the provided items of the authenticated user's cart into
    /// `Order`s.
    ///
    /// The batch is all-or-nothing: if any item fails, no `Order` is placed
    /// and the cart stays untouched.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `NOT_IN_CART` - an `Advert` is not in the cart (or is listed twice
    ///                   in the batch);
    /// - `ADVERT_NOT_EXISTS` - an `Advert` in the cart was deleted;
    /// - `PHONE_MISSING` - neither the item nor the `Profile` has a phone.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createOrders",
            items = items.len(),
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_orders(
        items: Vec<api::order::Item>,
        ctx: &Context,
    ) -> Result<Vec<api::Order>, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::CreateOrder {
                user_id: my_id.into(),
                items: items.into_iter().map(Into::into).collect(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|orders| orders.into_iter().map(Into::into).collect())
    }

    /// Updates the `Profile` of the authenticated user, creating it on the
    /// first call.
    ///
    /// Omitted fields are left intact.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `UNKNOWN_CITY` - no `City` is addressed by the provided key.
    #[tracing::instrument(
        skip_all,
        fields(
            city = ?city.as_ref().map(ToString::to_string),
            gql.name = "updateProfile",
            otel.name = Self::SPAN_NAME,
            rating = ?rating.map(|r| r.to_string()),
        ),
    )]
    pub async fn update_profile(
        rating: Option<api::profile::Rating>,
        city: Option<api::city::Key>,
        phone: Option<api::user::Phone>,
        ctx: &Context,
    ) -> Result<api::Profile, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::UpdateProfile {
                user_id: my_id.into(),
                rating: rating.map(Into::into),
                city: city.map(Into::into),
                phone: phone.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

impl AsError for command::create_advert::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::UnknownCategory(_) => {
                api::TaxonomyError::UnknownCategory.into()
            }
            Self::UnknownCity(_) => api::TaxonomyError::UnknownCity.into(),
        })
    }
}

impl AsError for command::edit_advert::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::AdvertNotExists(_) => api::AdvertError::NotExists.into(),
            Self::Db(e) => return e.try_as_error(),
            Self::Forbidden { .. } => api::AdvertError::NotOwner.into(),
        })
    }
}

impl AsError for command::close_advert::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "ADVERT_ALREADY_CLOSED"]
                #[status = CONFLICT]
                #[message = "`Advert` with the provided ID is closed already"]
                AdvertAlreadyClosed,
            }
        }

        Some(match self {
            Self::AdvertAlreadyClosed(_) => Error::AdvertAlreadyClosed.into(),
            Self::AdvertNotExists(_) => api::AdvertError::NotExists.into(),
            Self::Db(e) => return e.try_as_error(),
            Self::Forbidden { .. } => api::AdvertError::NotOwner.into(),
        })
    }
}

impl AsError for command::delete_advert::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::AdvertNotExists(_) => api::AdvertError::NotExists.into(),
            Self::Db(e) => return e.try_as_error(),
            Self::Forbidden { .. } => api::AdvertError::NotOwner.into(),
        })
    }
}

impl AsError for command::toggle_cart_item::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::AdvertNotExists(_) => api::AdvertError::NotExists.into(),
            Self::Db(e) => return e.try_as_error(),
        })
    }
}

impl AsError for command::remove_cart_item::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::NotInCart(_) => api::CartError::NotInCart.into(),
        })
    }
}

impl AsError for command::create_order::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "PHONE_MISSING"]
                #[status = BAD_REQUEST]
                #[message = "Neither the order item nor the `Profile` has a \
                             phone"]
                PhoneMissing,
            }
        }

        Some(match self {
            Self::AdvertNotExists(_) => api::AdvertError::NotExists.into(),
            Self::Db(e) => return e.try_as_error(),
            Self::NotInCart(_) => api::CartError::NotInCart.into(),
            Self::PhoneMissing(_) => Error::PhoneMissing.into(),
        })
    }
}

impl AsError for command::update_profile::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::UnknownCity(_) => api::TaxonomyError::UnknownCity.into(),
        })
    }
}
