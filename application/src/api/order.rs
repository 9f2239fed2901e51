//! [`Order`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLScalar};
use service::{command, domain};

use crate::{api, api::scalar, Context};

/// An order placed for a single advert.
#[derive(Clone, Debug, From, Into)]
pub struct Order(domain::Order);

/// An order placed for a single advert.
///
/// Keeps a snapshot of the advert title and price taken when the order was
/// placed.
#[graphql_object(context = Context)]
impl Order {
    /// Unique identifier of this `Order`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// ID of the ordered `Advert`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.advertId",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn advert_id(&self) -> api::advert::Id {
        self.0.advert_id.into()
    }

    /// Fulfillment status of this `Order`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.status",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// Title of the ordered `Advert` at the moment of ordering.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.title",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn title(&self) -> api::advert::Title {
        self.0.title.clone().into()
    }

    /// Price of the ordered `Advert` at the moment of ordering.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.price",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn price(&self) -> api::advert::Price {
        self.0.price.into()
    }

    /// Price of the delivery.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.deliveryPrice",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn delivery_price(&self) -> DeliveryPrice {
        self.0.delivery_price.into()
    }

    /// Name of the recipient.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn name(&self) -> RecipientName {
        self.0.name.clone().into()
    }

    /// Phone of the recipient.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.phone",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn phone(&self) -> api::user::Phone {
        self.0.phone.clone().into()
    }

    /// Email of the recipient, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.email",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn email(&self) -> Option<api::user::Email> {
        self.0.email.clone().map(Into::into)
    }

    /// Delivery address.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.address",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn address(&self) -> Address {
        self.0.address.clone().into()
    }

    /// `DateTime` when this `Order` was placed.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }

    /// `DateTime` when this `Order` was last updated.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.updatedAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn updated_at(&self) -> DateTime {
        self.0.updated_at.coerce()
    }
}

/// Single item of an order batch.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "OrderItemInput")]
pub struct Item {
    /// ID of the `Advert` in the cart to be ordered.
    pub advert_id: api::advert::Id,

    /// Phone of the recipient.
    ///
    /// Falls back to the phone of the authenticated user's `Profile`.
    pub phone: Option<api::user::Phone>,

    /// Name of the recipient.
    pub name: RecipientName,

    /// Email of the recipient.
    pub email: Option<api::user::Email>,

    /// Delivery address.
    pub address: Address,

    /// Price of the delivery.
    pub delivery_price: DeliveryPrice,
}

impl From<Item> for command::create_order::Item {
    fn from(item: Item) -> Self {
        let Item {
            advert_id,
            phone,
            name,
            email,
            address,
            delivery_price,
        } = item;
        Self {
            advert_id: advert_id.into(),
            phone: phone.map(Into::into),
            name: name.into(),
            email: email.map(Into::into),
            address: address.into(),
            delivery_price: delivery_price.into(),
        }
    }
}

/// Unique identifier of an `Order`.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "OrderId", with = scalar::Via::<domain::order::Id>)]
pub struct Id(domain::order::Id);

/// Name of an `Order` recipient.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "OrderRecipientName",
    with = scalar::Via::<domain::order::RecipientName>,
)]
pub struct RecipientName(domain::order::RecipientName);

/// Delivery address of an `Order`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "OrderAddress", with = scalar::Via::<domain::order::Address>)]
pub struct Address(domain::order::Address);

/// Delivery price of an `Order` in minor currency units.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "OrderDeliveryPrice",
    with = scalar::Via::<domain::order::DeliveryPrice>,
)]
pub struct DeliveryPrice(domain::order::DeliveryPrice);

/// Fulfillment status of an `Order`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "OrderStatus")]
pub enum Status {
    /// Placed and awaiting delivery.
    Created,

    /// Being delivered.
    InDelivery,

    /// Delivered.
    Delivered,
}

impl From<domain::order::Status> for Status {
    fn from(status: domain::order::Status) -> Self {
        use domain::order::Status as S;
        match status {
            S::Created => Self::Created,
            S::InDelivery => Self::InDelivery,
            S::Delivered => Self::Delivered,
        }
    }
}
