//! [`Order`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::Advert;
use crate::domain::{advert, user};

/// Record of a single [`Advert`] being ordered by a user.
///
/// Never removed. Only [`Order::status`] and [`Order::updated_at`] are
/// expected to change, driven by fulfillment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Order {
    /// ID of this [`Order`].
    pub id: Id,

    /// ID of the user who placed this [`Order`].
    pub user_id: user::Id,

    /// ID of the ordered [`Advert`].
    pub advert_id: advert::Id,

    /// [`Status`] of this [`Order`].
    pub status: Status,

    /// [`DateTime`] when this [`Order`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Order`] was last updated.
    pub updated_at: UpdateDateTime,

    /// [`DateTime`] when this [`Order`] was closed.
    pub closed_at: ClosingDateTime,

    /// [`user::Phone`] to contact the recipient by.
    pub phone: user::Phone,

    /// [`RecipientName`] of this [`Order`].
    pub name: RecipientName,

    /// [`user::Email`] to notify the recipient by, if any.
    pub email: Option<user::Email>,

    /// Delivery [`Address`] of this [`Order`].
    pub address: Address,

    /// [`DeliveryPrice`] of this [`Order`].
    pub delivery_price: DeliveryPrice,

    /// [`advert::Title`] of the [`Advert`] at the moment of ordering.
    pub title: advert::Title,

    /// [`advert::Price`] of the [`Advert`] at the moment of ordering.
    pub price: advert::Price,
}

define_kind! {
    #[doc = "Fulfillment status of an [`Order`]."]
    enum Status {
        #[doc = "[`Order`] is placed and awaits delivery."]
        Created = 1,

        #[doc = "[`Order`] is being delivered."]
        InDelivery = 2,

        #[doc = "[`Order`] is delivered."]
        Delivered = 3,
    }
}

/// ID of an [`Order`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Id(u64);

impl Id {
    /// The first [`Id`] ever issued.
    pub const FIRST: Self = Self(1);
}

/// Name of an [`Order`] recipient.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct RecipientName(String);

impl RecipientName {
    /// Creates a new [`RecipientName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`RecipientName`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 256
    }
}

impl FromStr for RecipientName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `order::RecipientName`")
    }
}

/// Delivery address of an [`Order`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Address`].
    fn check(address: impl AsRef<str>) -> bool {
        let address = address.as_ref();
        address.trim() == address
            && !address.is_empty()
            && address.len() <= 1024
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `order::Address`")
    }
}

/// Price of an [`Order`] delivery in minor units of the marketplace currency.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct DeliveryPrice(u64);

/// [`Order`] which has not been assigned an [`Id`] yet.
#[derive(Clone, Debug)]
pub struct Draft {
    /// ID of the user placing the [`Order`].
    pub user_id: user::Id,

    /// ID of the ordered [`Advert`].
    pub advert_id: advert::Id,

    /// [`user::Phone`] of the recipient.
    pub phone: user::Phone,

    /// [`RecipientName`] of the [`Order`].
    pub name: RecipientName,

    /// [`user::Email`] of the recipient, if any.
    pub email: Option<user::Email>,

    /// Delivery [`Address`] of the [`Order`].
    pub address: Address,

    /// [`DeliveryPrice`] of the [`Order`].
    pub delivery_price: DeliveryPrice,

    /// Snapshot of the ordered [`Advert`]'s title.
    pub title: advert::Title,

    /// Snapshot of the ordered [`Advert`]'s price.
    pub price: advert::Price,

    /// [`DateTime`] when the [`Order`] is placed.
    pub created_at: CreationDateTime,
}

impl Draft {
    /// Turns this [`Draft`] into a [`Status::Created`] [`Order`] with the
    /// provided [`Id`].
    #[must_use]
    pub fn into_order(self, id: Id) -> Order {
        let Self {
            user_id,
            advert_id,
            phone,
            name,
            email,
            address,
            delivery_price,
            title,
            price,
            created_at,
        } = self;
        Order {
            id,
            user_id,
            advert_id,
            status: Status::Created,
            created_at,
            updated_at: created_at.coerce(),
            closed_at: created_at.coerce(),
            phone,
            name,
            email,
            address,
            delivery_price,
            title,
            price,
        }
    }
}

/// [`DateTime`] when an [`Order`] was created.
pub type CreationDateTime = DateTimeOf<(Order, unit::Creation)>;

/// [`DateTime`] when an [`Order`] was updated.
pub type UpdateDateTime = DateTimeOf<(Order, unit::Update)>;

/// [`DateTime`] when an [`Order`] was closed.
pub type ClosingDateTime = DateTimeOf<(Order, unit::Closing)>;

#[cfg(test)]
mod spec {
    use common::DateTime;

    use crate::domain::{advert, user};

    use super::{Address, Draft, Id, RecipientName, Status};

    #[test]
    fn draft_becomes_created() {
        let order = Draft {
            user_id: 1_u64.into(),
            advert_id: 1_u64.into(),
            phone: user::Phone::new("+380991234567").unwrap(),
            name: RecipientName::new("Ivan").unwrap(),
            email: None,
            address: Address::new("Lenina 1").unwrap(),
            delivery_price: 50_u64.into(),
            title: advert::Title::new("Phone").unwrap(),
            price: 100_u64.into(),
            created_at: DateTime::now().coerce(),
        }
        .into_order(Id::FIRST);

        let created: DateTime = order.created_at.coerce();
        let updated: DateTime = order.updated_at.coerce();
        let closed: DateTime = order.closed_at.coerce();
        assert_eq!(order.status, Status::Created);
        assert_eq!(created, updated);
        assert_eq!(created, closed);
    }

    #[test]
    fn status_has_stable_representation() {
        assert_eq!("DELIVERED".parse::<Status>(), Ok(Status::Delivered));
        assert_eq!(Status::InDelivery.to_string(), "IN_DELIVERY");
    }
}
