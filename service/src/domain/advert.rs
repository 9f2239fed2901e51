//! [`Advert`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

use crate::domain::{category, city, user};

/// Classified listing of an item for sale.
///
/// Never removed physically: [`Advert::deleted_at`] marks a terminal state,
/// while [`Advert::closed_at`] marks a reversible one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Advert {
    /// ID of this [`Advert`].
    pub id: Id,

    /// ID of the user who owns this [`Advert`].
    pub user_id: user::Id,

    /// ID of the [`City`] this [`Advert`] is located in.
    ///
    /// [`City`]: crate::domain::City
    pub city_id: city::Id,

    /// ID of the [`Category`] this [`Advert`] is classified under.
    ///
    /// [`Category`]: crate::domain::Category
    pub category_id: category::Id,

    /// [`Title`] of this [`Advert`].
    pub title: Title,

    /// [`Description`] of this [`Advert`].
    pub description: Description,

    /// [`Price`] of this [`Advert`].
    pub price: Price,

    /// Indicator whether the item of this [`Advert`] is second-hand.
    pub is_used: bool,

    /// [`DateTime`] when this [`Advert`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Advert`] was closed, if it is.
    pub closed_at: Option<ClosingDateTime>,

    /// [`DateTime`] when this [`Advert`] was deleted, if it was.
    pub deleted_at: Option<DeletionDateTime>,
}

impl Advert {
    /// Returns [`Status`] of this [`Advert`].
    #[must_use]
    pub fn status(&self) -> Status {
        if self.deleted_at.is_some() {
            Status::Deleted
        } else if self.closed_at.is_some() {
            Status::Closed
        } else {
            Status::Listed
        }
    }

    /// Indicates whether this [`Advert`] is deleted.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.status() == Status::Deleted
    }

    /// Indicates whether this [`Advert`] appears in listings.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        self.status() == Status::Listed
    }
}

/// Lifecycle status of an [`Advert`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Status {
    /// [`Advert`] is active and appears in listings.
    Listed,

    /// [`Advert`] is closed by its owner and may be re-listed by an edit.
    Closed,

    /// [`Advert`] is deleted. No transitions are possible from here.
    Deleted,
}

/// ID of an [`Advert`].
///
/// Issued sequentially starting from `1`, so `0` never addresses an
/// [`Advert`].
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

/// Title of an [`Advert`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 256
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `advert::Title`")
    }
}

/// Description of an [`Advert`].
///
/// May be empty.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`] if the given `description` is valid.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Option<Self> {
        let description = description.into();
        Self::check(&description).then_some(Self(description))
    }

    /// Checks whether the given `description` is a valid [`Description`].
    fn check(description: impl AsRef<str>) -> bool {
        let description = description.as_ref();
        description.trim() == description && description.len() <= 8192
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `advert::Description`")
    }
}

/// Price of an [`Advert`] in minor units of the marketplace currency.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub struct Price(u64);

/// [`Advert`] which has not been assigned an [`Id`] yet.
#[derive(Clone, Debug)]
pub struct Draft {
    /// ID of the user who creates the [`Advert`].
    pub user_id: user::Id,

    /// ID of the resolved [`City`].
    ///
    /// [`City`]: crate::domain::City
    pub city_id: city::Id,

    /// ID of the resolved [`Category`].
    ///
    /// [`Category`]: crate::domain::Category
    pub category_id: category::Id,

    /// [`Title`] of the new [`Advert`].
    pub title: Title,

    /// [`Description`] of the new [`Advert`].
    pub description: Description,

    /// [`Price`] of the new [`Advert`].
    pub price: Price,

    /// Indicator whether the item is second-hand.
    pub is_used: bool,

    /// [`DateTime`] when the [`Advert`] is created.
    pub created_at: CreationDateTime,
}

impl Draft {
    /// Turns this [`Draft`] into a listed [`Advert`] with the provided
    /// [`Id`].
    #[must_use]
    pub fn into_advert(self, id: Id) -> Advert {
        let Self {
            user_id,
            city_id,
            category_id,
            title,
            description,
            price,
            is_used,
            created_at,
        } = self;
        Advert {
            id,
            user_id,
            city_id,
            category_id,
            title,
            description,
            price,
            is_used,
            created_at,
            closed_at: None,
            deleted_at: None,
        }
    }
}

/// [`DateTime`] when an [`Advert`] was created.
pub type CreationDateTime = DateTimeOf<(Advert, unit::Creation)>;

/// [`DateTime`] when an [`Advert`] was closed.
pub type ClosingDateTime = DateTimeOf<(Advert, unit::Closing)>;

/// [`DateTime`] when an [`Advert`] was deleted.
pub type DeletionDateTime = DateTimeOf<(Advert, unit::Deletion)>;

#[cfg(test)]
mod spec {
    use common::DateTime;

    use super::{Description, Draft, Id, Status, Title};

    fn draft() -> Draft {
        Draft {
            user_id: 1_u64.into(),
            city_id: 1_u64.into(),
            category_id: 1_u64.into(),
            title: Title::new("Phone").unwrap(),
            description: Description::new("desc").unwrap(),
            price: 100_u64.into(),
            is_used: true,
            created_at: DateTime::now().coerce(),
        }
    }

    #[test]
    fn draft_becomes_listed() {
        let advert = draft().into_advert(Id::FIRST);

        assert_eq!(advert.id, 1_u64.into());
        assert_eq!(advert.status(), Status::Listed);
        assert!(advert.is_listed());
    }

    #[test]
    fn deletion_dominates_closing() {
        let mut advert = draft().into_advert(Id::FIRST);

        advert.closed_at = Some(DateTime::now().coerce());
        assert_eq!(advert.status(), Status::Closed);
        assert!(!advert.is_listed());

        advert.deleted_at = Some(DateTime::now().coerce());
        assert_eq!(advert.status(), Status::Deleted);
        assert!(advert.is_deleted());
    }

    #[test]
    fn validates_title() {
        assert!(Title::new("").is_none());
        assert!(Title::new("Phone ").is_none());
        assert!(Description::new("").is_some());
    }
}
