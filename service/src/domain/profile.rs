//! [`Profile`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};

#[cfg(doc)]
use crate::domain::City;
use crate::domain::{city, user};

/// Mutable per-user profile.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Profile {
    /// ID of the user this [`Profile`] describes.
    pub user_id: user::Id,

    /// [`Rating`] of the user as a seller.
    pub rating: Rating,

    /// ID of the [`City`] the user lives in, if known.
    pub city_id: Option<city::Id>,

    /// Contact [`user::Phone`] of the user, if known.
    pub phone: Option<user::Phone>,

    /// [`DateTime`] when this [`Profile`] was last updated.
    pub updated_at: Option<UpdateDateTime>,
}

impl Profile {
    /// Creates a blank [`Profile`] of the provided user.
    #[must_use]
    pub fn new(user_id: user::Id) -> Self {
        Self {
            user_id,
            rating: Rating::default(),
            city_id: None,
            phone: None,
            updated_at: None,
        }
    }
}

/// Seller rating of a user.
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
pub struct Rating(u32);

/// [`DateTime`] when a [`Profile`] was updated.
pub type UpdateDateTime = DateTimeOf<(Profile, unit::Update)>;
