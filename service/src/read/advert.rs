//! [`Advert`]-related read definitions.

#[cfg(doc)]
use crate::domain::Advert;

pub mod list {
    //! [`Advert`] list definitions.

    use common::define_pagination;

    use crate::domain::{advert, category, city, Advert};
    #[cfg(doc)]
    use crate::domain::{Category, City};

    define_pagination!(Cursor, Node, Filter);

    /// Node in a [`Connection`].
    pub type Node = Advert;

    /// Cursor pointing to a specific [`Advert`] in a list.
    pub type Cursor = advert::Id;

    /// Filter for [`Selector`].
    ///
    /// Only listed [`Advert`]s ever pass it.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct Filter {
        /// ID of the [`City`] the [`Advert`]s must be located in.
        pub city_id: city::Id,

        /// ID of the [`Category`] the [`Advert`]s must be classified under,
        /// if any.
        pub category_id: Option<category::Id>,
    }

    impl Filter {
        /// Checks whether the provided [`Advert`] passes this [`Filter`].
        #[must_use]
        pub fn matches(&self, advert: &Advert) -> bool {
            advert.is_listed()
                && advert.city_id == self.city_id
                && self.category_id.map_or(true, |id| advert.category_id == id)
        }
    }
}
