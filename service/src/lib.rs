//! Service contains the business logic of the classifieds marketplace:
//! taxonomy, advert catalog, cart and favourites ledger, orders and
//! profiles.
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;

use derive_more::Debug;

#[cfg(doc)]
use infra::Database;

pub use self::{command::Command, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// [JWT] decoding key.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[debug(skip)]
    pub jwt_decoding_key: jsonwebtoken::DecodingKey,

    /// Maximum number of [`Advert`]s to be listed at once.
    ///
    /// [`Advert`]: domain::Advert
    pub max_page_size: usize,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,
}

impl<Db> Service<Db> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, database: Db) -> Self {
        Self { config, database }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }
}

#[cfg(test)]
mod test_util {
    //! Helpers for driving a [`Service`] in tests.

    use jsonwebtoken::DecodingKey;

    use crate::{
        command::{CreateAdvert, CreateCategory, CreateCity},
        domain::{advert, category, city, Advert},
        infra::Memory,
        query::adverts,
        read::advert::list::Arguments,
        Command as _, Config, Service,
    };

    /// Secret the tests sign their tokens with.
    pub(crate) const SECRET: &[u8] = b"secret";

    /// Creates a new [`Service`] over an empty [`Memory`] database.
    pub(crate) fn service() -> Service<Memory> {
        Service::new(
            Config {
                jwt_decoding_key: DecodingKey::from_secret(SECRET),
                max_page_size: 100,
            },
            Memory::new(),
        )
    }

    /// Creates a new [`Service`] with "Moscow" city and "Electronics"
    /// category registered.
    pub(crate) async fn seeded() -> Service<Memory> {
        let svc = service();
        _ = svc
            .execute(CreateCity {
                name: city::Name::new("Moscow").unwrap(),
                translation: city::Translation::new("Moskva").unwrap(),
            })
            .await
            .unwrap();
        _ = svc
            .execute(CreateCategory {
                name: category::Name::new("Electronics").unwrap(),
                translation: category::Translation::new("Elektronika")
                    .unwrap(),
            })
            .await
            .unwrap();
        svc
    }

    /// Builds a [`CreateAdvert`] of user `1` in the provided taxonomy.
    pub(crate) fn create_advert(city: &str, category: &str) -> CreateAdvert {
        CreateAdvert {
            user_id: 1_u64.into(),
            city: city::Key::new(city).unwrap(),
            category: category::Key::new(category).unwrap(),
            title: advert::Title::new("Phone").unwrap(),
            description: advert::Description::new("desc").unwrap(),
            price: 100_u64.into(),
            is_used: true,
        }
    }

    /// Creates a listed [`Advert`] of user `1` in "Moskva" and "Elektronika".
    pub(crate) async fn listed_advert(svc: &Service<Memory>) -> Advert {
        svc.execute(create_advert("Moskva", "Elektronika"))
            .await
            .unwrap()
    }

    /// Builds an [`adverts::ByCity`] query.
    pub(crate) fn by_city(
        city: &str,
        start: advert::Id,
        count: usize,
    ) -> adverts::ByCity {
        adverts::ByCity {
            city: city::Key::new(city).unwrap(),
            arguments: Arguments { start, count },
        }
    }
}
