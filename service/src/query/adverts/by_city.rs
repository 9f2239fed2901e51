//! [`ByCity`] definition.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::{domain::Advert, Config};
use crate::{
    domain::{city, City},
    infra::{database, Database},
    read::advert::list,
    Query, Service,
};

/// [`Query`] listing [`Advert`]s located in a [`City`].
#[derive(Clone, Debug)]
pub struct ByCity {
    /// [`city::Key`] of the [`City`] to list [`Advert`]s in.
    pub city: city::Key,

    /// [`list::Arguments`] of the requested page.
    pub arguments: list::Arguments,
}

impl<Db> Query<ByCity> for Service<Db>
where
    Db: Database<
            Select<By<Option<City>, city::Key>>,
            Ok = Option<City>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<list::Page, list::Selector>>,
            Ok = list::Page,
            Err = Traced<database::Error>,
        >,
{
    type Ok = list::Page;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: ByCity) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ByCity { city, arguments } = query;

        if arguments.limit() > self.config().max_page_size {
            return Err(tracerr::new!(E::TooManyRequested(arguments.limit())));
        }

        let city = self
            .database()
            .execute(Select(By::<Option<City>, _>::new(city.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UnknownCity(city))
            .map_err(tracerr::wrap!())?;

        self.database()
            .execute(Select(By::<list::Page, _>::new(list::Selector {
                arguments,
                filter: list::Filter {
                    city_id: city.id,
                    category_id: None,
                },
            })))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`ByCity`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Requested page exceeds [`Config::max_page_size`].
    #[display("Cannot list {_0} `Advert`s at once")]
    TooManyRequested(#[error(not(source))] usize),

    /// No [`City`] is addressed by the provided [`city::Key`].
    #[display("`City(key: {_0})` does not exist")]
    UnknownCity(#[error(not(source))] city::Key),
}

#[cfg(test)]
mod spec {
    use std::collections::HashSet;

    use jsonwebtoken::DecodingKey;

    use crate::{
        command::{CloseAdvert, CreateCategory, CreateCity, DeleteAdvert},
        domain::{advert, category, city},
        infra::Memory,
        test_util::{by_city, create_advert, listed_advert, seeded, SECRET},
        Command as _, Config, Query as _, Service,
    };

    use super::ExecutionError;

    #[tokio::test]
    async fn lists_single_advert_until_closed() {
        let svc = seeded().await;
        let created = listed_advert(&svc).await;
        assert_eq!(created.id, advert::Id::FIRST);

        let page = svc
            .execute(by_city("Moskva", advert::Id::FIRST, 10))
            .await
            .unwrap();
        assert!(!page.has_more);
        assert_eq!(page.into_nodes(), [created.clone()]);

        _ = svc
            .execute(CloseAdvert {
                advert_id: created.id,
                initiator_id: created.user_id,
            })
            .await
            .unwrap();
        let page = svc
            .execute(by_city("Moskva", advert::Id::FIRST, 10))
            .await
            .unwrap();
        assert!(page.edges.is_empty());
    }

    #[tokio::test]
    async fn pages_forward_without_duplicates() {
        let svc = seeded().await;
        _ = svc
            .execute(CreateCity {
                name: city::Name::new("Kazan").unwrap(),
                translation: city::Translation::new("Kazan").unwrap(),
            })
            .await
            .unwrap();
        for n in 1..=10 {
            let city = if n % 3 == 0 { "Kazan" } else { "Moskva" };
            _ = svc
                .execute(create_advert(city, "Elektronika"))
                .await
                .unwrap();
        }
        svc.execute(DeleteAdvert {
            advert_id: 4_u64.into(),
            initiator_id: 1_u64.into(),
        })
        .await
        .unwrap();

        let mut seen = HashSet::new();
        let mut start = advert::Id::FIRST;
        loop {
            let page = svc.execute(by_city("Moscow", start, 2)).await.unwrap();
            assert!(page.edges.len() <= 2);
            for edge in &page.edges {
                assert!(edge.cursor >= start);
                assert!(seen.insert(edge.cursor));
            }
            let Some(last) = page.page_info().end_cursor else {
                break;
            };
            if !page.has_more {
                break;
            }
            start = (u64::from(last) + 1).into();
        }

        let expected = [1_u64, 2, 5, 7, 8, 10]
            .into_iter()
            .map(advert::Id::from)
            .collect::<HashSet<_>>();
        assert_eq!(seen, expected);

        // A short tail page is not an error.
        let page = svc
            .execute(by_city("Moskva", 10_u64.into(), 50))
            .await
            .unwrap();
        assert_eq!(page.edges.len(), 1);
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn bounds_page_size() {
        let svc = seeded().await;
        _ = listed_advert(&svc).await;

        let page = svc
            .execute(by_city("Moskva", advert::Id::FIRST, 0))
            .await
            .unwrap();
        assert!(page.edges.is_empty());

        let err = svc
            .execute(by_city("Moskva", advert::Id::FIRST, 101))
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::TooManyRequested(101)));

        let err = svc
            .execute(by_city("Paris", advert::Id::FIRST, 1))
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::UnknownCity(_)));
    }

    #[tokio::test]
    async fn lists_everything_when_page_size_is_unbounded() {
        let svc = Service::new(
            Config {
                jwt_decoding_key: DecodingKey::from_secret(SECRET),
                max_page_size: usize::MAX,
            },
            Memory::new(),
        );
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
        for _ in 0..3 {
            _ = listed_advert(&svc).await;
        }

        let page = svc
            .execute(by_city("Moskva", advert::Id::FIRST, usize::MAX))
            .await
            .unwrap();
        assert_eq!(page.edges.len(), 3);
        assert!(!page.has_more);
    }
}
