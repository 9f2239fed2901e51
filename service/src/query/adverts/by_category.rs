//! [`ByCategory`] definition.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::{domain::Advert, Config};
use crate::{
    domain::{category, city, Category, City},
    infra::{database, Database},
    read::advert::list,
    Query, Service,
};

/// [`Query`] listing [`Advert`]s of a [`Category`] located in a [`City`].
#[derive(Clone, Debug)]
pub struct ByCategory {
    /// [`category::Key`] of the [`Category`] to list [`Advert`]s of.
    pub category: category::Key,

    /// [`city::Key`] of the [`City`] to list [`Advert`]s in.
    pub city: city::Key,

    /// [`list::Arguments`] of the requested page.
    pub arguments: list::Arguments,
}

impl<Db> Query<ByCategory> for Service<Db>
where
    Db: Database<
            Select<By<Option<City>, city::Key>>,
            Ok = Option<City>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Category>, category::Key>>,
            Ok = Option<Category>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<list::Page, list::Selector>>,
            Ok = list::Page,
            Err = Traced<database::Error>,
        >,
{
    type Ok = list::Page;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: ByCategory) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ByCategory {
            category,
            city,
            arguments,
        } = query;

        if arguments.limit() > self.config().max_page_size {
            return Err(tracerr::new!(E::TooManyRequested(arguments.limit())));
        }

        let category = self
            .database()
            .execute(Select(By::<Option<Category>, _>::new(category.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UnknownCategory(category))
            .map_err(tracerr::wrap!())?;

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
                    category_id: Some(category.id),
                },
            })))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`ByCategory`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Requested page exceeds [`Config::max_page_size`].
    #[display("Cannot list {_0} `Advert`s at once")]
    TooManyRequested(#[error(not(source))] usize),

    /// No [`Category`] is addressed by the provided [`category::Key`].
    #[display("`Category(key: {_0})` does not exist")]
    UnknownCategory(#[error(not(source))] category::Key),

    /// No [`City`] is addressed by the provided [`city::Key`].
    #[display("`City(key: {_0})` does not exist")]
    UnknownCity(#[error(not(source))] city::Key),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::CreateCategory,
        domain::{advert, category, city},
        read::advert::list::Arguments,
        test_util::{create_advert, seeded},
        Command as _, Query as _,
    };

    use super::{ByCategory, ExecutionError};

    fn by_category(category: &str, count: usize) -> ByCategory {
        ByCategory {
            category: category::Key::new(category).unwrap(),
            city: city::Key::new("Moskva").unwrap(),
            arguments: Arguments {
                start: advert::Id::FIRST,
                count,
            },
        }
    }

    #[tokio::test]
    async fn filters_by_category_and_city() {
        let svc = seeded().await;
        _ = svc
            .execute(CreateCategory {
                name: category::Name::new("Books").unwrap(),
                translation: category::Translation::new("Knigi").unwrap(),
            })
            .await
            .unwrap();
        for category in ["Knigi", "Elektronika", "Books"] {
            _ = svc
                .execute(create_advert("Moskva", category))
                .await
                .unwrap();
        }

        let page = svc.execute(by_category("Knigi", 10)).await.unwrap();
        let ids = page
            .into_nodes()
            .into_iter()
            .map(|a| u64::from(a.id))
            .collect::<Vec<_>>();
        assert_eq!(ids, [1, 3]);

        let page = svc.execute(by_category("Knigi", 1)).await.unwrap();
        assert!(page.has_more);
        assert_eq!(page.edges.len(), 1);
    }

    #[tokio::test]
    async fn rejects_unknown_category() {
        let svc = seeded().await;

        let err = svc.execute(by_category("Cars", 1)).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::UnknownCategory(_)));
    }
}
