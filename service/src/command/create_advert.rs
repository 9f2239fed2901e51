//! [`Command`] for creating a new [`Advert`].

use common::{
    operations::{By, Insert, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{advert, category, city, user, Advert, Category, City},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Advert`].
#[derive(Clone, Debug)]
pub struct CreateAdvert {
    /// ID of the user who creates the [`Advert`].
    pub user_id: user::Id,

    /// [`city::Key`] of the [`City`] the new [`Advert`] is located in.
    pub city: city::Key,

    /// [`category::Key`] of the [`Category`] the new [`Advert`] is
    /// classified under.
    pub category: category::Key,

    /// [`advert::Title`] of the new [`Advert`].
    pub title: advert::Title,

    /// [`advert::Description`] of the new [`Advert`].
    pub description: advert::Description,

    /// [`advert::Price`] of the new [`Advert`].
    pub price: advert::Price,

    /// Indicator whether the item of the new [`Advert`] is second-hand.
    pub is_used: bool,
}

impl<Db> Command<CreateAdvert> for Service<Db>
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
            Insert<advert::Draft>,
            Ok = Advert,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Advert;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateAdvert) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateAdvert {
            user_id,
            city,
            category,
            title,
            description,
            price,
            is_used,
        } = cmd;

        let city = self
            .database()
            .execute(Select(By::<Option<City>, _>::new(city.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UnknownCity(city))
            .map_err(tracerr::wrap!())?;

        let category = self
            .database()
            .execute(Select(By::<Option<Category>, _>::new(category.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UnknownCategory(category))
            .map_err(tracerr::wrap!())?;

        // ID is issued under the catalog's exclusive lock, so concurrent
        // creations never observe the same one.
        self.database()
            .execute(Insert(advert::Draft {
                user_id,
                city_id: city.id,
                category_id: category.id,
                title,
                description,
                price,
                is_used,
                created_at: DateTime::now().coerce(),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`CreateAdvert`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// No [`Category`] is addressed by the provided [`category::Key`].
    #[display("`Category(key: {_0})` does not exist")]
    UnknownCategory(#[error(not(source))] category::Key),

    /// No [`City`] is addressed by the provided [`city::Key`].
    #[display("`City(key: {_0})` does not exist")]
    UnknownCity(#[error(not(source))] city::Key),
}

#[cfg(test)]
mod spec {
    use std::collections::HashSet;

    use futures::future;

    use crate::{
        domain::advert,
        test_util::{create_advert as create, listed_advert, seeded},
        Command as _,
    };

    use super::ExecutionError;

    #[tokio::test]
    async fn resolves_taxonomy_by_name_or_translation() {
        let svc = seeded().await;

        let advert = svc
            .execute(create("Moskva", "Electronics"))
            .await
            .unwrap();

        assert_eq!(advert.id, advert::Id::FIRST);
        assert_eq!(advert.city_id, 1_u64.into());
        assert_eq!(advert.category_id, 1_u64.into());
        assert!(advert.is_listed());
    }

    #[tokio::test]
    async fn fails_on_unknown_taxonomy() {
        let svc = seeded().await;

        let err = svc.execute(create("Paris", "Elektronika")).await;
        assert!(matches!(
            err.unwrap_err().as_ref(),
            ExecutionError::UnknownCity(_),
        ));

        let err = svc.execute(create("Moscow", "Books")).await;
        assert!(matches!(
            err.unwrap_err().as_ref(),
            ExecutionError::UnknownCategory(_),
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_creations_issue_dense_ids() {
        const N: u64 = 200;

        let svc = seeded().await;

        let tasks = (0..N).map(|_| {
            let svc = svc.clone();
            tokio::spawn(async move { listed_advert(&svc).await.id })
        });
        let ids = future::join_all(tasks)
            .await
            .into_iter()
            .map(|id| u64::from(id.unwrap()))
            .collect::<HashSet<_>>();

        assert_eq!(ids, (1..=N).collect());
    }
}
