//! [`ByPath`] definition.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{advert, category, city, Advert, Category, City},
    infra::{database, Database},
    Query, Service,
};

/// [`Query`] retrieving an [`Advert`] by its public path, consisting of a
/// [`City`], a [`Category`] and an ID.
///
/// Both the [`City`] and the [`Category`] must agree with the ones of the
/// [`Advert`], regardless of the ID.
#[derive(Clone, Debug)]
pub struct ByPath {
    /// ID of the [`Advert`] to retrieve.
    pub advert_id: advert::Id,

    /// [`city::Key`] of the [`City`] the [`Advert`] is expected in.
    pub city: city::Key,

    /// [`category::Key`] of the [`Category`] the [`Advert`] is expected
    /// under.
    pub category: category::Key,
}

impl<Db> Query<ByPath> for Service<Db>
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
            Select<By<Option<Advert>, advert::Id>>,
            Ok = Option<Advert>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Advert;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: ByPath) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ByPath {
            advert_id,
            city,
            category,
        } = query;

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

        let advert = self
            .database()
            .execute(Select(By::<Option<Advert>, _>::new(advert_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|a| !a.is_deleted())
            .ok_or(E::AdvertNotExists(advert_id))
            .map_err(tracerr::wrap!())?;

        if advert.city_id != city.id {
            return Err(tracerr::new!(E::CityMismatch {
                advert_id,
                city_id: city.id,
            }));
        }
        if advert.category_id != category.id {
            return Err(tracerr::new!(E::CategoryMismatch {
                advert_id,
                category_id: category.id,
            }));
        }

        Ok(advert)
    }
}

/// Error of [`ByPath`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Advert`] with the provided ID does not exist or is deleted.
    #[display("`Advert(id: {_0})` does not exist")]
    AdvertNotExists(#[error(not(source))] advert::Id),

    /// [`Advert`] is not classified under the requested [`Category`].
    #[display(
        "`Advert(id: {advert_id})` is not under `Category(id: {category_id})`"
    )]
    CategoryMismatch {
        /// ID of the requested [`Advert`].
        advert_id: advert::Id,

        /// ID of the requested [`Category`].
        category_id: category::Id,
    },

    /// [`Advert`] is not located in the requested [`City`].
    #[display("`Advert(id: {advert_id})` is not in `City(id: {city_id})`")]
    CityMismatch {
        /// ID of the requested [`Advert`].
        advert_id: advert::Id,

        /// ID of the requested [`City`].
        city_id: city::Id,
    },

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
    use crate::{
        command::{CreateCategory, CreateCity},
        domain::{category, city},
        test_util::{listed_advert, seeded},
        Command as _, Query as _,
    };

    use super::{ByPath, ExecutionError};

    fn path(id: u64, city: &str, category: &str) -> ByPath {
        ByPath {
            advert_id: id.into(),
            city: city::Key::new(city).unwrap(),
            category: category::Key::new(category).unwrap(),
        }
    }

    #[tokio::test]
    async fn requires_matching_taxonomy() {
        let svc = seeded().await;
        let created = listed_advert(&svc).await;
        _ = svc
            .execute(CreateCity {
                name: city::Name::new("Kazan").unwrap(),
                translation: city::Translation::new("Kazan").unwrap(),
            })
            .await
            .unwrap();
        _ = svc
            .execute(CreateCategory {
                name: category::Name::new("Books").unwrap(),
                translation: category::Translation::new("Knigi").unwrap(),
            })
            .await
            .unwrap();

        let found = svc.execute(path(1, "Moscow", "Elektronika")).await;
        assert_eq!(found.unwrap(), created);

        let err = svc
            .execute(path(1, "Kazan", "Elektronika"))
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::CityMismatch { .. }));

        let err = svc.execute(path(1, "Moskva", "Books")).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::CategoryMismatch { .. },
        ));

        let err = svc
            .execute(path(2, "Moskva", "Electronics"))
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::AdvertNotExists(_)));

        let err = svc.execute(path(1, "Paris", "Books")).await.unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::UnknownCity(_)));
    }
}
