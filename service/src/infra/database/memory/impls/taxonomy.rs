//! [`City`] and [`Category`] registries.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{category, city, Category, City},
    infra::{
        database::{
            self,
            memory::{next_id, Connection},
            Memory,
        },
        Database,
    },
};

/// Append-only registry of [`City`]s in insertion order.
#[derive(Debug, Default)]
pub struct Cities(Vec<City>);

/// Append-only registry of [`Category`]s in insertion order.
#[derive(Debug, Default)]
pub struct Categories(Vec<Category>);

impl<C> Database<Insert<city::Draft>> for Memory<C>
where
    C: Connection,
{
    type Ok = City;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<city::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|Cities(cities): &mut Cities| {
            next_id(cities.last().map(|c| c.id), "City").map(|id| {
                let city = draft.into_city(id);
                cities.push(city.clone());
                city
            })
        })
        .await
        .map_err(tracerr::from_and_wrap!(=> database::Error))
    }
}

impl<C> Database<Select<By<Option<City>, city::Key>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Option<City>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<City>, city::Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        let key = by.into_inner();
        Ok(self
            .read(|Cities(cities): &Cities| {
                cities.iter().find(|c| c.is_addressed_by(&key)).cloned()
            })
            .await)
    }
}

impl<C> Database<Select<By<Vec<City>, ()>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<City>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<City>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.read(|Cities(cities): &Cities| cities.clone()).await)
    }
}

impl<C> Database<Insert<category::Draft>> for Memory<C>
where
    C: Connection,
{
    type Ok = Category;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<category::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|Categories(categories): &mut Categories| {
            next_id(categories.last().map(|c| c.id), "Category").map(|id| {
                let category = draft.into_category(id);
                categories.push(category.clone());
                category
            })
        })
        .await
        .map_err(tracerr::from_and_wrap!(=> database::Error))
    }
}

impl<C> Database<Select<By<Option<Category>, category::Key>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Option<Category>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Category>, category::Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        let key = by.into_inner();
        Ok(self
            .read(|Categories(categories): &Categories| {
                categories
                    .iter()
                    .find(|c| c.is_addressed_by(&key))
                    .cloned()
            })
            .await)
    }
}

impl<C> Database<Select<By<Vec<Category>, ()>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<Category>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Category>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .read(|Categories(categories): &Categories| categories.clone())
            .await)
    }
}
