//! [`cart::Item`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select};
use tracerr::Traced;

use crate::{
    domain::{cart, user},
    infra::{
        database::{
            self,
            memory::{Connection, Tx},
            Memory,
        },
        Database,
    },
    read,
};

/// Ledger of [`cart::Item`]s in insertion order.
#[derive(Debug, Default)]
pub struct Cart(Vec<cart::Item>);

impl<C> Database<Select<By<Vec<cart::Item>, (user::Id, cart::List)>>>
    for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<cart::Item>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<cart::Item>, (user::Id, cart::List)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (user_id, list) = by.into_inner();
        Ok(self
            .read(|Cart(items): &Cart| {
                items
                    .iter()
                    .filter(|i| i.user_id == user_id && i.list == list)
                    .copied()
                    .collect()
            })
            .await)
    }
}

impl<C> Database<Select<By<read::cart::Contains, cart::Item>>> for Memory<C>
where
    C: Connection,
{
    type Ok = read::cart::Contains;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::cart::Contains, cart::Item>>,
    ) -> Result<Self::Ok, Self::Err> {
        let item = by.into_inner();
        Ok(read::cart::Contains(
            self.read(|Cart(items): &Cart| items.contains(&item)).await,
        ))
    }
}

impl<C> Database<Insert<cart::Item>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(item): Insert<cart::Item>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|Cart(items): &mut Cart| {
            if !items.contains(&item) {
                items.push(item);
            }
        })
        .await;
        Ok(())
    }
}

impl<C> Database<Delete<cart::Item>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(item): Delete<cart::Item>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|Cart(items): &mut Cart| items.retain(|i| *i != item))
            .await;
        Ok(())
    }
}

impl Database<Lock<By<cart::Item, user::Id>>> for Memory<Tx> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<cart::Item, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // No per-user locks, so the whole ledger is locked.
        self.write(|_: &mut Cart| ()).await;
        Ok(())
    }
}
