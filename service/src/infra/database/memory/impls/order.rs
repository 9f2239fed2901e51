//! [`Order`]-related [`Database`] implementations.

use std::collections::BTreeMap;

use common::operations::{By, Insert, Lock, Select};
use tracerr::Traced;

use crate::{
    domain::{order, user, Order},
    infra::{
        database::{
            self,
            memory::{self, next_id, Connection, Tx},
            Memory,
        },
        Database,
    },
};

/// Book of [`Order`]s ordered by their IDs.
#[derive(Debug, Default)]
pub struct Orders(BTreeMap<order::Id, Order>);

#[cfg(test)]
impl Orders {
    /// Puts the provided [`Order`] into this book as is.
    pub(crate) fn put(&mut self, order: Order) {
        drop(self.0.insert(order.id, order));
    }
}

/// Inserts all the [`order::Draft`]s at once, or none of them if there are
/// not enough IDs left.
impl<C> Database<Insert<Vec<order::Draft>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<Order>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(drafts): Insert<Vec<order::Draft>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|Orders(orders): &mut Orders| {
            let last = orders.last_key_value().map(|(id, _)| *id);
            (0..drafts.len())
                .try_fold(Vec::with_capacity(drafts.len()), |mut ids, _| {
                    let id = next_id(ids.last().copied().or(last), "Order")?;
                    ids.push(id);
                    Ok::<_, memory::Error>(ids)
                })
                .map(|ids| {
                    drafts
                        .into_iter()
                        .zip(ids)
                        .map(|(draft, id)| {
                            let order = draft.into_order(id);
                            drop(orders.insert(id, order.clone()));
                            order
                        })
                        .collect()
                })
        })
        .await
        .map_err(tracerr::from_and_wrap!(=> database::Error))
    }
}

impl<C> Database<Select<By<Vec<Order>, user::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<Order>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Order>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let user_id = by.into_inner();
        Ok(self
            .read(|Orders(orders): &Orders| {
                orders
                    .values()
                    .filter(|o| o.user_id == user_id)
                    .cloned()
                    .collect()
            })
            .await)
    }
}

impl Database<Lock<By<Order, user::Id>>> for Memory<Tx> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Order, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|_: &mut Orders| ()).await;
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{By, Insert, Select},
        DateTime,
    };

    use crate::{
        domain::{advert, order, user, Order},
        infra::{
            database::{self, memory::Connection as _},
            memory, Database as _, Memory,
        },
    };

    use super::Orders;

    fn draft() -> order::Draft {
        order::Draft {
            user_id: 1_u64.into(),
            advert_id: 1_u64.into(),
            phone: user::Phone::new("+380991234567").unwrap(),
            name: order::RecipientName::new("Ivan").unwrap(),
            email: None,
            address: order::Address::new("Lenina 1").unwrap(),
            delivery_price: 50_u64.into(),
            title: advert::Title::new("Phone").unwrap(),
            price: 100_u64.into(),
            created_at: DateTime::now().coerce(),
        }
    }

    #[tokio::test]
    async fn issues_sequential_ids() {
        let db = Memory::new();

        let orders = db.execute(Insert(vec![draft(), draft()])).await.unwrap();
        let more = db.execute(Insert(vec![draft()])).await.unwrap();

        let ids = orders
            .iter()
            .chain(&more)
            .map(|o| u64::from(o.id))
            .collect::<Vec<_>>();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[tokio::test]
    async fn inserts_nothing_when_ids_run_out() {
        let db = Memory::new();
        let last = order::Id::from(u64::MAX - 1);
        db.write(|orders: &mut Orders| orders.put(draft().into_order(last)))
            .await;

        let err = db
            .execute(Insert(vec![draft(), draft()]))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            database::Error::Memory(memory::Error::IdOverflow(_)),
        ));
        let stored = db
            .execute(Select(By::<Vec<Order>, _>::new(user::Id::from(1_u64))))
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);

        let orders = db.execute(Insert(vec![draft()])).await.unwrap();
        assert_eq!(u64::from(orders[0].id), u64::MAX);
    }
}
