//! [`Advert`]-related [`Database`] implementations.

use std::collections::{BTreeMap, HashMap};

use common::operations::{By, Insert, Lock, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{advert, Advert},
    infra::{
        database::{
            self,
            memory::{next_id, Connection, Tx},
            Memory,
        },
        Database,
    },
    read,
};

/// Catalog of [`Advert`]s ordered by their IDs.
#[derive(Debug, Default)]
pub struct Adverts(BTreeMap<advert::Id, Advert>);

impl<C> Database<Insert<advert::Draft>> for Memory<C>
where
    C: Connection,
{
    type Ok = Advert;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<advert::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|Adverts(adverts): &mut Adverts| {
            let last = adverts.last_key_value().map(|(id, _)| *id);
            next_id(last, "Advert").map(|id| {
                let advert = draft.into_advert(id);
                drop(adverts.insert(id, advert.clone()));
                advert
            })
        })
        .await
        .map_err(tracerr::from_and_wrap!(=> database::Error))
    }
}

impl<C, IDs> Database<Select<By<HashMap<advert::Id, Advert>, IDs>>>
    for Memory<C>
where
    C: Connection,
    IDs: AsRef<[advert::Id]>,
{
    type Ok = HashMap<advert::Id, Advert>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<advert::Id, Advert>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        Ok(self
            .read(|Adverts(adverts): &Adverts| {
                ids.as_ref()
                    .iter()
                    .filter_map(|id| Some((*id, adverts.get(id)?.clone())))
                    .collect()
            })
            .await)
    }
}

impl<C> Database<Select<By<Option<Advert>, advert::Id>>> for Memory<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<advert::Id, Advert>, [advert::Id; 1]>>,
        Ok = HashMap<advert::Id, Advert>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Advert>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Advert>, advert::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::new([id])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&id))
    }
}

impl<C>
    Database<
        Select<By<read::advert::list::Page, read::advert::list::Selector>>,
    > for Memory<C>
where
    C: Connection,
{
    type Ok = read::advert::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::advert::list::Page, read::advert::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::advert::list::Selector { arguments, filter } =
            by.into_inner();
        if arguments.limit() == 0 {
            return Ok(read::advert::list::Page::empty());
        }

        Ok(self
            .read(|Adverts(adverts): &Adverts| {
                // One extra node tells whether the page is the last one.
                let mut edges = adverts
                    .range(arguments.start..)
                    .filter(|(_, advert)| filter.matches(advert))
                    .map(|(id, advert)| (*id, advert.clone()))
                    .take(arguments.limit().saturating_add(1))
                    .collect::<Vec<_>>();
                let has_more = edges.len() > arguments.limit();
                edges.truncate(arguments.limit());
                read::advert::list::Page::new(edges, has_more)
            })
            .await)
    }
}

impl<C> Database<Update<Advert>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(advert): Update<Advert>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|Adverts(adverts): &mut Adverts| {
            drop(adverts.insert(advert.id, advert));
        })
        .await;
        Ok(())
    }
}

impl Database<Lock<By<Advert, advert::Id>>> for Memory<Tx> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Advert, advert::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // No per-record locks, so the whole catalog is locked.
        self.write(|_: &mut Adverts| ()).await;
        Ok(())
    }
}
