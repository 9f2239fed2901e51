//! [`Command`] for toggling a [`cart::Item`].

use common::operations::{
    By, Commit, Delete, Insert, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{advert, cart, user, Advert},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for toggling an [`Advert`] in a [`cart::List`] of a user.
///
/// Removes the [`cart::Item`] if it's present already, or adds it
/// otherwise. So, executing it twice leaves the [`cart::List`] untouched.
#[derive(Clone, Copy, Debug)]
pub struct ToggleCartItem {
    /// ID of the user owning the [`cart::List`].
    pub user_id: user::Id,

    /// ID of the [`Advert`] to be toggled.
    pub advert_id: advert::Id,

    /// [`cart::List`] to toggle the [`Advert`] in.
    pub list: cart::List,
}

impl<Db> Command<ToggleCartItem> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<cart::Item, user::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::cart::Contains, cart::Item>>,
            Ok = read::cart::Contains,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Advert>, advert::Id>>,
            Ok = Option<Advert>,
            Err = Traced<database::Error>,
        > + Database<Insert<cart::Item>, Err = Traced<database::Error>>
        + Database<Delete<cart::Item>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    /// Indicator whether the [`cart::Item`] has been added.
    type Ok = bool;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ToggleCartItem,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ToggleCartItem {
            user_id,
            advert_id,
            list,
        } = cmd;
        let item = cart::Item {
            user_id,
            advert_id,
            list,
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent toggles of the same `cart::Item`.
        tx.execute(Lock(By::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let contains = tx
            .execute(Select(By::<read::cart::Contains, _>::new(item)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let added = if *contains {
            tx.execute(Delete(item))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
            false
        } else {
            drop(
                tx.execute(Select(By::<Option<Advert>, _>::new(advert_id)))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                    .filter(|a| !a.is_deleted())
                    .ok_or(E::AdvertNotExists(advert_id))
                    .map_err(tracerr::wrap!())?,
            );

            tx.execute(Insert(item))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
            true
        };

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(added)
    }
}

/// Error of [`ToggleCartItem`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Advert`] with the provided ID does not exist or is deleted.
    #[display("`Advert(id: {_0})` does not exist")]
    AdvertNotExists(#[error(not(source))] advert::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{advert, cart, Advert},
        query,
        test_util::{listed_advert, seeded},
        Command as _, Query as _,
    };

    use super::{ExecutionError, ToggleCartItem};

    fn toggle(advert: &Advert, list: cart::List) -> ToggleCartItem {
        ToggleCartItem {
            user_id: 1_u64.into(),
            advert_id: advert.id,
            list,
        }
    }

    #[tokio::test]
    async fn second_toggle_undoes_first() {
        let svc = seeded().await;
        let advert = listed_advert(&svc).await;

        let added = svc.execute(toggle(&advert, cart::List::Cart)).await;
        let removed = svc.execute(toggle(&advert, cart::List::Cart)).await;

        assert!(added.unwrap());
        assert!(!removed.unwrap());

        let items = svc
            .execute(query::cart::ByUser {
                user_id: 1_u64.into(),
                list: cart::List::Cart,
            })
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn lists_are_independent() {
        let svc = seeded().await;
        let advert = listed_advert(&svc).await;

        assert!(svc
            .execute(toggle(&advert, cart::List::Favourites))
            .await
            .unwrap());
        assert!(svc
            .execute(toggle(&advert, cart::List::Cart))
            .await
            .unwrap());

        for list in [cart::List::Cart, cart::List::Favourites] {
            let items = svc
                .execute(query::cart::ByUser {
                    user_id: 1_u64.into(),
                    list,
                })
                .await
                .unwrap();
            assert_eq!(items, [advert.clone()]);
        }
    }

    #[tokio::test]
    async fn rejects_unissued_advert() {
        let svc = seeded().await;

        let err = svc
            .execute(ToggleCartItem {
                user_id: 1_u64.into(),
                advert_id: advert::Id::FIRST,
                list: cart::List::Cart,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::AdvertNotExists(_)));
    }
}
