//! [`Command`] for removing a [`cart::Item`].

use common::operations::{
    By, Commit, Delete, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Advert;
use crate::{
    domain::{advert, cart, user},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for removing an [`Advert`] from a [`cart::List`] of a user.
#[derive(Clone, Copy, Debug)]
pub struct RemoveCartItem {
    /// ID of the user owning the [`cart::List`].
    pub user_id: user::Id,

    /// ID of the [`Advert`] to be removed.
    pub advert_id: advert::Id,

    /// [`cart::List`] to remove the [`Advert`] from.
    pub list: cart::List,
}

impl<Db> Command<RemoveCartItem> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<cart::Item, user::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::cart::Contains, cart::Item>>,
            Ok = read::cart::Contains,
            Err = Traced<database::Error>,
        > + Database<Delete<cart::Item>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RemoveCartItem,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RemoveCartItem {
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

        tx.execute(Lock(By::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let contains = tx
            .execute(Select(By::<read::cart::Contains, _>::new(item)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !*contains {
            return Err(tracerr::new!(E::NotInCart(advert_id)));
        }

        tx.execute(Delete(item))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)
    }
}

/// Error of [`RemoveCartItem`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Advert`] is not present in the [`cart::List`].
    #[display("`Advert(id: {_0})` is not in the list")]
    NotInCart(#[error(not(source))] advert::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::ToggleCartItem,
        domain::cart,
        test_util::{listed_advert, seeded},
        Command as _,
    };

    use super::{ExecutionError, RemoveCartItem};

    #[tokio::test]
    async fn removes_only_present_items() {
        let svc = seeded().await;
        let advert = listed_advert(&svc).await;
        let remove = RemoveCartItem {
            user_id: 1_u64.into(),
            advert_id: advert.id,
            list: cart::List::Cart,
        };

        let err = svc.execute(remove).await.unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::NotInCart(_)));

        assert!(svc
            .execute(ToggleCartItem {
                user_id: 1_u64.into(),
                advert_id: advert.id,
                list: cart::List::Cart,
            })
            .await
            .unwrap());

        svc.execute(remove).await.unwrap();

        let err = svc.execute(remove).await.unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::NotInCart(_)));
    }
}
