//! [`Command`] for closing an [`Advert`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{advert, user, Advert},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for closing an [`Advert`], so it is no longer listed.
///
/// Closing is reversible by an [`EditAdvert`].
///
/// [`EditAdvert`]: super::EditAdvert
#[derive(Clone, Copy, Debug)]
pub struct CloseAdvert {
    /// ID of the [`Advert`] to be closed.
    pub advert_id: advert::Id,

    /// ID of the user who closes the [`Advert`].
    pub initiator_id: user::Id,
}

impl<Db> Command<CloseAdvert> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Advert, advert::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Advert>, advert::Id>>,
            Ok = Option<Advert>,
            Err = Traced<database::Error>,
        > + Database<Update<Advert>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Advert;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CloseAdvert) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CloseAdvert {
            advert_id,
            initiator_id,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent lifecycle transitions.
        tx.execute(Lock(By::new(advert_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut advert = tx
            .execute(Select(By::<Option<Advert>, _>::new(advert_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|a| !a.is_deleted())
            .ok_or(E::AdvertNotExists(advert_id))
            .map_err(tracerr::wrap!())?;

        if advert.user_id != initiator_id {
            return Err(tracerr::new!(E::Forbidden {
                advert_id,
                initiator_id,
            }));
        }
        if advert.closed_at.is_some() {
            return Err(tracerr::new!(E::AdvertAlreadyClosed(advert_id)));
        }

        advert.closed_at = Some(DateTime::now().coerce());

        tx.execute(Update(advert.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(advert)
    }
}

/// Error of [`CloseAdvert`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Advert`] is closed already.
    #[display("`Advert(id: {_0})` is already closed")]
    AdvertAlreadyClosed(#[error(not(source))] advert::Id),

    /// [`Advert`] with the provided ID does not exist or is deleted.
    #[display("`Advert(id: {_0})` does not exist")]
    AdvertNotExists(#[error(not(source))] advert::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Initiator doesn't own the [`Advert`].
    #[display("`User(id: {initiator_id})` doesn't own `Advert(id: {advert_id})`")]
    Forbidden {
        /// ID of the [`Advert`] to be closed.
        advert_id: advert::Id,

        /// ID of the user who tried to close the [`Advert`].
        initiator_id: user::Id,
    },
}

#[cfg(test)]
mod spec {
    use crate::{
        command::CloseAdvert,
        query::advert,
        test_util::{by_city, listed_advert, seeded},
        Command as _, Query as _,
    };

    use super::ExecutionError;

    #[tokio::test]
    async fn closes_only_once() {
        let svc = seeded().await;
        let created = listed_advert(&svc).await;
        let cmd = CloseAdvert {
            advert_id: created.id,
            initiator_id: created.user_id,
        };

        let closed = svc.execute(cmd).await.unwrap();
        assert!(closed.closed_at.is_some());
        assert!(!closed.is_listed());

        let err = svc.execute(cmd).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::AdvertAlreadyClosed(id) if *id == created.id,
        ));

        // Closed adverts are still retrievable by their IDs.
        let found = svc.execute(advert::ById::by(created.id)).await.unwrap();
        assert_eq!(found, closed);

        let page = svc
            .execute(by_city("Moskva", created.id, 10))
            .await
            .unwrap();
        assert!(page.edges.is_empty());
    }

    #[tokio::test]
    async fn rejects_foreign_initiator() {
        let svc = seeded().await;
        let created = listed_advert(&svc).await;

        let err = svc
            .execute(CloseAdvert {
                advert_id: created.id,
                initiator_id: 2_u64.into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn rejects_unissued_advert() {
        let svc = seeded().await;

        for id in [0_u64, 1] {
            let err = svc
                .execute(CloseAdvert {
                    advert_id: id.into(),
                    initiator_id: 1_u64.into(),
                })
                .await
                .unwrap_err();

            assert!(matches!(
                err.as_ref(),
                ExecutionError::AdvertNotExists(_),
            ));
        }
    }
}
