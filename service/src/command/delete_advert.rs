//! [`Command`] for deleting an [`Advert`].

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

/// [`Command`] for deleting an [`Advert`].
///
/// Deletion is terminal: a deleted [`Advert`] is never listed, never
/// retrievable and cannot be closed, edited or deleted again.
#[derive(Clone, Copy, Debug)]
pub struct DeleteAdvert {
    /// ID of the [`Advert`] to be deleted.
    pub advert_id: advert::Id,

    /// ID of the user who deletes the [`Advert`].
    pub initiator_id: user::Id,
}

impl<Db> Command<DeleteAdvert> for Service<Db>
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
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteAdvert) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteAdvert {
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

        advert.deleted_at = Some(DateTime::now().coerce());

        tx.execute(Update(advert))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)
    }
}

/// Error of [`DeleteAdvert`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Advert`] with the provided ID does not exist or is deleted already.
    #[display("`Advert(id: {_0})` does not exist")]
    AdvertNotExists(#[error(not(source))] advert::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Initiator doesn't own the [`Advert`].
    #[display("`User(id: {initiator_id})` doesn't own `Advert(id: {advert_id})`")]
    Forbidden {
        /// ID of the [`Advert`] to be deleted.
        advert_id: advert::Id,

        /// ID of the user who tried to delete the [`Advert`].
        initiator_id: user::Id,
    },
}
