//! [`Command`] for editing an [`Advert`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{City, Category};
use crate::{
    domain::{advert, user, Advert},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for editing an [`Advert`].
///
/// Re-lists a closed [`Advert`], but never resurrects a deleted one. The
/// [`City`] and [`Category`] of an [`Advert`] cannot be edited.
#[derive(Clone, Debug)]
pub struct EditAdvert {
    /// ID of the [`Advert`] to be edited.
    pub advert_id: advert::Id,

    /// ID of the user who edits the [`Advert`].
    pub initiator_id: user::Id,

    /// New [`advert::Title`] of the [`Advert`].
    pub title: advert::Title,

    /// New [`advert::Description`] of the [`Advert`].
    pub description: advert::Description,

    /// New [`advert::Price`] of the [`Advert`].
    pub price: advert::Price,

    /// New indicator whether the item of the [`Advert`] is second-hand.
    pub is_used: bool,
}

impl<Db> Command<EditAdvert> for Service<Db>
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

    async fn execute(&self, cmd: EditAdvert) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let EditAdvert {
            advert_id,
            initiator_id,
            title,
            description,
            price,
            is_used,
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

        let advert = tx
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

        let advert = Advert {
            title,
            description,
            price,
            is_used,
            closed_at: None,
            ..advert
        };

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

/// Error of [`EditAdvert`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
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
        /// ID of the [`Advert`] to be edited.
        advert_id: advert::Id,

        /// ID of the user who tried to edit the [`Advert`].
        initiator_id: user::Id,
    },
}
