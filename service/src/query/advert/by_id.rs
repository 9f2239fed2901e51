//! [`ById`] definition.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{advert, Advert},
    infra::{database, Database},
    Query, Service,
};

/// [`Query`] retrieving an [`Advert`] by its ID.
///
/// Closed [`Advert`]s are retrievable, while deleted ones are not.
#[derive(Clone, Copy, Debug)]
pub struct ById {
    /// ID of the [`Advert`] to retrieve.
    pub advert_id: advert::Id,
}

impl ById {
    /// Creates a new [`ById`] [`Query`] retrieving the [`Advert`] with the
    /// provided ID.
    #[must_use]
    pub fn by(advert_id: advert::Id) -> Self {
        Self { advert_id }
    }
}

impl<Db> Query<ById> for Service<Db>
where
    Db: Database<
        Select<By<Option<Advert>, advert::Id>>,
        Ok = Option<Advert>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Advert;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        ById { advert_id }: ById,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        self.database()
            .execute(Select(By::<Option<Advert>, _>::new(advert_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|a| !a.is_deleted())
            .ok_or(E::AdvertNotExists(advert_id))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`ById`] [`Query`] execution.
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
        domain::advert,
        test_util::{listed_advert, seeded},
        Query as _,
    };

    use super::{ById, ExecutionError};

    #[tokio::test]
    async fn misses_unissued_ids() {
        let svc = seeded().await;
        let created = listed_advert(&svc).await;

        let found = svc.execute(ById::by(advert::Id::FIRST)).await.unwrap();
        assert_eq!(found, created);

        for id in [0_u64, 2, u64::MAX] {
            let err = svc.execute(ById::by(id.into())).await.unwrap_err();
            assert!(matches!(
                err.as_ref(),
                ExecutionError::AdvertNotExists(m) if u64::from(*m) == id,
            ));
        }
    }
}
