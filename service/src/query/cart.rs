//! [`Query`] collection related to a [`cart::List`].

use std::collections::HashMap;

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{advert, cart, user, Advert},
    infra::{database, Database},
    Query, Service,
};

/// [`Query`] listing [`Advert`]s in a [`cart::List`] of a user, in the order
/// they were added.
///
/// Fails as a whole if any of the [`Advert`]s is deleted or missing.
#[derive(Clone, Copy, Debug)]
pub struct ByUser {
    /// ID of the user owning the [`cart::List`].
    pub user_id: user::Id,

    /// [`cart::List`] to list.
    pub list: cart::List,
}

impl<Db> Query<ByUser> for Service<Db>
where
    Db: Database<
            Select<By<Vec<cart::Item>, (user::Id, cart::List)>>,
            Ok = Vec<cart::Item>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<HashMap<advert::Id, Advert>, Vec<advert::Id>>>,
            Ok = HashMap<advert::Id, Advert>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Vec<Advert>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: ByUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ByUser { user_id, list } = query;

        let ids = self
            .database()
            .execute(Select(By::<Vec<cart::Item>, _>::new((user_id, list))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .into_iter()
            .map(|i| i.advert_id)
            .collect::<Vec<_>>();
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut adverts = self
            .database()
            .execute(Select(By::<HashMap<_, Advert>, _>::new(ids.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        ids.into_iter()
            .map(|id| {
                adverts
                    .remove(&id)
                    .filter(|a| !a.is_deleted())
                    .ok_or(E::AdvertNotExists(id))
                    .map_err(tracerr::wrap!())
            })
            .collect()
    }
}

/// Error of [`ByUser`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Advert`] in the [`cart::List`] does not exist or is deleted.
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
        command::{DeleteAdvert, ToggleCartItem},
        domain::cart,
        test_util::{listed_advert, seeded},
        Command as _, Query as _,
    };

    use super::{ByUser, ExecutionError};

    #[tokio::test]
    async fn fails_on_deleted_advert() {
        let svc = seeded().await;
        let first = listed_advert(&svc).await;
        let second = listed_advert(&svc).await;
        for advert in [&second, &first] {
            assert!(svc
                .execute(ToggleCartItem {
                    user_id: 1_u64.into(),
                    advert_id: advert.id,
                    list: cart::List::Cart,
                })
                .await
                .unwrap());
        }
        let query = ByUser {
            user_id: 1_u64.into(),
            list: cart::List::Cart,
        };

        let listed = svc.execute(query).await.unwrap();
        assert_eq!(listed, [second.clone(), first.clone()]);

        svc.execute(DeleteAdvert {
            advert_id: first.id,
            initiator_id: first.user_id,
        })
        .await
        .unwrap();

        let err = svc.execute(query).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::AdvertNotExists(id) if *id == first.id,
        ));
    }
}
