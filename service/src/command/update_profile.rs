//! [`Command`] for updating a [`Profile`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{city, profile, user, City, Profile},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`Profile`] of a user.
///
/// Creates the [`Profile`] on its first update. Omitted fields are left
/// untouched.
#[derive(Clone, Debug)]
pub struct UpdateProfile {
    /// ID of the user whose [`Profile`] is updated.
    pub user_id: user::Id,

    /// New [`profile::Rating`], if any.
    pub rating: Option<profile::Rating>,

    /// [`city::Key`] of the new [`City`], if any.
    pub city: Option<city::Key>,

    /// New [`user::Phone`], if any.
    pub phone: Option<user::Phone>,
}

impl<Db> Command<UpdateProfile> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<City>, city::Key>>,
            Ok = Option<City>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<
            Lock<By<Profile, user::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Profile>, user::Id>>,
            Ok = Option<Profile>,
            Err = Traced<database::Error>,
        > + Database<Update<Profile>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Profile;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateProfile,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateProfile {
            user_id,
            rating,
            city,
            phone,
        } = cmd;

        let city_id = if let Some(key) = city {
            let city = self
                .database()
                .execute(Select(By::<Option<City>, _>::new(key.clone())))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::UnknownCity(key))
                .map_err(tracerr::wrap!())?;
            Some(city.id)
        } else {
            None
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::<Profile, _>::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut profile = tx
            .execute(Select(By::<Option<Profile>, _>::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .unwrap_or_else(|| Profile::new(user_id));

        if let Some(rating) = rating {
            profile.rating = rating;
        }
        if city_id.is_some() {
            profile.city_id = city_id;
        }
        if phone.is_some() {
            profile.phone = phone;
        }
        profile.updated_at = Some(DateTime::now().coerce());

        tx.execute(Update(profile.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(profile)
    }
}

/// Error of [`UpdateProfile`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// No [`City`] is addressed by the provided [`city::Key`].
    #[display("`City(key: {_0})` does not exist")]
    UnknownCity(#[error(not(source))] city::Key),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{city, user},
        query::profile,
        test_util::seeded,
        Command as _, Query as _,
    };

    use super::{ExecutionError, UpdateProfile};

    #[tokio::test]
    async fn creates_profile_on_first_update() {
        let svc = seeded().await;

        let none = svc.execute(profile::ByUser::by(3_u64.into())).await;
        assert!(none.unwrap().is_none());

        _ = svc
            .execute(UpdateProfile {
                user_id: 3_u64.into(),
                rating: Some(5_u32.into()),
                city: Some(city::Key::new("Moscow").unwrap()),
                phone: None,
            })
            .await
            .unwrap();
        let updated = svc
            .execute(UpdateProfile {
                user_id: 3_u64.into(),
                rating: None,
                city: None,
                phone: Some(user::Phone::new("+380991234567").unwrap()),
            })
            .await
            .unwrap();

        assert_eq!(updated.rating, 5_u32.into());
        assert_eq!(updated.city_id, Some(1_u64.into()));
        assert!(updated.phone.is_some());
        assert!(updated.updated_at.is_some());

        let found = svc.execute(profile::ByUser::by(3_u64.into())).await;
        assert_eq!(found.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn rejects_unknown_city() {
        let svc = seeded().await;

        let err = svc
            .execute(UpdateProfile {
                user_id: 3_u64.into(),
                rating: None,
                city: Some(city::Key::new("Atlantis").unwrap()),
                phone: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::UnknownCity(_)));
    }
}
