//! [`Command`] for registering a new [`City`].

use common::operations::Insert;
use tracerr::Traced;

use crate::{
    domain::{city, City},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for registering a new [`City`].
///
/// Duplicates are not rejected: the earliest registered [`City`] wins on
/// resolution.
#[derive(Clone, Debug)]
pub struct CreateCity {
    /// [`city::Name`] of a new [`City`].
    pub name: city::Name,

    /// [`city::Translation`] of a new [`City`].
    pub translation: city::Translation,
}

impl<Db> Command<CreateCity> for Service<Db>
where
    Db: Database<
        Insert<city::Draft>,
        Ok = City,
        Err = Traced<database::Error>,
    >,
{
    type Ok = City;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateCity) -> Result<Self::Ok, Self::Err> {
        let CreateCity { name, translation } = cmd;

        self.database()
            .execute(Insert(city::Draft { name, translation }))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`CreateCity`] [`Command`] execution.
pub type ExecutionError = database::Error;

#[cfg(test)]
mod spec {
    use crate::{
        domain::city,
        query::{self, cities},
        test_util::service,
        Command as _, Query as _,
    };

    use super::CreateCity;

    #[tokio::test]
    async fn issues_ids_from_one() {
        let svc = service();

        for (n, (name, translation)) in
            [("Moscow", "Moskva"), ("Kyiv", "Kyiv")].into_iter().enumerate()
        {
            let city = svc
                .execute(CreateCity {
                    name: city::Name::new(name).unwrap(),
                    translation: city::Translation::new(translation).unwrap(),
                })
                .await
                .unwrap();
            assert_eq!(u64::from(city.id), u64::try_from(n).unwrap() + 1);
        }

        let all = svc.execute(cities::All::by(())).await.unwrap();
        assert_eq!(all.len(), 2);

        let found = svc
            .execute(query::city::ByKey::by(city::Key::new("Kyiv").unwrap()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, 2_u64.into());
    }
}
