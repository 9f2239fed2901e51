//! [`Command`] for registering a new [`Category`].

use common::operations::Insert;
use tracerr::Traced;

use crate::{
    domain::{category, Category},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for registering a new [`Category`].
///
/// Duplicates are not rejected: the earliest registered [`Category`] wins on
/// resolution.
#[derive(Clone, Debug)]
pub struct CreateCategory {
    /// [`category::Name`] of a new [`Category`].
    pub name: category::Name,

    /// [`category::Translation`] of a new [`Category`].
    pub translation: category::Translation,
}

impl<Db> Command<CreateCategory> for Service<Db>
where
    Db: Database<
        Insert<category::Draft>,
        Ok = Category,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Category;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateCategory,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateCategory { name, translation } = cmd;

        self.database()
            .execute(Insert(category::Draft { name, translation }))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`CreateCategory`] [`Command`] execution.
pub type ExecutionError = database::Error;

#[cfg(test)]
mod spec {
    use crate::{
        domain::category,
        query::{self, categories},
        test_util::service,
        Command as _, Query as _,
    };

    use super::CreateCategory;

    fn cmd(name: &str, translation: &str) -> CreateCategory {
        CreateCategory {
            name: category::Name::new(name).unwrap(),
            translation: category::Translation::new(translation).unwrap(),
        }
    }

    #[tokio::test]
    async fn earliest_duplicate_wins() {
        let svc = service();

        let first = svc.execute(cmd("Books", "Knigi")).await.unwrap();
        let second = svc.execute(cmd("Knigi", "Books")).await.unwrap();
        assert_eq!(u64::from(first.id), 1);
        assert_eq!(u64::from(second.id), 2);

        for key in ["Books", "Knigi"] {
            let found = svc
                .execute(query::category::ByKey::by(
                    category::Key::new(key).unwrap(),
                ))
                .await
                .unwrap()
                .unwrap();
            assert_eq!(found.id, first.id);
        }

        let all = svc.execute(categories::All::by(())).await.unwrap();
        assert_eq!(all, [first, second]);
    }
}
