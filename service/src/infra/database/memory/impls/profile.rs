//! [`Profile`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Lock, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{user, Profile},
    infra::{
        database::{
            self,
            memory::{Connection, Tx},
            Memory,
        },
        Database,
    },
};

/// Ledger of [`Profile`]s by their owners.
#[derive(Debug, Default)]
pub struct Profiles(HashMap<user::Id, Profile>);

impl<C> Database<Select<By<Option<Profile>, user::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Option<Profile>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Profile>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let user_id = by.into_inner();
        Ok(self
            .read(|Profiles(profiles): &Profiles| {
                profiles.get(&user_id).cloned()
            })
            .await)
    }
}

impl<C> Database<Update<Profile>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(profile): Update<Profile>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|Profiles(profiles): &mut Profiles| {
            drop(profiles.insert(profile.user_id, profile));
        })
        .await;
        Ok(())
    }
}

impl Database<Lock<By<Profile, user::Id>>> for Memory<Tx> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Profile, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|_: &mut Profiles| ()).await;
        Ok(())
    }
}
