//! In-memory [`Database`] implementation.
//!
//! Every store is guarded by a single coarse-grained [`RwLock`]. There is no
//! per-record locking: a [`Lock`] operation holds the exclusive lock of the
//! whole store until the transaction is committed or dropped.
//!
//! Stores must be [`Lock`]ed in the following order to avoid deadlocks:
//! adverts, cart, orders, profiles.
//!
//! [`Lock`]: common::operations::Lock

pub mod client;
mod impls;

use std::sync::Arc;

use derive_more::{Deref, Display, Error as StdError};
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

#[cfg(doc)]
use crate::infra::Database;

pub use self::{
    client::{Connection, NonTx, Tx},
    impls::{Adverts, Cart, Categories, Cities, Orders, Profiles},
};

/// In-memory [`Database`] client.
#[derive(Clone, Debug, Deref)]
pub struct Memory<C = NonTx>(C);

impl Memory {
    /// Creates a new empty [`Memory`] database.
    #[must_use]
    pub fn new() -> Self {
        Self(NonTx::new(Arc::default()))
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory database [`Error`].
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// Sequence of IDs is exhausted.
    #[display("IDs of `{_0}` are exhausted")]
    IdOverflow(#[error(not(source))] &'static str),
}

/// Shared state of all the stores.
#[derive(Debug, Default)]
pub struct State {
    /// [`Cities`] registry.
    cities: Arc<RwLock<Cities>>,

    /// [`Categories`] registry.
    categories: Arc<RwLock<Categories>>,

    /// [`Adverts`] catalog.
    adverts: Arc<RwLock<Adverts>>,

    /// [`Cart`] ledger.
    cart: Arc<RwLock<Cart>>,

    /// [`Orders`] book.
    orders: Arc<RwLock<Orders>>,

    /// [`Profiles`] ledger.
    profiles: Arc<RwLock<Profiles>>,
}

/// Exclusive locks held by a [`Tx`].
#[derive(Debug, Default)]
pub struct Locks {
    /// Held [`Cities`] lock, if any.
    cities: Option<OwnedRwLockWriteGuard<Cities>>,

    /// Held [`Categories`] lock, if any.
    categories: Option<OwnedRwLockWriteGuard<Categories>>,

    /// Held [`Adverts`] lock, if any.
    adverts: Option<OwnedRwLockWriteGuard<Adverts>>,

    /// Held [`Cart`] lock, if any.
    cart: Option<OwnedRwLockWriteGuard<Cart>>,

    /// Held [`Orders`] lock, if any.
    orders: Option<OwnedRwLockWriteGuard<Orders>>,

    /// Held [`Profiles`] lock, if any.
    profiles: Option<OwnedRwLockWriteGuard<Profiles>>,
}

/// Store living in the [`State`].
pub trait Store: Send + Sync + Sized + 'static {
    /// Returns this [`Store`] out of the provided [`State`].
    fn of(state: &State) -> &Arc<RwLock<Self>>;

    /// Returns the slot of this [`Store`]'s lock in the provided [`Locks`].
    fn held(locks: &mut Locks) -> &mut Option<OwnedRwLockWriteGuard<Self>>;
}

/// Implements [`Store`] for the provided type living in the provided field.
macro_rules! impl_store {
    ($($store:ty => $field:ident),* $(,)?) => {$(
        impl Store for $store {
            fn of(state: &State) -> &Arc<RwLock<Self>> {
                &state.$field
            }

            fn held(
                locks: &mut Locks,
            ) -> &mut Option<OwnedRwLockWriteGuard<Self>> {
                &mut locks.$field
            }
        }
    )*};
}

impl_store! {
    Cities => cities,
    Categories => categories,
    Adverts => adverts,
    Cart => cart,
    Orders => orders,
    Profiles => profiles,
}

/// Issues the ID following the `last` one, starting from `1`.
///
/// # Errors
///
/// With [`Error::IdOverflow`] if the sequence is exhausted.
fn next_id<Id>(last: Option<Id>, of: &'static str) -> Result<Id, Error>
where
    Id: From<u64> + Into<u64>,
{
    last.map_or(0, Into::into)
        .checked_add(1)
        .map(Id::from)
        .ok_or(Error::IdOverflow(of))
}
