//! In-memory database clients.

use std::{future::Future, sync::Arc};

use tokio::sync::Mutex;

use super::{Locks, State, Store};

/// Generic access to the [`Store`]s of a [`State`].
pub trait Connection {
    /// Runs the provided function over a shared view of the `S` [`Store`].
    fn read<S, R>(&self, f: impl FnOnce(&S) -> R) -> impl Future<Output = R>
    where
        S: Store;

    /// Runs the provided function over an exclusive view of the `S`
    /// [`Store`].
    fn write<S, R>(
        &self,
        f: impl FnOnce(&mut S) -> R,
    ) -> impl Future<Output = R>
    where
        S: Store;
}

/// Non-transactional in-memory database client.
///
/// Locks a [`Store`] for a single operation only.
#[derive(Clone, Debug)]
pub struct NonTx {
    /// [`State`] this client operates on.
    state: Arc<State>,
}

impl NonTx {
    /// Creates a new [`NonTx`] client operating on the provided [`State`].
    #[must_use]
    pub(crate) fn new(state: Arc<State>) -> Self {
        Self { state }
    }
}

impl Connection for NonTx {
    async fn read<S, R>(&self, f: impl FnOnce(&S) -> R) -> R
    where
        S: Store,
    {
        f(&*S::of(&self.state).read().await)
    }

    async fn write<S, R>(&self, f: impl FnOnce(&mut S) -> R) -> R
    where
        S: Store,
    {
        f(&mut *S::of(&self.state).write().await)
    }
}

/// Transactional in-memory database client.
///
/// Once a [`Store`] is written through this client, its exclusive lock is
/// held until [`Tx::commit()`] or until the last clone of this client is
/// dropped.
#[derive(Clone, Debug)]
pub struct Tx {
    /// [`State`] this client operates on.
    state: Arc<State>,

    /// [`Locks`] held by this client.
    locks: Arc<Mutex<Locks>>,
}

impl Tx {
    /// Creates a new [`Tx`] client from the provided [`NonTx`] client.
    #[must_use]
    pub fn from_non_tx(client: &NonTx) -> Self {
        Self {
            state: Arc::clone(&client.state),
            locks: Arc::default(),
        }
    }

    /// Commits this [`Tx`] client, releasing all the held locks.
    pub async fn commit(&self) {
        *self.locks.lock().await = Locks::default();
    }
}

impl Connection for Tx {
    async fn read<S, R>(&self, f: impl FnOnce(&S) -> R) -> R
    where
        S: Store,
    {
        let mut locks = self.locks.lock().await;
        if let Some(held) = S::held(&mut locks).as_deref() {
            return f(held);
        }
        f(&*S::of(&self.state).read().await)
    }

    async fn write<S, R>(&self, f: impl FnOnce(&mut S) -> R) -> R
    where
        S: Store,
    {
        let mut locks = self.locks.lock().await;
        let held = S::held(&mut locks);
        if let Some(guard) = held.as_deref_mut() {
            return f(guard);
        }
        let guard = Arc::clone(S::of(&self.state)).write_owned().await;
        f(held.insert(guard))
    }
}
