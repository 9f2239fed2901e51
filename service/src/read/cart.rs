//! Cart-related read definitions.

use derive_more::Deref;

#[cfg(doc)]
use crate::domain::cart::{Item, List};

/// Indicator whether an [`Item`] is present in its [`List`].
#[derive(Clone, Copy, Debug, Deref, Eq, Hash, PartialEq)]
pub struct Contains(pub bool);

impl PartialEq<bool> for Contains {
    fn eq(&self, other: &bool) -> bool {
        self.0 == *other
    }
}
