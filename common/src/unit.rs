//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing the last modification of an entity.
#[derive(Clone, Copy, Debug)]
pub struct Update;

/// Marker type describing an entity closing.
///
/// Unlike [`Deletion`], closing is reversible.
#[derive(Clone, Copy, Debug)]
pub struct Closing;

/// Marker type describing an entity deletion.
#[derive(Clone, Copy, Debug)]
pub struct Deletion;
