//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Entities enforce their validity invariants at construction; an instance that
/// exists is always valid.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
