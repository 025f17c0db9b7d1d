//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Catalog entities (products, categories, templates, option associations)
/// are owned by the host platform; this crate only needs to know how to
/// identify them.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
