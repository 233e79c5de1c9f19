//! Entity trait: records with identity.

use std::collections::HashSet;

/// Entity marker + minimal interface.
///
/// Categories and products are entities: two records with the same id are the
/// same record, even if their other fields differ.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// First id that occurs more than once, in input order.
pub fn first_duplicate_id<E: Entity>(entities: &[E]) -> Option<&E::Id> {
    let mut seen: HashSet<&E::Id> = HashSet::with_capacity(entities.len());
    entities.iter().map(Entity::id).find(|id| !seen.insert(*id))
}
