//! Value object trait: equality by value, not identity.
//!
//! Filter selections, price spans and pagination settings have no identity of
//! their own; they are defined entirely by their fields.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by value. To "modify" one, build a
/// new value (the `with_*` methods on browse types follow this pattern).
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct PriceRange { min: f64, max: f64 }
///
/// impl ValueObject for PriceRange {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
