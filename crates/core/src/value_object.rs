//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity; two instances holding the same attribute
/// values are equal. Cloning one yields an independent copy that shares no
/// mutable state with the source, which is what lets aggregates hand out
/// duplicates without leaking their internals.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Loan {
///     borrower: String,
///     days: u32,
/// }
///
/// impl ValueObject for Loan {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
