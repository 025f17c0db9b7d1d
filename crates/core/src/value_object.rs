//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. The
/// `(category, option)` and `(template, option)` links are value objects: two
/// links naming the same pair are the same link.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct TemplateAvailableOption {
///     template_id: TemplateId,
///     option_id: OptionId,
/// }
///
/// impl ValueObject for TemplateAvailableOption {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
