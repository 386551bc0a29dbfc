//! Business services for the Inventory Management Platform

pub mod auth;
pub mod cart;
pub mod category;
pub mod image;
pub mod product;
pub mod stock;
pub mod supplier;

/// Merge an optional field for a partial update.
///
/// An explicit clear flag nulls the field; otherwise a supplied value
/// replaces the stored one and an omitted value keeps it.
pub(crate) fn merge_optional<T>(clear: bool, update: Option<T>, existing: Option<T>) -> Option<T> {
    if clear {
        None
    } else {
        update.or(existing)
    }
}

#[cfg(test)]
mod tests {
    use super::merge_optional;

    #[test]
    fn test_merge_optional_keeps_existing() {
        assert_eq!(merge_optional(false, None, Some("old")), Some("old"));
    }

    #[test]
    fn test_merge_optional_replaces() {
        assert_eq!(merge_optional(false, Some("new"), Some("old")), Some("new"));
    }

    #[test]
    fn test_merge_optional_clears() {
        assert_eq!(merge_optional::<&str>(true, None, Some("old")), None);
        // Clear wins even against a supplied value.
        assert_eq!(merge_optional(true, Some("new"), Some("old")), None::<&str>);
    }
}
