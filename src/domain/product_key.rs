//! Product identity used to group items across sources.

use std::fmt;

/// Normalized product identity.
///
/// Built from an item's display name: case-folded, trimmed, and with every
/// run of whitespace collapsed to a single space. Two items are "the same
/// product" exactly when their keys are equal; there is no fuzzy matching.
/// Callers force correlation across sources by supplying the same name
/// override for each query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductKey(String);

impl ProductKey {
    /// Derive the key for a display name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let folded = name.to_lowercase();
        Self(folded.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    /// Get the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_case_and_collapses_whitespace() {
        let a = ProductKey::from_name("  iPhone 16\t128GB ");
        let b = ProductKey::from_name("iphone 16 128gb");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "iphone 16 128gb");
    }

    #[test]
    fn distinct_names_stay_distinct() {
        assert_ne!(
            ProductKey::from_name("iPhone 16 128GB"),
            ProductKey::from_name("iPhone 16 256GB")
        );
    }

    #[test]
    fn does_not_strip_punctuation() {
        assert_ne!(
            ProductKey::from_name("USB-C Cable"),
            ProductKey::from_name("USB C Cable")
        );
    }
}
