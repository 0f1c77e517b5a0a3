//! Optional path-suffix composition.
//!
//! Some read endpoints take their filter and paging parameters as extra path
//! segments (`email/overview/filter/example.com/page/2`) instead of a query
//! string. Segments whose value is zero are left out entirely and values
//! are appended verbatim.

use crate::merge::ZeroValue;
use std::fmt::{self, Display};

/// Builder for `/<key>/<value>` path segments.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PathSuffix {
    suffix: String,
}

impl PathSuffix {
    /// Create a new, empty suffix.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            suffix: String::new(),
        }
    }

    /// The `/filter/<filter>` then `/page/<page>` suffix.
    #[must_use]
    pub fn filter_and_page(filter: &str, page: u32) -> String {
        Self::new()
            .push("filter", filter)
            .push("page", &page)
            .into_string()
    }

    /// Append `/<key>/<value>` unless `value` is zero.
    #[must_use]
    pub fn push<T>(mut self, key: &str, value: &T) -> Self
    where
        T: ZeroValue + Display + ?Sized,
    {
        if !value.is_zero() {
            self.suffix.push('/');
            self.suffix.push_str(key);
            self.suffix.push('/');
            self.suffix.push_str(&value.to_string());
        }
        self
    }

    /// Append the suffix to `path`.
    #[must_use]
    pub fn apply(&self, path: &str) -> String {
        format!("{path}{}", self.suffix)
    }

    /// Returns true if no segments have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.suffix.is_empty()
    }

    /// The suffix as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.suffix
    }

    /// Consume the builder, returning the suffix.
    #[must_use]
    pub fn into_string(self) -> String {
        self.suffix
    }
}

impl Display for PathSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::PathSuffix;

    #[test]
    fn filter_only() {
        assert_eq!(PathSuffix::filter_and_page("a.com", 0), "/filter/a.com");
    }

    #[test]
    fn page_only() {
        assert_eq!(PathSuffix::filter_and_page("", 2), "/page/2");
    }

    #[test]
    fn filter_then_page() {
        assert_eq!(
            PathSuffix::filter_and_page("a.com", 2),
            "/filter/a.com/page/2"
        );
    }

    #[test]
    fn neither_set() {
        assert_eq!(PathSuffix::filter_and_page("", 0), "");
        assert!(PathSuffix::new().push("page", &0u32).is_empty());
    }

    #[test]
    fn values_are_not_encoded() {
        let suffix = PathSuffix::new().push("filter", "a b/c");
        assert_eq!(suffix.apply("email/overview"), "email/overview/filter/a b/c");
    }
}
