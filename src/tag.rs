//! Image tags of the form `<registry>/<name>`.

use crate::error::{Error, Result};

/// A tag split into its registry and name halves.
///
/// Borrowed from the original tag string; use [`Tag::with_registry`] to build
/// the same name under another registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    registry: &'a str,
    name: &'a str,
}

impl<'a> Tag<'a> {
    /// Parse a tag string.
    ///
    /// The string must contain exactly one `/`. Anything else, including a tag
    /// with no registry at all or a nested path like `a/b/c`, returns
    /// [`Error::MalformedTag`].
    pub fn parse(tag: &'a str) -> Result<Self> {
        let mut parts = tag.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(registry), Some(name), None) => Ok(Tag { registry, name }),
            _ => Err(Error::MalformedTag(tag.to_string())),
        }
    }

    pub fn registry(&self) -> &'a str {
        self.registry
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Format the same name under `registry`.
    pub fn with_registry(&self, registry: &str) -> String {
        format!("{registry}/{}", self.name)
    }
}

#[cfg(test)]
mod test {
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn parse_splits_on_slash() {
        let tag = Tag::parse("upstream/x:1").unwrap();
        assert_eq!(tag.registry(), "upstream");
        assert_eq!(tag.name(), "x:1");
    }

    #[test]
    fn parse_rejects_wrong_separator_count() {
        for bad in ["alpine:latest", "a/b/c", "quay.io/org/image:tag"] {
            match Tag::parse(bad) {
                Err(Error::MalformedTag(t)) => assert_eq!(t.as_str(), bad),
                other => panic!("expected MalformedTag for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_halves_are_still_two_segments() {
        let tag = Tag::parse("/x").unwrap();
        assert_eq!(tag.registry(), "");
        assert_eq!(tag.name(), "x");
    }

    #[test]
    fn with_registry_keeps_name() {
        let tag = Tag::parse("upstream/x:1").unwrap();
        assert_eq!(tag.with_registry("mirror"), "mirror/x:1");
    }
}
