//! Tag to digest index built up over one scan.

use std::collections::HashMap;

/// Maps each tag to every digest it was seen under.
///
/// Iteration follows the order in which tags were first recorded, and digests
/// within a tag keep their recording order. Recording the same pair twice keeps
/// both occurrences.
#[derive(Debug, Default, Clone)]
pub struct TagIndex {
    entries: Vec<(String, Vec<String>)>,
    positions: HashMap<String, usize>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `tag` was seen in the manifest for `digest`.
    pub fn record(&mut self, tag: &str, digest: &str) {
        let slot = match self.positions.get(tag) {
            Some(&slot) => slot,
            None => {
                self.entries.push((tag.to_string(), Vec::new()));
                self.positions.insert(tag.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        self.entries[slot].1.push(digest.to_string());
    }

    /// Digests recorded for `tag`, if any.
    pub fn digests(&self, tag: &str) -> Option<&[String]> {
        self.positions
            .get(tag)
            .map(|&slot| self.entries[slot].1.as_slice())
    }

    /// All tags with their digests in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(tag, digests)| (tag.as_str(), digests.as_slice()))
    }

    /// Every `(tag, digest)` pair, flattened.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .flat_map(|(tag, digests)| digests.iter().map(move |d| (tag, d.as_str())))
    }

    /// Tags recorded under more than one digest.
    pub fn conflicts(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.iter().filter(|(_, digests)| digests.len() > 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod test {
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn keeps_first_seen_order() {
        let mut index = TagIndex::new();
        index.record("b/two", "d1");
        index.record("a/one", "d1");
        index.record("b/two", "d2");

        let tags: Vec<&str> = index.iter().map(|(tag, _)| tag).collect();
        assert_eq!(tags, vec!["b/two", "a/one"]);
        assert_eq!(
            index.digests("b/two").unwrap(),
            &["d1".to_string(), "d2".to_string()][..]
        );
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn conflicts_need_two_digests() {
        let mut index = TagIndex::new();
        index.record("acme/foo", "aaa");
        index.record("acme/bar", "aaa");
        index.record("acme/foo", "bbb");

        let conflicts: Vec<&str> = index.conflicts().map(|(tag, _)| tag).collect();
        assert_eq!(conflicts, vec!["acme/foo"]);
    }

    #[test]
    fn same_tag_twice_in_one_manifest_counts() {
        let mut index = TagIndex::new();
        index.record("acme/foo", "aaa");
        index.record("acme/foo", "aaa");
        assert_eq!(index.conflicts().count(), 1);
    }

    #[test]
    fn pairs_flatten_in_order() {
        let mut index = TagIndex::new();
        index.record("r/x", "1");
        index.record("r/y", "2");
        index.record("r/x", "3");

        let pairs: Vec<(&str, &str)> = index.pairs().collect();
        assert_eq!(pairs, vec![("r/x", "1"), ("r/x", "3"), ("r/y", "2")]);
    }

    #[test]
    fn empty_index() {
        let index = TagIndex::new();
        assert!(index.is_empty());
        assert!(index.digests("r/x").is_none());
        assert_eq!(index.conflicts().count(), 0);
    }
}
