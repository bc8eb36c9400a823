//! Adding a registry to manifest tags.

use crate::{error::Result, manifest::Manifest, tag::Tag};

/// Rewrite every entry's `RepoTags` in place, returning the original tags.
///
/// Each original tag stays where it was. When `registry` is given and differs
/// from the tag's own registry, the same name under `registry` is inserted right
/// after it, unless the entry already carries that tag. Running this twice with
/// the same registry therefore changes nothing the second time.
///
/// The returned list holds the tags as they were before rewriting, in manifest
/// order; added tags are never part of it.
///
/// Every tag is validated before the manifest is touched: on
/// [`Error::MalformedTag`](crate::Error::MalformedTag) the manifest is left as
/// it was.
pub fn rewrite_manifest(manifest: &mut Manifest, registry: Option<&str>) -> Result<Vec<String>> {
    let mut rewritten = Vec::with_capacity(manifest.entries.len());
    for entry in &manifest.entries {
        rewritten.push(rewrite_tags(&entry.repo_tags, registry)?);
    }

    let mut seen = Vec::new();
    for (entry, tags) in manifest.entries.iter_mut().zip(rewritten) {
        let original = std::mem::replace(&mut entry.repo_tags, tags);
        seen.extend(original);
    }
    Ok(seen)
}

/// Compute the new tag list for a single entry.
pub fn rewrite_tags(tags: &[String], registry: Option<&str>) -> Result<Vec<String>> {
    let mut out = Vec::with_capacity(tags.len() * 2);
    for raw in tags {
        let tag = Tag::parse(raw)?;
        out.push(raw.clone());

        let Some(registry) = registry else {
            continue;
        };
        if tag.registry() == registry {
            continue;
        }
        let added = tag.with_registry(registry);
        if tags.contains(&added) || out.contains(&added) {
            continue;
        }
        out.push(added);
    }
    Ok(out)
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use similar_asserts::assert_eq;

    use super::*;
    use crate::Error;

    fn strings(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn no_registry_keeps_tags() {
        let tags = strings(&["upstream/x:1", "other/y:2"]);
        assert_eq!(rewrite_tags(&tags, None).unwrap(), tags);
    }

    #[test]
    fn adds_registry_after_each_tag() {
        let tags = strings(&["upstream/x:1", "other/y:2"]);
        assert_eq!(
            rewrite_tags(&tags, Some("mirror")).unwrap(),
            strings(&["upstream/x:1", "mirror/x:1", "other/y:2", "mirror/y:2"])
        );
    }

    #[test]
    fn same_registry_is_not_duplicated() {
        let tags = strings(&["mirror/x:1"]);
        assert_eq!(rewrite_tags(&tags, Some("mirror")).unwrap(), tags);
    }

    #[test]
    fn already_rewritten_tags_are_stable() {
        let once = rewrite_tags(&strings(&["upstream/x:1"]), Some("mirror")).unwrap();
        let twice = rewrite_tags(&once, Some("mirror")).unwrap();
        assert_eq!(twice, once);
    }

    #[test]
    fn two_sources_same_name_add_one_tag() {
        let tags = strings(&["a/x:1", "b/x:1"]);
        assert_eq!(
            rewrite_tags(&tags, Some("mirror")).unwrap(),
            strings(&["a/x:1", "mirror/x:1", "b/x:1"])
        );
    }

    #[test]
    fn malformed_tag_leaves_manifest_alone() {
        let json = br#"[{"RepoTags": ["ok/x:1"]}, {"RepoTags": ["alpine:latest"]}]"#;
        let mut manifest = Manifest::from_slice(Path::new("m"), json).unwrap();
        let before = manifest.clone();

        let err = rewrite_manifest(&mut manifest, Some("mirror")).unwrap_err();
        assert!(matches!(err, Error::MalformedTag(ref t) if t == "alpine:latest"));
        assert!(err.is_fatal());
        assert_eq!(manifest, before);
    }

    #[test]
    fn returns_only_original_tags() {
        let json = br#"[{"RepoTags": ["up/x:1"], "Config": "c.json"}, {"RepoTags": ["up/y:2"]}]"#;
        let mut manifest = Manifest::from_slice(Path::new("m"), json).unwrap();

        let seen = rewrite_manifest(&mut manifest, Some("mirror")).unwrap();
        assert_eq!(seen, strings(&["up/x:1", "up/y:2"]));
        assert_eq!(manifest.entries[0].repo_tags, strings(&["up/x:1", "mirror/x:1"]));
        assert_eq!(manifest.entries[1].repo_tags, strings(&["up/y:2", "mirror/y:2"]));
        assert_eq!(
            manifest.entries[0].other["Config"],
            serde_json::Value::from("c.json")
        );
    }
}
