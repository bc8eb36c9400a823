//! The `manifest.json` document written by `docker save` style exports.
//!
//! A manifest is a JSON array of image entries. Only `RepoTags` is interpreted;
//! every other field of an entry is kept verbatim so a rewrite never loses data.
//!
//! # Output format
//!
//! Documents are written with object keys in sorted order, four space
//! indentation and a trailing newline. Writing an unchanged document therefore
//! always produces the same bytes.

use std::{
    fs,
    io::{ErrorKind, Write},
    path::Path,
};

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use serde_json::{ser::PrettyFormatter, Map, Value};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Filename of the manifest inside each digest directory.
pub const MANIFEST_FILENAME: &str = "manifest.json";

const REPO_TAGS: &str = "RepoTags";

/// One image described by a manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ManifestEntry {
    /// Tags naming this image, each `<registry>/<name>`.
    #[serde(rename = "RepoTags")]
    pub repo_tags: Vec<String>,

    /// All remaining fields (`Config`, `Layers`, ...), passed through untouched.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Serialize for ManifestEntry {
    // `RepoTags` is emitted at its sorted position among the other keys.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.other.len() + 1))?;
        let mut tags_written = false;
        for (key, value) in &self.other {
            if !tags_written && key.as_str() > REPO_TAGS {
                map.serialize_entry(REPO_TAGS, &self.repo_tags)?;
                tags_written = true;
            }
            map.serialize_entry(key, value)?;
        }
        if !tags_written {
            map.serialize_entry(REPO_TAGS, &self.repo_tags)?;
        }
        map.end()
    }
}

/// A parsed `manifest.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Parse a manifest from its JSON text.
    pub fn from_slice(path: &Path, bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse the manifest at `path`.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
        Self::from_slice(path, &bytes)
    }

    /// Render the manifest in its canonical on-disk form.
    pub fn to_pretty_bytes(&self) -> serde_json::Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut ser)?;
        out.push(b'\n');
        Ok(out)
    }

    /// Replace the file at `path` with this manifest.
    ///
    /// The new content is written to a temporary file in the same directory and
    /// renamed into place, so the old file stays intact if writing fails. An
    /// existing file's permissions carry over to the replacement.
    pub fn write(&self, path: &Path) -> Result<()> {
        let bytes = self.to_pretty_bytes().map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;

        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
        tmp.write_all(&bytes).map_err(|e| Error::io(tmp.path(), e))?;
        match fs::metadata(path) {
            Ok(meta) => tmp
                .as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| Error::io(tmp.path(), e))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(Error::io(path, e)),
        }
        tmp.as_file().sync_all().map_err(|e| Error::io(tmp.path(), e))?;
        tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
        Ok(())
    }
}
