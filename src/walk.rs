//! Locating manifests under an image root.
//!
//! The expected layout is one directory per image, named after its digest:
//!
//! ```text
//! images/
//! +-- aaa111/
//! |   +-- manifest.json
//! +-- vendor/
//!     +-- bbb222/
//!         +-- manifest.json
//! ```
//!
//! Nesting depth is arbitrary; only the directory immediately containing the
//! manifest names the digest.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{
    error::{Error, Result},
    manifest::MANIFEST_FILENAME,
};

/// A manifest found by [`manifest_files`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestFile {
    /// Path to the `manifest.json` itself.
    pub path: PathBuf,
    /// Name of the directory containing the manifest.
    pub digest: String,
}

impl ManifestFile {
    pub fn new(path: PathBuf) -> Self {
        let digest = digest_for(&path);
        Self { path, digest }
    }
}

// Falls back to the whole parent path for parents without a final component,
// such as a manifest directly under `.`.
fn digest_for(path: &Path) -> String {
    let parent = path.parent().unwrap_or(Path::new(""));
    match parent.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => parent.to_string_lossy().into_owned(),
    }
}

fn is_manifest_file(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

/// Iterate every regular file named `manifest.json` below `root`.
///
/// Directory entries are visited in file name order, so the sequence is stable
/// for a given tree. Symlinked directories are not descended into, but a
/// `manifest.json` that is a symlink to a regular file is included; its digest
/// comes from the directory holding the link.
///
/// Returns [`Error::InvalidRoot`] up front if `root` is not a directory. Errors
/// reading part of the tree are yielded in place and iteration continues after
/// them.
pub fn manifest_files(root: &Path) -> Result<impl Iterator<Item = Result<ManifestFile>>> {
    if !root.is_dir() {
        return Err(Error::InvalidRoot(root.to_path_buf()));
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    Ok(walker.filter_map(|entry| match entry {
        Err(err) => Some(Err(Error::Walk(err))),
        Ok(entry) if entry.file_name() == MANIFEST_FILENAME && is_manifest_file(&entry) => {
            Some(Ok(ManifestFile::new(entry.into_path())))
        }
        Ok(_) => None,
    }))
}
