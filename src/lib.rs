//! Registry prefixing and conflict detection for exported image manifests.
//!
//! An image root holds one directory per image digest, each containing a
//! `manifest.json` in the `docker save` format. [`scan`] walks the root, adds a
//! registry-qualified copy of every tag when asked to, optionally writes the
//! result back, and returns a [`TagIndex`] of which digests each tag was seen
//! under. Tags that map to more than one digest are conflicts.

pub mod error;
pub mod index;
pub mod manifest;
pub mod report;
pub mod rewrite;
pub mod scan;
pub mod tag;
pub mod walk;

pub use error::{Error, Result};
pub use index::TagIndex;
pub use manifest::{Manifest, ManifestEntry};
pub use scan::{scan, ScanOptions, ScanReport};
pub use tag::Tag;
