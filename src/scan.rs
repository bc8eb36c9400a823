//! One pass over an image root: find, rewrite, persist, index.

use std::path::{Path, PathBuf};

use log::{debug, error, info};

use crate::{
    error::{Error, Result},
    index::TagIndex,
    manifest::Manifest,
    rewrite::rewrite_manifest,
    walk::{manifest_files, ManifestFile},
};

/// What a scan should do besides building the index.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Registry to add to every tag that lives elsewhere.
    pub registry: Option<String>,
    /// Write rewritten manifests back to disk.
    pub write: bool,
}

/// Outcome of [`scan`].
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Original tags mapped to the digests they appeared under.
    pub index: TagIndex,
    /// Manifests read and rewritten in memory.
    pub manifests: usize,
    /// Manifests written back to disk.
    pub written: usize,
    /// Per-file failures; each has already been logged.
    pub failures: Vec<Error>,
}

impl ScanReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Resolve a `--root` argument against `base`.
///
/// Relative roots are taken relative to `base`; absolute roots are used as is.
pub fn resolve_root(base: &Path, root: &Path) -> PathBuf {
    base.join(root)
}

/// Scan every manifest under `root`.
///
/// Unreadable or unparsable manifests and failed writes are logged, collected
/// into [`ScanReport::failures`], and skipped. A missing root or a malformed tag
/// aborts the scan with an error; manifests already written stay written, and
/// the manifest holding the malformed tag is not modified.
pub fn scan(root: &Path, options: &ScanOptions) -> Result<ScanReport> {
    let registry = options.registry.as_deref();
    let mut report = ScanReport::default();

    for item in manifest_files(root)? {
        let file = match item {
            Ok(file) => file,
            Err(err) => {
                error!("{err}");
                report.failures.push(err);
                continue;
            }
        };

        match scan_one(&file, registry, options.write, &mut report) {
            Ok(()) => {}
            Err(err) if err.is_fatal() => {
                error!("{}: {err}", file.path.display());
                return Err(err);
            }
            Err(err) => {
                error!("{err}");
                report.failures.push(err);
            }
        }
    }

    info!(
        "Scanned {} manifests, wrote {}, {} failed",
        report.manifests,
        report.written,
        report.failures.len()
    );
    Ok(report)
}

fn scan_one(
    file: &ManifestFile,
    registry: Option<&str>,
    write: bool,
    report: &mut ScanReport,
) -> Result<()> {
    debug!("Reading {} (digest {})", file.path.display(), file.digest);
    let mut manifest = Manifest::read(&file.path)?;

    let seen = rewrite_manifest(&mut manifest, registry)?;
    for tag in &seen {
        report.index.record(tag, &file.digest);
    }
    report.manifests += 1;

    if write {
        manifest.write(&file.path)?;
        debug!("Wrote {}", file.path.display());
        report.written += 1;
    }
    Ok(())
}
