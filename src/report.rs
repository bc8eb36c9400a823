//! Printing the tag index.

use std::io::{Result, Write};

use crate::index::TagIndex;

/// Write every `(tag, digest)` pair, tab separated, one per line.
pub fn write_mapping(out: &mut impl Write, index: &TagIndex) -> Result<()> {
    for (tag, digest) in index.pairs() {
        writeln!(out, "{tag}\t{digest}")?;
    }
    Ok(())
}

/// Write one line per tag seen under more than one digest.
///
/// Returns the number of conflicting tags.
pub fn write_conflicts(out: &mut impl Write, index: &TagIndex) -> Result<usize> {
    let mut count = 0;
    for (tag, digests) in index.conflicts() {
        writeln!(
            out,
            "Conflict: {tag} has multiple digests: [{}]",
            digests.join(", ")
        )?;
        count += 1;
    }
    Ok(count)
}
