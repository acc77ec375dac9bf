//! Marker-region splicing
//!
//! Target files carry named regions delimited by marker lines derived from
//! the region name:
//!
//! ```text
//! //<region>{
//! ...generated content...
//! //<region>}
//! ```
//!
//! Splicing replaces everything strictly between the first occurrence of
//! each marker, leaving the marker lines untouched. A file is rewritten only
//! when the spliced result differs byte-for-byte from the original, and the
//! previous content is first copied to the first unused `.bakN` sibling.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Begin marker line for a region, including the surrounding newlines.
pub fn begin_marker(region: &str) -> String {
    format!("\n//{region}{{\n")
}

/// End marker line for a region, including the surrounding newlines.
pub fn end_marker(region: &str) -> String {
    format!("\n//{region}}}\n")
}

/// Replace the content of one region within `text`.
///
/// Pure text-level operation; file handling lives in [`update_file`].
pub fn splice_region(text: &str, region: &str, content: &str, file: &str) -> Result<String> {
    let begin = begin_marker(region);
    let end = end_marker(region);

    let (before, rest) = text
        .split_once(&begin)
        .ok_or_else(|| Error::BeginMarkerNotFound {
            file: file.to_string(),
            marker: begin.clone(),
        })?;
    let (_, after) = rest
        .split_once(&end)
        .ok_or_else(|| Error::EndMarkerNotFound {
            file: file.to_string(),
            marker: end.clone(),
        })?;

    Ok(format!("{before}{begin}{content}{end}{after}"))
}

/// Outcome of [`update_file`] for one target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The file already held the generated content; nothing was written.
    Unchanged,
    /// The file was rewritten; the previous content is at the given path.
    Written { backup: PathBuf },
}

/// Splice all `regions` into the file at `path`.
///
/// All regions are replaced in memory first, so a missing marker leaves the
/// file untouched. The previous content is backed up before a write.
pub fn update_file(path: &Path, regions: &BTreeMap<String, String>) -> Result<UpdateOutcome> {
    let file = path.display().to_string();
    let original = fs::read_to_string(path)?;

    let mut updated = original.clone();
    for (region, content) in regions {
        updated = splice_region(&updated, region, content, &file)?;
    }

    if updated == original {
        return Ok(UpdateOutcome::Unchanged);
    }

    let backup = backup_path(path);
    fs::write(&backup, &original)?;
    fs::write(path, updated)?;
    Ok(UpdateOutcome::Written { backup })
}

/// First unused backup name in the `.bak1`, `.bak2`, ... series.
fn backup_path(path: &Path) -> PathBuf {
    let mut i = 1;
    loop {
        let candidate = PathBuf::from(format!("{}.bak{i}", path.display()));
        if !candidate.exists() {
            return candidate;
        }
        i += 1;
    }
}
