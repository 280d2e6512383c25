//! Save-file discovery.
//!
//! Scans a directory for candidate save files, either by a `*`-placeholder
//! naming pattern whose captured digits become the seed or by extension with
//! a fixed seed, and decodes each one. Per-file failures never abort the
//! batch: a corrupt file maps to `None`, a vanished file is skipped.

use crate::error::{SaveError, SaveResult};
use crate::save::{decode_save, SaveOptions, SEED_PLACEHOLDER};
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Decoded scan results keyed by seed digits or file stem, sorted by key.
pub type ScanResults = BTreeMap<String, Option<Vec<String>>>;

/// Scans `dir` for files matching a seed-placeholder naming pattern.
///
/// `pattern` is a file name without extension containing at least one `*`;
/// each `*` must capture the same run of digits, which becomes the seed used
/// to decode that file. Seeds greater than `max_files` are skipped when it
/// is set. `limit` caps the decoded lines per file.
///
/// Returns one entry per discovered file, keyed by the seed digits:
/// `Some(lines)` on success, `None` when the file is corrupt.
///
/// # Errors
///
/// [`SaveError::InvalidScanPattern`] when `pattern` has no `*`; I/O errors
/// from listing the directory.
pub fn read_save_files(
    pattern: &str,
    extension: &str,
    dir: &Path,
    max_files: Option<u64>,
    limit: Option<usize>,
) -> SaveResult<ScanResults> {
    if !pattern.contains(SEED_PLACEHOLDER) {
        return Err(SaveError::InvalidScanPattern);
    }
    let matcher = pattern_regex(pattern, extension);

    let mut seeds = Vec::new();
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(seed) = match_seed(&matcher, name) {
            if max_files.is_none_or(|max| seed.unsigned_abs() <= max) {
                seeds.push(seed);
            }
        }
    }
    seeds.sort_unstable();
    seeds.dedup();
    debug!(dir = %dir.display(), candidates = seeds.len(), "scanned by pattern");

    let mut results = ScanResults::new();
    for seed in seeds {
        let opts = SaveOptions::new()
            .seed(seed)
            .path(dir.join(pattern).to_string_lossy())
            .extension(extension);
        insert_result(&mut results, seed.to_string(), &opts, limit)?;
    }
    Ok(results)
}

/// Scans `dir` for every file with `extension` and decodes each with `seed`.
///
/// `max_files` caps how many files are decoded (candidates are taken in
/// sorted file-name order). Returns one entry per file keyed by its stem.
///
/// # Errors
///
/// I/O errors from listing the directory.
pub fn read_save_files_with_seed(
    seed: i64,
    extension: &str,
    dir: &Path,
    max_files: Option<u64>,
    limit: Option<usize>,
) -> SaveResult<ScanResults> {
    let mut stems = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            stems.push(stem.to_string());
        }
    }
    stems.sort_unstable();
    if let Some(max) = max_files {
        stems.truncate(usize::try_from(max).unwrap_or(usize::MAX));
    }
    debug!(dir = %dir.display(), candidates = stems.len(), "scanned by extension");

    let mut results = ScanResults::new();
    for stem in stems {
        let opts = SaveOptions::new()
            .seed(seed)
            .path(dir.join(&stem).to_string_lossy())
            .extension(extension);
        insert_result(&mut results, stem, &opts, limit)?;
    }
    Ok(results)
}

/// Decodes one candidate, mapping corrupt files to `None` and skipping
/// vanished files.
fn insert_result(
    results: &mut ScanResults,
    key: String,
    opts: &SaveOptions,
    limit: Option<usize>,
) -> SaveResult<()> {
    match decode_save(opts, limit) {
        Ok(lines) => {
            results.insert(key, Some(lines));
        }
        Err(e) if e.is_corrupt_file() => {
            warn!(key, error = %e, "save file failed to decode");
            results.insert(key, None);
        }
        Err(SaveError::NotFound { .. }) => {}
        Err(e) => return Err(e),
    }
    Ok(())
}

/// Builds the anchored file-name regex for a placeholder pattern.
fn pattern_regex(pattern: &str, extension: &str) -> Regex {
    let full = format!("{pattern}.{extension}");
    let escaped: Vec<String> = full
        .split(SEED_PLACEHOLDER)
        .map(regex::escape)
        .collect();
    let source = format!("^{}$", escaped.join(r"(\d+)"));
    // Infallible: every literal part is escaped.
    Regex::new(&source).unwrap_or_else(|_| unreachable!("escaped pattern is valid"))
}

/// Extracts the seed when every capture group holds the same digits.
fn match_seed(matcher: &Regex, file_name: &str) -> Option<i64> {
    let captures = matcher.captures(file_name)?;
    let mut groups = captures.iter().skip(1).flatten();
    let first = groups.next()?.as_str();
    if groups.any(|g| g.as_str() != first) {
        return None;
    }
    first.parse().ok()
}
