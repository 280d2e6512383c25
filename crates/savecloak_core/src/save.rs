//! Save-file assembly and recovery.
//!
//! On disk a save file is a flat run of delimiter-terminated segments:
//!
//! ```text
//! <version tag> <derived-seed tag> <line 1> <line 2> ...
//! ```
//!
//! The two header segments go through one generator seeded from the caller
//! seed; body segments go through a second generator whose seed the version
//! policy derives (see [`crate::version`]). Files are written and read in
//! full within one call; nothing is streamed and nothing is shared between
//! calls.

use crate::error::{SaveError, SaveResult};
use crate::version::{body_generator_seed, plan_header, recover_body_seed, SaveVersion};
use chrono::Local;
use encoding_rs::{Encoding, UTF_8};
use num_bigint::BigInt;
use savecloak_codec::{
    decode_line, derive_seed, encode_line, generator_seed, SplitMix64, SEGMENT_DELIMITER,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Placeholder in a save path replaced by the seed's decimal text.
pub const SEED_PLACEHOLDER: char = '*';

/// Options for one encode or decode call.
///
/// # Example
///
/// ```no_run
/// use savecloak_core::{SaveOptions, SaveVersion};
///
/// let opts = SaveOptions::new()
///     .seed(42)
///     .path("slot*")
///     .version(SaveVersion::V1);
/// savecloak_core::encode_save(&["hello"], &opts)?;
/// # Ok::<(), savecloak_core::SaveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SaveOptions {
    /// Caller seed keying the whole file.
    pub seed: i64,
    /// Path and file name without the extension. Every `*` is replaced by
    /// the seed's decimal text.
    pub path: String,
    /// File extension, without the dot.
    pub extension: String,
    /// Version policy used when encoding (decode reads it from the header).
    pub version: SaveVersion,
    /// Text encoding of the record lines.
    pub encoding: &'static Encoding,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            seed: 1,
            path: "file".to_string(),
            extension: "sav".to_string(),
            version: SaveVersion::default(),
            encoding: UTF_8,
        }
    }
}

impl SaveOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the caller seed.
    #[must_use]
    pub fn seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the path (without extension).
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the file extension.
    #[must_use]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Sets the version policy.
    #[must_use]
    pub fn version(mut self, version: SaveVersion) -> Self {
        self.version = version;
        self
    }

    /// Sets the text encoding of the record lines.
    #[must_use]
    pub fn encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Resolves the on-disk path: seed substitution plus extension.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        let name = self
            .path
            .replace(SEED_PLACEHOLDER, &self.seed.to_string());
        PathBuf::from(format!("{name}.{}", self.extension))
    }
}

/// Encodes `lines` into the save file described by `opts`.
///
/// Writes the two header segments with a generator seeded from the caller
/// seed, then one segment per line with the body generator the version
/// policy prescribes.
///
/// # Errors
///
/// Fails on I/O errors, on codec errors, or with
/// [`SaveError::InvalidSeed`] when the version policy cannot derive a body
/// seed from this seed (seed 0 with versions 2–4).
pub fn encode_save(lines: &[impl AsRef<str>], opts: &SaveOptions) -> SaveResult<()> {
    let target = opts.resolved_path();
    let destination = std::path::absolute(&target)?;
    let plan = plan_header(opts.version, opts.seed, &destination, Local::now())?;
    debug!(
        path = %target.display(),
        version = opts.version.number(),
        lines = lines.len(),
        "encoding save file"
    );

    let mut header_rng = SplitMix64::new(generator_seed(&derive_seed(opts.seed)));
    let mut data = encode_line(
        &opts.version.number().to_string(),
        &mut header_rng,
        opts.encoding,
    )?;
    data.extend(encode_line(
        &plan.tag.to_string(),
        &mut header_rng,
        opts.encoding,
    )?);

    let mut body_rng = SplitMix64::new(body_generator_seed(&plan.body_seed));
    for line in lines {
        data.extend(encode_line(line.as_ref(), &mut body_rng, opts.encoding)?);
    }

    fs::write(&target, &data)?;
    Ok(())
}

/// Decodes up to `limit` lines from the save file described by `opts`.
///
/// `None` decodes every line. No partial result is returned: any segment
/// that fails to decode fails the whole call.
///
/// # Errors
///
/// - [`SaveError::NotFound`] when the target file does not exist;
/// - [`SaveError::InvalidHeader`] when the header segments are missing,
///   not parseable as integers, or declare the sentinel version;
/// - [`SaveError::Codec`] when a segment cannot be reversed under the
///   declared encoding (corrupted file or wrong seed).
pub fn decode_save(opts: &SaveOptions, limit: Option<usize>) -> SaveResult<Vec<String>> {
    let target = opts.resolved_path();
    let bytes = read_save_bytes(&target)?;
    let segments = split_segments(&bytes);
    debug!(
        path = %target.display(),
        segments = segments.len(),
        "decoding save file"
    );
    if segments.len() < 2 {
        return Err(SaveError::invalid_header("missing header segments"));
    }

    let mut header_rng = SplitMix64::new(generator_seed(&derive_seed(opts.seed)));
    let version_text = decode_line(segments[0], &mut header_rng, opts.encoding)?;
    let version: i64 = version_text
        .parse()
        .map_err(|_| SaveError::invalid_header(format!("bad version tag {version_text:?}")))?;
    let tag_text = decode_line(segments[1], &mut header_rng, opts.encoding)?;
    let tag = BigInt::from_str(&tag_text)
        .map_err(|_| SaveError::invalid_header(format!("bad derived-seed tag {tag_text:?}")))?;

    let body_seed = recover_body_seed(version, tag, opts.seed, Local::now())?;
    let mut body_rng = SplitMix64::new(body_generator_seed(&body_seed));

    let mut lines = Vec::new();
    for segment in &segments[2..] {
        if limit.is_some_and(|n| lines.len() >= n) {
            break;
        }
        lines.push(decode_line(segment, &mut body_rng, opts.encoding)?);
    }
    Ok(lines)
}

/// Reads the whole file, mapping a missing file to [`SaveError::NotFound`].
fn read_save_bytes(target: &Path) -> SaveResult<Vec<u8>> {
    match fs::read(target) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(SaveError::not_found(target)),
        Err(e) => Err(e.into()),
    }
}

/// Splits raw file bytes into delimiter-terminated segments.
///
/// Each segment includes its trailing delimiter. Trailing bytes without a
/// delimiter are not a segment and are dropped.
fn split_segments(bytes: &[u8]) -> Vec<&[u8]> {
    let mut segments = Vec::new();
    let mut start = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        if byte == SEGMENT_DELIMITER {
            segments.push(&bytes[start..=i]);
            start = i + 1;
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_path_substitutes_seed() {
        let opts = SaveOptions::new().seed(42).path("slot*").extension("sav");
        assert_eq!(opts.resolved_path(), PathBuf::from("slot42.sav"));

        let opts = SaveOptions::new().seed(-7).path("a*b*");
        assert_eq!(opts.resolved_path(), PathBuf::from("a-7b-7.sav"));
    }

    #[test]
    fn resolved_path_without_placeholder() {
        let opts = SaveOptions::new().path("plain").extension("dat");
        assert_eq!(opts.resolved_path(), PathBuf::from("plain.dat"));
    }

    #[test]
    fn split_segments_keeps_delimiters() {
        let bytes = [1u8, 2, 10, 3, 10, 4];
        let segments = split_segments(&bytes);
        assert_eq!(segments, vec![&[1u8, 2, 10][..], &[3, 10][..]]);
    }

    #[test]
    fn split_segments_empty_input() {
        assert!(split_segments(&[]).is_empty());
    }

    #[test]
    fn default_options_match_documented_defaults() {
        let opts = SaveOptions::default();
        assert_eq!(opts.seed, 1);
        assert_eq!(opts.path, "file");
        assert_eq!(opts.extension, "sav");
        assert_eq!(opts.version, SaveVersion::V2);
        assert_eq!(opts.encoding, UTF_8);
    }
}
