//! Decode command: recover lines from a save file.

use savecloak_core::{decode_save, SaveOptions};
use std::error::Error;

/// Runs the decode command, printing one recovered line per output line.
pub fn run(
    seed: i64,
    path: &str,
    ext: &str,
    limit: Option<usize>,
    encoding: &str,
) -> Result<(), Box<dyn Error>> {
    let opts = SaveOptions::new()
        .seed(seed)
        .path(path)
        .extension(ext)
        .encoding(super::encoding_for_label(encoding)?);

    for line in decode_save(&opts, limit)? {
        println!("{line}");
    }
    Ok(())
}
