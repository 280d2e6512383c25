//! Encode command: obfuscate lines into a save file.

use savecloak_core::{encode_save, SaveOptions, SaveVersion};
use std::error::Error;
use std::io::{self, BufRead};

/// Runs the encode command.
///
/// Lines come from the arguments, or from stdin when none are given.
pub fn run(
    lines: Vec<String>,
    seed: i64,
    path: &str,
    ext: &str,
    save_version: i64,
    encoding: &str,
) -> Result<(), Box<dyn Error>> {
    let lines = if lines.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<Result<Vec<_>, _>>()?
    } else {
        lines
    };

    let opts = SaveOptions::new()
        .seed(seed)
        .path(path)
        .extension(ext)
        .version(SaveVersion::from_number(save_version))
        .encoding(super::encoding_for_label(encoding)?);
    encode_save(&lines, &opts)?;

    println!(
        "wrote {} line(s) to {}",
        lines.len(),
        opts.resolved_path().display()
    );
    Ok(())
}
