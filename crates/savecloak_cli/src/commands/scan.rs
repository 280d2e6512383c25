//! Scan command: discover and decode save files in a directory.

use savecloak_core::{read_save_files, read_save_files_with_seed, ScanResults};
use std::error::Error;
use std::path::Path;

/// Runs the scan command in pattern or fixed-seed mode.
pub fn run(
    pattern: Option<&str>,
    seed: Option<i64>,
    ext: &str,
    dir: &Path,
    max_files: Option<u64>,
    limit: Option<usize>,
) -> Result<(), Box<dyn Error>> {
    let results = match (pattern, seed) {
        (Some(pattern), _) => read_save_files(pattern, ext, dir, max_files, limit)?,
        (None, Some(seed)) => read_save_files_with_seed(seed, ext, dir, max_files, limit)?,
        (None, None) => return Err("scan needs either --pattern or --seed".into()),
    };

    print_results(&results);
    Ok(())
}

fn print_results(results: &ScanResults) {
    if results.is_empty() {
        println!("no save files found");
        return;
    }
    for (key, lines) in results {
        match lines {
            Some(lines) => {
                println!("{key}: {} line(s)", lines.len());
                for line in lines {
                    println!("  {line}");
                }
            }
            None => println!("{key}: <corrupt>"),
        }
    }
}
