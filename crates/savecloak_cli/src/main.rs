//! SaveCloak CLI
//!
//! Command-line tools for seed-keyed save files.
//!
//! # Commands
//!
//! - `encode` - Obfuscate lines into a save file
//! - `decode` - Recover lines from a save file
//! - `scan` - Discover and decode save files in a directory
//! - `version` - Show version information

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// SaveCloak command-line save-file tools.
#[derive(Parser)]
#[command(name = "savecloak")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Obfuscate lines into a save file
    Encode {
        /// Lines to store; read from stdin when omitted
        lines: Vec<String>,

        /// Seed keying the file
        #[arg(short, long, default_value = "1")]
        seed: i64,

        /// Path and file name without extension ('*' becomes the seed)
        #[arg(short, long, default_value = "file")]
        path: String,

        /// File extension
        #[arg(short, long, default_value = "sav")]
        ext: String,

        /// Header policy version (1-4; other values fall back to plain)
        #[arg(long, default_value = "2")]
        save_version: i64,

        /// Text encoding label of the lines
        #[arg(long, default_value = "utf-8")]
        encoding: String,
    },

    /// Recover lines from a save file
    Decode {
        /// Seed the file was encoded with
        #[arg(short, long, default_value = "1")]
        seed: i64,

        /// Path and file name without extension ('*' becomes the seed)
        #[arg(short, long, default_value = "file")]
        path: String,

        /// File extension
        #[arg(short, long, default_value = "sav")]
        ext: String,

        /// Decode only the first N lines
        #[arg(short, long)]
        limit: Option<usize>,

        /// Text encoding label of the lines
        #[arg(long, default_value = "utf-8")]
        encoding: String,
    },

    /// Discover and decode save files in a directory
    Scan {
        /// File-name pattern with '*' seed placeholders
        #[arg(short = 'n', long, conflicts_with = "seed")]
        pattern: Option<String>,

        /// Fixed seed to try against every file
        #[arg(short, long)]
        seed: Option<i64>,

        /// File extension to look for
        #[arg(short, long, default_value = "sav")]
        ext: String,

        /// Directory to search
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Highest seed (pattern mode) or file count (seed mode) to accept
        #[arg(short, long)]
        max_files: Option<u64>,

        /// Decode only the first N lines per file
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Encode {
            lines,
            seed,
            path,
            ext,
            save_version,
            encoding,
        } => commands::encode::run(lines, seed, &path, &ext, save_version, &encoding)?,
        Commands::Decode {
            seed,
            path,
            ext,
            limit,
            encoding,
        } => commands::decode::run(seed, &path, &ext, limit, &encoding)?,
        Commands::Scan {
            pattern,
            seed,
            ext,
            dir,
            max_files,
            limit,
        } => commands::scan::run(pattern.as_deref(), seed, &ext, &dir, max_files, limit)?,
        Commands::Version => {
            println!("SaveCloak CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("SaveCloak Core v{}", savecloak_core::VERSION);
        }
    }

    Ok(())
}
