//! # SaveCloak Core
//!
//! Versioned save-file framing and recovery.
//!
//! This crate turns the line codec from `savecloak_codec` into whole save
//! files:
//!
//! - [`encode_save`] / [`decode_save`]: write and recover a seed-keyed
//!   save file, options bundled in [`SaveOptions`];
//! - [`SaveVersion`]: the four header policies deciding how the body
//!   generator's seed is derived (plain, timestamped, path-bound, and
//!   path-bound-with-daily-expiry);
//! - [`read_save_files`] / [`read_save_files_with_seed`]: directory
//!   scanning with per-file fault tolerance.
//!
//! Everything is synchronous and single-threaded; each call owns its
//! generators and its file handle. Files are buffered whole in memory,
//! which is an accepted ceiling for save-file sizes.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod save;
mod scan;
mod version;

pub use error::{SaveError, SaveResult};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub use save::{decode_save, encode_save, SaveOptions, SEED_PLACEHOLDER};
pub use scan::{read_save_files, read_save_files_with_seed, ScanResults};
pub use version::{SaveVersion, SENTINEL_VERSION};
