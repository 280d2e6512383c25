//! # SaveCloak Codec
//!
//! Seed-keyed line obfuscation for SaveCloak save files.
//!
//! This crate is the leaf of the workspace: no I/O, no clock. It provides
//! the three deterministic building blocks the framing layer composes:
//!
//! - a seeded generator ([`SplitMix64`]) whose draw sequence keeps encode
//!   and decode symmetric,
//! - the big-integer seed stretch ([`derive_seed`]) mapping a small caller
//!   seed to a large derived seed,
//! - the per-line byte transform ([`encode_line`] / [`decode_line`]).
//!
//! This is obfuscation, not cryptography: output is non-obvious, not secure.
//!
//! ## Usage
//!
//! ```
//! use savecloak_codec::{derive_seed, generator_seed, SplitMix64};
//! use savecloak_codec::{decode_line, encode_line};
//!
//! let seed = generator_seed(&derive_seed(1));
//! let mut enc = SplitMix64::new(seed);
//! let segment = encode_line("hello", &mut enc, encoding_rs::UTF_8).unwrap();
//!
//! let mut dec = SplitMix64::new(seed);
//! let line = decode_line(&segment, &mut dec, encoding_rs::UTF_8).unwrap();
//! assert_eq!(line, "hello");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod line;
mod rng;
mod seed;

pub use error::{CodecError, CodecResult};
pub use line::{decode_line, encode_line, SEGMENT_DELIMITER};
pub use rng::SplitMix64;
pub use seed::{derive_seed, derive_seed_with, generator_seed, DEFAULT_EXPONENT, DEFAULT_OFFSET};
