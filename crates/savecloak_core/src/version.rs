//! Versioned header policies.
//!
//! A save file opens with two obfuscated header segments: the version tag
//! and the derived-seed tag. The version selects how the body generator's
//! seed is derived (from the caller seed alone, from the wall clock, or
//! from the destination path) and how a reader reconstructs that seed from
//! the stored tag.

use crate::error::{SaveError, SaveResult};
use chrono::{DateTime, Datelike, Local, Timelike};
use num_bigint::{BigInt, BigUint};
use num_traits::{FromPrimitive, ToPrimitive, Zero};
use savecloak_codec::{derive_seed, derive_seed_with};
use std::path::Path;

/// Multiplier applied to the stripped path/time product for versions 3/4.
const PATH_TAG_MULTIPLIER: f64 = 15_439_813.0;

/// Version tag that can never be recovered; a header declaring it is
/// malformed.
pub const SENTINEL_VERSION: i64 = -1;

/// Seed-derivation policy for the body generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveVersion {
    /// Body seed derived from the caller seed alone.
    V1,
    /// Body seed folds in the wall-clock timestamp.
    V2,
    /// Body seed folds in the timestamp and the destination path.
    V3,
    /// Like [`V3`](Self::V3), but the recovery rule shifts every calendar
    /// day, so the file only decodes on the day it was written.
    V4,
    /// Any other tag; falls back to the plain derivation.
    Other(i64),
}

impl SaveVersion {
    /// Converts a numeric tag to a version policy.
    #[must_use]
    pub fn from_number(n: i64) -> Self {
        match n {
            1 => Self::V1,
            2 => Self::V2,
            3 => Self::V3,
            4 => Self::V4,
            other => Self::Other(other),
        }
    }

    /// Converts the version policy to its numeric tag.
    #[must_use]
    pub const fn number(self) -> i64 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
            Self::V3 => 3,
            Self::V4 => 4,
            Self::Other(n) => n,
        }
    }
}

impl Default for SaveVersion {
    fn default() -> Self {
        Self::V2
    }
}

/// Header plan for one encode call.
///
/// `tag` is the derived-seed tag written as the second header segment.
/// `body_seed` seeds the body generator; for version 4 it differs from the
/// stored tag.
#[derive(Debug, Clone)]
pub(crate) struct HeaderPlan {
    pub tag: BigInt,
    pub body_seed: BigInt,
}

/// Computes the header tag and body seed for an encode call.
pub(crate) fn plan_header(
    version: SaveVersion,
    seed: i64,
    destination: &Path,
    now: DateTime<Local>,
) -> SaveResult<HeaderPlan> {
    match version {
        SaveVersion::V1 => {
            let derived = BigInt::from(derive_seed(seed));
            Ok(HeaderPlan {
                tag: BigInt::from(SENTINEL_VERSION),
                body_seed: derived,
            })
        }
        SaveVersion::V2 => {
            let divisor = derive_seed_with(seed, 17, 0.587);
            if divisor.is_zero() {
                return Err(SaveError::invalid_seed(
                    "seed derives to zero, version 2 needs a nonzero divisor",
                ));
            }
            let tag = BigInt::from(BigUint::from(timestamp_digits(now)) / divisor);
            Ok(HeaderPlan {
                body_seed: tag.clone(),
                tag,
            })
        }
        SaveVersion::V3 => {
            let tag = BigInt::from(path_time_tag(seed, destination, now)?);
            Ok(HeaderPlan {
                body_seed: tag.clone(),
                tag,
            })
        }
        SaveVersion::V4 => {
            let tag = BigInt::from(path_time_tag(seed, destination, now)?);
            let body_seed = &tag * calendar_day_sum(now);
            Ok(HeaderPlan { tag, body_seed })
        }
        SaveVersion::Other(_) => {
            let derived = BigInt::from(derive_seed(seed));
            Ok(HeaderPlan {
                tag: derived.clone(),
                body_seed: derived,
            })
        }
    }
}

/// Reconstructs the body generator seed from a decoded header.
///
/// Inverts [`plan_header`]: the sentinel tag fails, version 4 re-applies the
/// current calendar-day factor, tags outside 2..=4 ignore the stored value.
pub(crate) fn recover_body_seed(
    version: i64,
    stored_tag: BigInt,
    seed: i64,
    now: DateTime<Local>,
) -> SaveResult<BigInt> {
    if version == SENTINEL_VERSION {
        return Err(SaveError::invalid_header(
            "header declares the unrecoverable sentinel version",
        ));
    }
    if version == 4 {
        return Ok(stored_tag * calendar_day_sum(now));
    }
    if !(2..=4).contains(&version) {
        return Ok(BigInt::from(derive_seed(seed)));
    }
    Ok(stored_tag)
}

/// Reduces a (possibly negative) body seed to a generator seed.
pub(crate) fn body_generator_seed(body_seed: &BigInt) -> u64 {
    savecloak_codec::generator_seed(body_seed.magnitude())
}

/// Local timestamp as the integer `YYYYMMDDHHMMSS`.
fn timestamp_digits(now: DateTime<Local>) -> u64 {
    let date = u64::from(now.year().unsigned_abs()) * 10_000
        + u64::from(now.month()) * 100
        + u64::from(now.day());
    let time = u64::from(now.hour()) * 10_000
        + u64::from(now.minute()) * 100
        + u64::from(now.second());
    date * 1_000_000 + time
}

/// Sum of the local year, month and day numbers.
fn calendar_day_sum(now: DateTime<Local>) -> i64 {
    i64::from(now.year()) + i64::from(now.month()) + i64::from(now.day())
}

/// Order-dependent product hash over the UTF-8 bytes of a path.
///
/// Every intermediate product is re-parsed from its decimal text with all
/// `0` digits removed. Lossy by construction; stored tags depend on every
/// quirk of it, so it must not change.
fn path_hash(destination: &Path) -> BigUint {
    let mut acc = BigUint::from(1u32);
    for &byte in destination.to_string_lossy().as_bytes() {
        acc *= byte;
        let stripped: String = acc.to_string().chars().filter(|&c| c != '0').collect();
        acc = stripped.parse().unwrap_or_else(|_| BigUint::zero());
    }
    acc
}

/// Derived-seed tag for versions 3 and 4.
///
/// `round(stripped(path_hash * timestamp_digits / derive_seed(seed, 2, ..)) * 15439813)`
/// with `stripped` removing every `0` character (and any `E+`) from the
/// decimal text before reparsing.
fn path_time_tag(seed: i64, destination: &Path, now: DateTime<Local>) -> SaveResult<BigUint> {
    let divisor = derive_seed_with(seed, 2, 0.587)
        .to_f64()
        .unwrap_or(f64::INFINITY);
    if divisor == 0.0 {
        return Err(SaveError::invalid_seed(
            "seed derives to zero, versions 3 and 4 need a nonzero divisor",
        ));
    }
    let time_factor = timestamp_digits(now) as f64 / divisor;
    let product = path_hash(destination).to_f64().unwrap_or(f64::INFINITY) * time_factor;
    if !product.is_finite() {
        return Err(SaveError::invalid_seed(
            "path/time product is not representable",
        ));
    }

    let stripped: String = format!("{product}").replace('0', "").replace("E+", "");
    let value: f64 = stripped.parse().map_err(|_| {
        SaveError::invalid_seed("stripped path/time product is not a number")
    })?;
    BigUint::from_f64((value * PATH_TAG_MULTIPLIER).round())
        .ok_or_else(|| SaveError::invalid_seed("path/time tag is not a non-negative integer"))
}
