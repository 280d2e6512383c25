//! CLI command implementations.

pub mod decode;
pub mod encode;
pub mod scan;

use encoding_rs::Encoding;

/// Resolves a text-encoding label, failing on unknown labels.
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding, String> {
    Encoding::for_label(label.as_bytes())
        .ok_or_else(|| format!("unknown text encoding label: {label}"))
}
