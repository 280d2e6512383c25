//! Deterministic generator driving the line codec.
//!
//! Uses splitmix64 for stable output across platforms. This is not
//! cryptographically secure and must never be used for secrets: the only
//! contract is that the same seed yields the same draw sequence forever,
//! which is what keeps encode and decode symmetric.

/// Deterministic generator with a single 64-bit state.
///
/// Every draw advances the state by exactly one step. Decode must issue the
/// same sequence of [`draw_range`](Self::draw_range) calls as encode,
/// call-for-call, or the two sides desynchronise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Create a new generator from a 64-bit seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next 64-bit value from the splitmix64 finaliser.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Draw a value in the inclusive range `[lo, hi]`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `lo > hi`.
    #[inline]
    pub fn draw_range(&mut self, lo: i64, hi: i64) -> i64 {
        debug_assert!(lo <= hi);
        let span = (hi - lo) as u64 + 1;
        lo + (self.next_u64() % span) as i64
    }
}
