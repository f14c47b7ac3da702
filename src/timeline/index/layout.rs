//! Positional divisors for the digit index.

/// Largest exponent whose `10^(e+1) - 1` still fits in a `u64`.
pub const MAX_EXPONENT: u32 = 18;

/// Errors from [`IndexLayout::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("top_exponent {top} exceeds the maximum of {max}")]
    TopTooLarge { top: u32, max: u32 },

    #[error("resolution_exponent {resolution} is above top_exponent {top}")]
    ResolutionAboveTop { resolution: u32, top: u32 },
}

/// Which decimal digits of an offset the trie branches on.
///
/// Divisors run from `10^top_exponent` down to `10^resolution_exponent`, one
/// trie level each, most significant first. Digits below the resolution are
/// never indexed and only resolved by scanning the event store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexLayout {
    top_exponent: u32,
    resolution_exponent: u32,
}

impl Default for IndexLayout {
    /// Six levels (`10^8` .. `10^3`): whole-second buckets, offsets up to
    /// 999,999,999ms.
    fn default() -> Self {
        Self {
            top_exponent: 8,
            resolution_exponent: 3,
        }
    }
}

impl IndexLayout {
    pub fn new(top_exponent: u32, resolution_exponent: u32) -> Result<Self, LayoutError> {
        if top_exponent > MAX_EXPONENT {
            return Err(LayoutError::TopTooLarge {
                top: top_exponent,
                max: MAX_EXPONENT,
            });
        }
        if resolution_exponent > top_exponent {
            return Err(LayoutError::ResolutionAboveTop {
                resolution: resolution_exponent,
                top: top_exponent,
            });
        }
        Ok(Self {
            top_exponent,
            resolution_exponent,
        })
    }

    pub fn top_exponent(&self) -> u32 {
        self.top_exponent
    }

    pub fn resolution_exponent(&self) -> u32 {
        self.resolution_exponent
    }

    /// Number of trie levels between the root and the leaves.
    pub fn depth(&self) -> usize {
        (self.top_exponent - self.resolution_exponent + 1) as usize
    }

    /// Width of one bucket in milliseconds.
    pub fn resolution_ms(&self) -> u64 {
        10u64.pow(self.resolution_exponent)
    }

    /// Largest offset whose leading digit still fits the top level.
    pub fn max_offset_ms(&self) -> u64 {
        // 10^19 overflows, but 10^19 - 1 does not
        (0..=self.top_exponent).fold(0u64, |acc, _| acc * 10 + 9)
    }

    /// Decimal digits of `offset_ms` at each indexed position, most
    /// significant first. Callers keep offsets within [`Self::max_offset_ms`].
    pub fn digits(&self, offset_ms: u64) -> impl Iterator<Item = usize> {
        (self.resolution_exponent..=self.top_exponent)
            .rev()
            .map(move |exponent| ((offset_ms / 10u64.pow(exponent)) % 10) as usize)
    }
}
