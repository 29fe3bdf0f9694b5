//! Run progress counters

use serde::{Deserialize, Serialize};

/// Progress of one lookup run: deduplicated fetch count vs. settled count
///
/// The pair is always published as one value, so observers can never read
/// a `fulfilled` that belongs to a different `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupProgress {
    /// Number of distinct packages the run will fetch
    pub total: usize,
    /// Number of packages with a recorded outcome so far
    pub fulfilled: usize,
}

impl LookupProgress {
    /// Creates progress for a run over `total` distinct packages
    pub fn new(total: usize) -> Self {
        Self {
            total,
            fulfilled: 0,
        }
    }

    /// Whether every fetch of the run has a recorded outcome
    pub fn is_settled(&self) -> bool {
        self.fulfilled >= self.total
    }

    /// Fraction fulfilled in `[0.0, 1.0]`; an empty run counts as settled
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.fulfilled as f64 / self.total as f64
        }
    }
}
