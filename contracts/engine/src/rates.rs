//! Rate Tier Table
//!
//! Pure mapping from a vault's collateral ratio to the annual interest
//! rate it pays. Six fixed, non-overlapping, descending bands: the safer
//! the collateralization, the lower the rate.

use crate::constants::tiers;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Six-entry annual rate table in basis points, highest-collateralization
/// tier first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct RateTable(pub [u64; tiers::TIER_COUNT]);

impl Default for RateTable {
    fn default() -> Self {
        Self(tiers::DEFAULT_RATE_TABLE)
    }
}

impl RateTable {
    /// Creates a table from explicit per-tier rates
    pub fn new(rates: [u64; tiers::TIER_COUNT]) -> Self {
        Self(rates)
    }

    /// Annual rate in basis points for a position at `ratio`.
    ///
    /// Band boundaries are fixed constants, deliberately independent of
    /// the configured ratio bounds. When an admin widens the bounds past
    /// the banded range, out-of-band positions fall through to an edge
    /// tier: ratios above 500 still match tier 0 (the lowest rate) and
    /// everything below 171 lands in the tier-5 catch-all. Known
    /// limitation, kept as-is rather than re-deriving bands from the
    /// current bounds.
    pub fn rate_for(&self, ratio: u64) -> u64 {
        for (tier, threshold) in tiers::TIER_THRESHOLDS.iter().enumerate() {
            if ratio >= *threshold {
                return self.0[tier];
            }
        }
        self.0[tiers::TIER_COUNT - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: RateTable = RateTable([100, 200, 350, 500, 750, 1000]);

    #[test]
    fn test_band_lower_edges() {
        assert_eq!(TABLE.rate_for(401), 100);
        assert_eq!(TABLE.rate_for(351), 200);
        assert_eq!(TABLE.rate_for(301), 350);
        assert_eq!(TABLE.rate_for(251), 500);
        assert_eq!(TABLE.rate_for(171), 750);
    }

    #[test]
    fn test_band_upper_edges() {
        assert_eq!(TABLE.rate_for(500), 100);
        assert_eq!(TABLE.rate_for(400), 200);
        assert_eq!(TABLE.rate_for(350), 350);
        assert_eq!(TABLE.rate_for(300), 500);
        assert_eq!(TABLE.rate_for(250), 750);
    }

    #[test]
    fn test_catch_all_band() {
        assert_eq!(TABLE.rate_for(170), 1000);
        assert_eq!(TABLE.rate_for(150), 1000);
        assert_eq!(TABLE.rate_for(0), 1000);
    }

    #[test]
    fn test_ratio_above_banded_range_uses_tier_zero() {
        // Bounds widened past 500 leave positions outside any explicit
        // band; they match the first threshold and pay the tier-0 rate.
        assert_eq!(TABLE.rate_for(501), 100);
        assert_eq!(TABLE.rate_for(10_000), 100);
    }
}
