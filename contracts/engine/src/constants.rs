//! Protocol Constants
//!
//! All magic numbers and configuration defaults for the vault engine.
//! Amounts are u64 base units, timestamps are u64 seconds, ratios are
//! percentage-scaled integers (100 = 1:1 collateralization).

/// Fixed-point scales
pub mod scale {
    /// Oracle price scale. The oracle quotes the value of one collateral
    /// unit in debt-token terms with 9 decimals.
    pub const ORACLE_SCALE: u64 = 1_000_000_000;

    /// Collateral ratio precision (100 = 100%, i.e. 1:1)
    pub const RATIO_PRECISION: u64 = 100;

    /// Basis points denominator
    pub const BPS_DENOMINATOR: u64 = 10_000;
}

/// Time-related constants
pub mod time {
    /// Seconds in a (non-leap) year, the accrual period base
    pub const SECONDS_PER_YEAR: u64 = 31_536_000;

    /// Grace period before the sweep scheduler may force-settle a
    /// position (90 days)
    pub const SWEEP_GRACE_SECS: u64 = 90 * 24 * 60 * 60;
}

/// Rate tier bands
pub mod tiers {
    /// Number of rate tiers
    pub const TIER_COUNT: usize = 6;

    /// Lower bound of each explicit band, highest collateralization first.
    /// Ratios below the last threshold fall into the tier-5 catch-all.
    ///
    /// These are fixed constants, deliberately independent of the
    /// configured ratio bounds (see `RateTable::rate_for`).
    pub const TIER_THRESHOLDS: [u64; TIER_COUNT - 1] = [401, 351, 301, 251, 171];

    /// Default annual rates in basis points, one per tier. Safer
    /// collateralization pays less.
    pub const DEFAULT_RATE_TABLE: [u64; TIER_COUNT] = [100, 200, 350, 500, 750, 1000];
}

/// Collateral ratio bounds and fees
pub mod bounds {
    /// Default minimum admissible collateral ratio (110%)
    pub const DEFAULT_MIN_RATIO: u64 = 110;

    /// Default maximum admissible collateral ratio (500%)
    pub const DEFAULT_MAX_RATIO: u64 = 500;

    /// Default refinance fee, applied against a base of 100 (2%)
    pub const DEFAULT_REFINANCE_FEE_PCT: u64 = 2;
}
