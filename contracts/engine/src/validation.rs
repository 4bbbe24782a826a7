//! Validation Helpers
//!
//! The `check!` macro keeps precondition sites to a single line: every
//! lifecycle operation front-loads its checks so that no state is touched
//! once the first mutation happens.

/// Check a condition and return the given error if it fails.
///
/// ```rust,ignore
/// check!(amount > 0, CdpError::ZeroAmount);
/// check!(
///     ratio >= config.min_ratio,
///     CdpError::InvalidCollateral { ratio, min_ratio, max_ratio }
/// );
/// ```
#[macro_export]
macro_rules! check {
    ($condition:expr, $error:expr) => {
        if !($condition) {
            return Err($error);
        }
    };
}

pub use check;
