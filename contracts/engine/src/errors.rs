//! Error Types for the Vault Engine
//!
//! Typed errors for every abort path. All errors are local, synchronous
//! and non-retryable: no operation partially applies on error, and the
//! caller is expected to adjust inputs and resubmit.

use crate::types::{Address, VaultId};

/// Result type alias for engine operations
pub type CdpResult<T> = Result<T, CdpError>;

/// Main error enum for all vault engine errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CdpError {
    // ============ Vault Errors ============
    /// No vault exists with the given id
    VaultNotFound { vault_id: VaultId },

    /// Resulting collateral ratio falls outside the configured bounds
    InvalidCollateral {
        ratio: u64,
        min_ratio: u64,
        max_ratio: u64,
    },

    // ============ Amount Errors ============
    /// Zero or out-of-range numeric input
    InvalidAmount { amount: u64, reason: AmountErrorReason },

    /// The operation would have no economic effect
    ZeroAmount,

    // ============ Authorization Errors ============
    /// Caller is not the vault owner or the admin
    InvalidCaller { expected: Address, actual: Address },

    // ============ Adapter Errors ============
    /// A downstream transfer, mint or burn was refused. The whole
    /// operation aborts with no ledger effect.
    TransferFailed { from: Address, to: Address, amount: u64 },

    // ============ Math Errors ============
    /// Arithmetic overflow occurred
    Overflow,

    /// Arithmetic underflow occurred
    Underflow,

    /// Division by zero
    DivisionByZero,

    // ============ State Errors ============
    /// Persisted state snapshot could not be decoded
    CorruptState,
}

/// Reasons for amount-related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountErrorReason {
    /// Amount is zero when non-zero required
    Zero,
    /// Amount exceeds the admissible maximum
    TooLarge,
    /// Amount below the admissible minimum
    TooSmall,
    /// Amounts are inconsistent with each other
    Mismatch,
}

impl CdpError {
    /// Returns a stable error code for logging/debugging
    pub fn code(&self) -> &'static str {
        match self {
            Self::VaultNotFound { .. } => "E001_VAULT_NOT_FOUND",
            Self::InvalidCollateral { .. } => "E002_INVALID_COLLATERAL",
            Self::InvalidAmount { .. } => "E010_INVALID_AMOUNT",
            Self::ZeroAmount => "E011_ZERO_AMOUNT",
            Self::InvalidCaller { .. } => "E020_INVALID_CALLER",
            Self::TransferFailed { .. } => "E030_TRANSFER_FAILED",
            Self::Overflow => "E040_OVERFLOW",
            Self::Underflow => "E041_UNDERFLOW",
            Self::DivisionByZero => "E042_DIV_ZERO",
            Self::CorruptState => "E050_CORRUPT_STATE",
        }
    }

    /// Returns true if the caller can fix the error by adjusting inputs
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidCollateral { .. } => true, // Adjust collateral or debt
            Self::InvalidAmount { .. } => true,     // Adjust the amount
            Self::ZeroAmount => true,               // Wait for interest to accrue
            Self::TransferFailed { .. } => true,    // Fund or approve the account
            _ => false,
        }
    }
}
