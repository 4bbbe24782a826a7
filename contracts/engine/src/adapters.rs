//! External Adapter Traits
//!
//! The engine never moves funds itself; it drives three external
//! collaborators through these capabilities. A single collateral adapter
//! hides whether the collateral asset is a native value transfer or a
//! pull-based token, so the engine logic exists exactly once.
//!
//! Adapter calls are synchronous and fallible; a failure aborts the whole
//! operation with no ledger effect.

use crate::errors::CdpResult;
use crate::types::Address;

/// Moves collateral-asset units between the engine's custody and user
/// accounts. Abstracts native value transfer vs. a pull-based token.
pub trait CollateralAdapter {
    /// Pulls `amount` collateral units from `from` into engine custody
    fn pull_in(&mut self, from: Address, amount: u64) -> CdpResult<()>;

    /// Pushes `amount` collateral units from engine custody to `to`
    fn push_out(&mut self, to: Address, amount: u64) -> CdpResult<()>;
}

/// Mint/burn/transfer surface of the debt-token ledger
pub trait DebtTokenAdapter {
    /// Mints `amount` debt tokens to `to`
    fn mint(&mut self, to: Address, amount: u64) -> CdpResult<()>;

    /// Burns `amount` debt tokens held by `from`
    fn burn(&mut self, from: Address, amount: u64) -> CdpResult<()>;

    /// Moves `amount` debt tokens from `from` to `to`
    fn transfer_from(&mut self, from: Address, to: Address, amount: u64) -> CdpResult<()>;
}

/// Read-only price feed: the value of one collateral unit in debt-token
/// terms, scaled by [`crate::constants::scale::ORACLE_SCALE`].
///
/// Trusted input; no staleness or deviation check is performed here.
pub trait PriceOracle {
    /// Current collateral-to-debt exchange rate
    fn current_rate(&self) -> CdpResult<u64>;
}
