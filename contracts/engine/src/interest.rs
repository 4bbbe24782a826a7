//! Interest Accrual Model
//!
//! Computes owed interest for a position at any query time from its
//! stored snapshot. Pure over the snapshot and the clock; every mutating
//! lifecycle operation settles through here before it changes the
//! snapshot, otherwise interest would silently reset on every mutation.

use crate::constants::{scale, time};
use crate::errors::{CdpError, CdpResult};
use crate::rates::RateTable;
use crate::types::Vault;

/// Interest accrued since the last settlement, excluding the carry.
///
/// `per_annum = principal * rate / 10_000`, prorated linearly over the
/// seconds elapsed since `last_settled_at`.
pub fn live_interest(vault: &Vault, table: &RateTable, now: u64) -> CdpResult<u64> {
    if vault.debt_principal == 0 {
        return Ok(0);
    }
    let elapsed = now
        .checked_sub(vault.last_settled_at)
        .ok_or(CdpError::Underflow)?;
    if elapsed == 0 {
        return Ok(0);
    }

    let rate_bps = table.rate_for(vault.collateral_ratio);
    let per_annum = (vault.debt_principal as u128)
        .checked_mul(rate_bps as u128)
        .ok_or(CdpError::Overflow)?
        / scale::BPS_DENOMINATOR as u128;
    let live = per_annum
        .checked_mul(elapsed as u128)
        .ok_or(CdpError::Overflow)?
        / time::SECONDS_PER_YEAR as u128;

    Ok(live.min(u64::MAX as u128) as u64)
}

/// Total owed interest at `now`: live interest plus the carry locked in
/// at the last mutation. Monotonically non-decreasing between
/// settlements.
pub fn total_interest(vault: &Vault, table: &RateTable, now: u64) -> CdpResult<u64> {
    let live = live_interest(vault, table, now)?;
    vault
        .accrued_interest_carry
        .checked_add(live)
        .ok_or(CdpError::Overflow)
}

/// Folds live interest into the carry and resets the accrual clock.
///
/// Used by reimburse, which reduces principal without collecting the
/// interest; the interest stays owed, it is only locked in.
pub(crate) fn settle(vault: &mut Vault, table: &RateTable, now: u64) -> CdpResult<()> {
    let live = live_interest(vault, table, now)?;
    vault.accrued_interest_carry = vault
        .accrued_interest_carry
        .checked_add(live)
        .ok_or(CdpError::Overflow)?;
    vault.last_settled_at = now;
    Ok(())
}

/// Settles, then folds the whole carry into the principal.
///
/// Deposit and refinance capitalize outstanding interest so the combined
/// ratio they validate covers everything the position owes.
pub(crate) fn capitalize(vault: &mut Vault, table: &RateTable, now: u64) -> CdpResult<()> {
    settle(vault, table, now)?;
    vault.debt_principal = vault
        .debt_principal
        .checked_add(vault.accrued_interest_carry)
        .ok_or(CdpError::Overflow)?;
    vault.accrued_interest_carry = 0;
    Ok(())
}
