//! Round-Robin Sweep Scheduler
//!
//! Keeps a single rotating pointer into the position ledger. An external
//! scheduler polls [`VaultEngine::needs_sweep`] and invokes
//! [`VaultEngine::sweep`] at whatever frequency it likes; the action
//! re-checks the trigger itself and no-ops when the pointed position is
//! current, so speculative and repeated calls are always safe.
//!
//! The owed interest of a stale position is liquidated directly from its
//! collateral, converted at the oracle rate - not paid in debt tokens.
//! This bounds how long any position can dodge settlement: with N vaults
//! and a 90-day grace period, every position is force-settled within
//! N x 90 days even if its owner never shows up, while cooperative owners
//! who pay ahead of their turn skip the queue (pay-interest advances the
//! pointer when it services the current target).
//!
//! The collateral deduction uses the spot oracle rate with no slippage or
//! staleness protection, so a swept vault's collateral can disagree with
//! its recorded ratio until the next mutation recomputes it. Latent
//! inconsistency window, kept as specified.

use crate::adapters::{CollateralAdapter, DebtTokenAdapter, PriceOracle};
use crate::constants::{scale, time};
use crate::engine::VaultEngine;
use crate::errors::{CdpError, CdpResult};
use crate::events::CdpEvent;
use crate::interest;

impl<C, D, O> VaultEngine<C, D, O>
where
    C: CollateralAdapter,
    D: DebtTokenAdapter,
    O: PriceOracle,
{
    /// Read-only probe for the external scheduler: true iff the pointed
    /// vault has been settled before and its grace period has elapsed.
    pub fn needs_sweep(&self, now: u64) -> bool {
        match self.ledger.vaults.get(&self.ledger.sweep_pointer) {
            Some(vault) => {
                vault.last_settled_at > 0
                    && now.saturating_sub(vault.last_settled_at) > time::SWEEP_GRACE_SECS
            }
            None => false,
        }
    }

    /// Force-settles the pointed vault out of its own collateral and
    /// advances the pointer. Returns the collateral units seized, or
    /// `None` when the trigger condition does not hold (no-op).
    pub fn sweep(&mut self, now: u64) -> CdpResult<Option<u64>> {
        if !self.needs_sweep(now) {
            return Ok(None);
        }

        let rate = self.oracle.current_rate()?;
        let table = self.config.rate_table;
        let id = self.ledger.sweep_pointer;

        let mut vault = self.ledger.vault(id)?.clone();
        let owed = interest::total_interest(&vault, &table, now)?;

        // Interest is owed in debt-token terms; convert to collateral
        // units at the spot rate, clamped to what the vault holds so the
        // deduction below cannot underflow
        let units = if owed == 0 {
            0
        } else {
            if rate == 0 {
                return Err(CdpError::DivisionByZero);
            }
            let converted = (owed as u128)
                .checked_mul(scale::ORACLE_SCALE as u128)
                .ok_or(CdpError::Overflow)?
                / rate as u128;
            (converted.min(u64::MAX as u128) as u64).min(vault.collateral_amount)
        };

        vault.collateral_amount -= units;
        vault.accrued_interest_carry = 0;
        vault.last_settled_at = now;
        let collected = self
            .ledger
            .total_collectable_interest
            .checked_add(units)
            .ok_or(CdpError::Overflow)?;

        *self.ledger.vault_mut(id)? = vault;
        self.ledger.total_collectable_interest = collected;
        self.advance_sweep_pointer();
        self.events.push(CdpEvent::InterestSwept {
            vault_id: id,
            interest: owed,
            collateral_seized: units,
            at: now,
        });
        Ok(Some(units))
    }

    /// Moves the rotating pointer to the next id, wrapping at the
    /// counter. No-op while the ledger is empty.
    pub(crate) fn advance_sweep_pointer(&mut self) {
        if self.ledger.counter == 0 {
            return;
        }
        self.ledger.sweep_pointer = (self.ledger.sweep_pointer + 1) % self.ledger.counter;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{FixedOracle, MockCollateral, MockDebtToken};
    use crate::constants::scale::ORACLE_SCALE;
    use crate::constants::time::{SECONDS_PER_YEAR, SWEEP_GRACE_SECS};
    use crate::types::{Address, EngineConfig};

    const ALICE: Address = [1u8; 32];
    const BOB: Address = [2u8; 32];
    const ADMIN: Address = [9u8; 32];
    const SINK: Address = [8u8; 32];
    const PAR: u64 = ORACLE_SCALE;

    fn engine() -> VaultEngine<MockCollateral, MockDebtToken, FixedOracle> {
        VaultEngine::new(
            EngineConfig::new(ADMIN, SINK),
            MockCollateral::default(),
            MockDebtToken::default(),
            FixedOracle(PAR),
        )
    }

    #[test]
    fn test_probe_false_on_empty_ledger() {
        let engine = engine();
        assert!(!engine.needs_sweep(u64::MAX));
    }

    #[test]
    fn test_probe_respects_grace_period() {
        let mut engine = engine();
        engine.create(1_500, 1_000, ALICE, 100).unwrap();

        assert!(!engine.needs_sweep(100 + SWEEP_GRACE_SECS));
        assert!(engine.needs_sweep(100 + SWEEP_GRACE_SECS + 1));
    }

    #[test]
    fn test_probe_ignores_never_settled_sentinel() {
        let mut engine = engine();
        // Settlement timestamp zero reads as "never settled"
        engine.create(1_500, 1_000, ALICE, 0).unwrap();
        assert!(!engine.needs_sweep(u64::MAX));
    }

    #[test]
    fn test_sweep_is_noop_inside_grace() {
        let mut engine = engine();
        engine.create(1_500, 1_000, ALICE, 100).unwrap();

        assert_eq!(engine.sweep(200).unwrap(), None);
        assert_eq!(engine.vault(0).unwrap().collateral_amount, 1_500);
        assert!(engine.take_events().len() == 1); // just the creation
    }

    #[test]
    fn test_sweep_seizes_collateral_and_settles() {
        let mut engine = engine();
        engine.create(1_500, 1_000, ALICE, 1).unwrap();

        // One year later: 1000 * 10% = 100 debt tokens owed, worth 100
        // collateral units at par
        let now = 1 + SECONDS_PER_YEAR;
        let seized = engine.sweep(now).unwrap().unwrap();
        assert_eq!(seized, 100);

        let vault = engine.vault(0).unwrap();
        assert_eq!(vault.collateral_amount, 1_400);
        assert_eq!(vault.accrued_interest_carry, 0);
        assert_eq!(vault.last_settled_at, now);
        assert_eq!(engine.owed_interest(0, now).unwrap(), 0);
        assert_eq!(engine.ledger().total_collectable_interest, 100);
    }

    #[test]
    fn test_sweep_conversion_uses_oracle_rate() {
        let mut engine = engine();
        engine.create(1_500, 1_000, ALICE, 1).unwrap();

        // Collateral is worth twice the debt token: half the units cover
        // the same owed interest
        engine.oracle = FixedOracle(2 * PAR);
        let seized = engine.sweep(1 + SECONDS_PER_YEAR).unwrap().unwrap();
        assert_eq!(seized, 50);
    }

    #[test]
    fn test_sweep_clamps_to_available_collateral() {
        let mut engine = engine();
        engine.create(1_500, 1_000, ALICE, 1).unwrap();

        // Twenty years of unpaid 10% interest exceeds the vault's collateral
        let now = 1 + 20 * SECONDS_PER_YEAR;
        let seized = engine.sweep(now).unwrap().unwrap();
        assert_eq!(seized, 1_500);
        assert_eq!(engine.vault(0).unwrap().collateral_amount, 0);
    }

    #[test]
    fn test_single_vault_pointer_never_leaves() {
        let mut engine = engine();
        engine.create(1_500, 1_000, ALICE, 1).unwrap();

        let mut now = 1;
        for _ in 0..3 {
            now += SWEEP_GRACE_SECS + 1;
            assert!(engine.sweep(now).unwrap().is_some());
            assert_eq!(engine.ledger().sweep_pointer, 0);
        }
    }

    #[test]
    fn test_round_robin_visits_in_order_and_wraps() {
        let mut engine = engine();
        engine.create(1_500, 1_000, ALICE, 1).unwrap();
        engine.create(1_500, 1_000, BOB, 1).unwrap();
        assert_eq!(engine.ledger().sweep_pointer, 0);

        let now = 1 + SWEEP_GRACE_SECS + 1;
        assert!(engine.sweep(now).unwrap().is_some());
        assert_eq!(engine.ledger().sweep_pointer, 1);
        assert!(engine.sweep(now).unwrap().is_some());
        // Wrapped through id 1 back to 0
        assert_eq!(engine.ledger().sweep_pointer, 0);
    }

    #[test]
    fn test_sweep_skips_nothing_after_self_payment() {
        let mut engine = engine();
        engine.create(1_500, 1_000, ALICE, 1).unwrap();
        engine.create(1_500, 1_000, BOB, 1).unwrap();
        engine.create(1_500, 1_000, ALICE, 1).unwrap();

        // Vault 0 pays ahead of its turn; the pointer hands the next
        // sweep to vault 1
        engine.pay_interest(0, ALICE, 1 + SECONDS_PER_YEAR).unwrap();
        assert_eq!(engine.ledger().sweep_pointer, 1);

        let now = 1 + SWEEP_GRACE_SECS + 1;
        assert!(engine.sweep(now).unwrap().is_some());
        assert_eq!(engine.ledger().sweep_pointer, 2);
        assert!(engine.sweep(now).unwrap().is_some());
        assert_eq!(engine.ledger().sweep_pointer, 0);
    }

    #[test]
    fn test_sweep_passes_over_cleared_vault_without_stalling() {
        let mut engine = engine();
        engine.create(1_500, 1_000, ALICE, 1).unwrap();
        engine.create(1_500, 1_000, BOB, 1).unwrap();

        // Vault 0 fully reimbursed right away: nothing owed, but the
        // pointer must still move on
        engine.reimburse(0, 1_000, ALICE, 1).unwrap();

        let now = 1 + SWEEP_GRACE_SECS + 1;
        assert_eq!(engine.sweep(now).unwrap(), Some(0));
        assert_eq!(engine.ledger().sweep_pointer, 1);
        assert_eq!(engine.vault(0).unwrap().collateral_amount, 1_500);
    }
}
