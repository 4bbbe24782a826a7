//! Vault Lifecycle Engine
//!
//! Orchestrates the five lifecycle operations over the position ledger:
//! create, deposit, pay-interest, reimburse and refinance. Each operation
//! re-derives accrued interest, validates the collateral-ratio invariant,
//! drives the external adapters and only then commits a new snapshot.
//!
//! ## Atomicity
//!
//! Operations are all-or-nothing. Validation and interest arithmetic run
//! on a scratch copy of the vault, adapter calls happen next, and the
//! ledger commit comes last - commits are infallible in-memory writes, so
//! a failed precondition or a refused adapter call leaves no partial
//! state behind. The `&mut self` receiver serializes overlapping
//! submissions; the host supplies the single-writer execution model.

use crate::adapters::{CollateralAdapter, DebtTokenAdapter, PriceOracle};
use crate::constants::scale;
use crate::errors::{AmountErrorReason, CdpError, CdpResult};
use crate::events::CdpEvent;
use crate::interest;
use crate::types::{Address, EngineConfig, EngineState, Ledger, Vault, VaultId};
use crate::{check, Vec};

/// The vault accounting engine, generic over its three external
/// collaborators.
pub struct VaultEngine<C, D, O> {
    pub(crate) config: EngineConfig,
    pub(crate) ledger: Ledger,
    pub(crate) collateral: C,
    pub(crate) debt_token: D,
    pub(crate) oracle: O,
    pub(crate) events: Vec<CdpEvent>,
}

impl<C, D, O> VaultEngine<C, D, O>
where
    C: CollateralAdapter,
    D: DebtTokenAdapter,
    O: PriceOracle,
{
    /// Creates an engine with an empty ledger
    pub fn new(config: EngineConfig, collateral: C, debt_token: D, oracle: O) -> Self {
        Self {
            config,
            ledger: Ledger::new(),
            collateral,
            debt_token,
            oracle,
            events: Vec::new(),
        }
    }

    /// Restores an engine from a durable snapshot, reattaching adapters
    pub fn from_state(state: EngineState, collateral: C, debt_token: D, oracle: O) -> Self {
        Self {
            config: state.config,
            ledger: state.ledger,
            collateral,
            debt_token,
            oracle,
            events: Vec::new(),
        }
    }

    /// Snapshot of the durable state for persistence
    pub fn state(&self) -> EngineState {
        EngineState {
            config: self.config.clone(),
            ledger: self.ledger.clone(),
        }
    }

    /// Current configuration snapshot
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read access to the position ledger
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Drains the pending event buffer
    pub fn take_events(&mut self) -> Vec<CdpEvent> {
        core::mem::take(&mut self.events)
    }

    // ========================================================================
    // Lifecycle Operations
    // ========================================================================

    /// Opens a new position: locks `collateral_in` and mints `debt_out`
    /// to the caller. Returns the assigned vault id.
    pub fn create(
        &mut self,
        collateral_in: u64,
        debt_out: u64,
        caller: Address,
        now: u64,
    ) -> CdpResult<VaultId> {
        check!(
            collateral_in > 0,
            CdpError::InvalidAmount {
                amount: collateral_in,
                reason: AmountErrorReason::Zero,
            }
        );
        check!(
            debt_out > 0,
            CdpError::InvalidAmount {
                amount: debt_out,
                reason: AmountErrorReason::Zero,
            }
        );

        let rate = self.oracle.current_rate()?;
        let ratio = compute_ratio(collateral_in, debt_out, rate)?;
        self.check_ratio_bounds(ratio)?;

        self.collateral.pull_in(caller, collateral_in)?;
        self.debt_token.mint(caller, debt_out)?;

        let id = self.ledger.counter;
        if id == 0 {
            // First vault ever seeds the round-robin target
            self.ledger.sweep_pointer = id;
        }
        self.ledger
            .insert(Vault::new(id, caller, debt_out, collateral_in, ratio, now));
        self.events.push(CdpEvent::VaultCreated {
            vault_id: id,
            owner: caller,
            collateral: collateral_in,
            debt: debt_out,
            ratio,
            at: now,
        });
        Ok(id)
    }

    /// Adds collateral and/or mints additional debt against an existing
    /// position. Outstanding interest is capitalized into the principal
    /// before the combined ratio is validated.
    pub fn deposit(
        &mut self,
        id: VaultId,
        collateral_in: u64,
        debt_out: u64,
        caller: Address,
        now: u64,
    ) -> CdpResult<()> {
        check!(collateral_in > 0 || debt_out > 0, CdpError::ZeroAmount);

        let rate = self.oracle.current_rate()?;
        let table = self.config.rate_table;

        let mut vault = self.ledger.vault(id)?.clone();
        require_owner(&vault, &caller)?;
        interest::capitalize(&mut vault, &table, now)?;

        let new_collateral = vault
            .collateral_amount
            .checked_add(collateral_in)
            .ok_or(CdpError::Overflow)?;
        let new_debt = vault
            .debt_principal
            .checked_add(debt_out)
            .ok_or(CdpError::Overflow)?;
        let ratio = compute_ratio(new_collateral, new_debt, rate)?;
        self.check_ratio_bounds(ratio)?;

        if collateral_in > 0 {
            self.collateral.pull_in(caller, collateral_in)?;
        }
        if debt_out > 0 {
            self.debt_token.mint(caller, debt_out)?;
        }

        vault.collateral_amount = new_collateral;
        vault.debt_principal = new_debt;
        vault.collateral_ratio = ratio;
        *self.ledger.vault_mut(id)? = vault;
        self.events.push(CdpEvent::CollateralDeposited {
            vault_id: id,
            collateral_added: collateral_in,
            debt_added: debt_out,
            new_ratio: ratio,
            at: now,
        });
        Ok(())
    }

    /// Pays the position's outstanding interest in debt tokens, pulled
    /// from the caller into the custodial sink. Deliberately
    /// permissionless: a third party may service someone else's position.
    /// Returns the amount paid.
    pub fn pay_interest(&mut self, id: VaultId, caller: Address, now: u64) -> CdpResult<u64> {
        let table = self.config.rate_table;
        let sink = self.config.custodial_sink;

        let owed = interest::total_interest(self.ledger.vault(id)?, &table, now)?;
        check!(owed > 0, CdpError::ZeroAmount);

        self.debt_token.transfer_from(caller, sink, owed)?;

        let vault = self.ledger.vault_mut(id)?;
        vault.accrued_interest_carry = 0;
        vault.last_settled_at = now;
        if self.ledger.sweep_pointer == id {
            // Obligation is current again, hand the turn to the next vault
            self.advance_sweep_pointer();
        }
        self.events.push(CdpEvent::InterestPaid {
            vault_id: id,
            payer: caller,
            amount: owed,
            at: now,
        });
        Ok(owed)
    }

    /// Repays `amount` of the position's principal, burning the tokens.
    /// The ratio is not re-validated: reducing debt only improves
    /// collateralization.
    pub fn reimburse(
        &mut self,
        id: VaultId,
        amount: u64,
        caller: Address,
        now: u64,
    ) -> CdpResult<()> {
        check!(
            amount > 0,
            CdpError::InvalidAmount {
                amount,
                reason: AmountErrorReason::Zero,
            }
        );

        let table = self.config.rate_table;
        let mut vault = self.ledger.vault(id)?.clone();
        require_owner(&vault, &caller)?;
        check!(
            amount <= vault.debt_principal,
            CdpError::InvalidAmount {
                amount,
                reason: AmountErrorReason::TooLarge,
            }
        );

        // Interest stays owed as carry even when the principal hits zero
        interest::settle(&mut vault, &table, now)?;
        // Safe: amount bounded by debt_principal above
        vault.debt_principal -= amount;

        self.debt_token.burn(caller, amount)?;

        let remaining = vault.debt_principal;
        *self.ledger.vault_mut(id)? = vault;
        self.events.push(CdpEvent::DebtReimbursed {
            vault_id: id,
            amount,
            remaining_principal: remaining,
            at: now,
        });
        Ok(())
    }

    /// Re-targets the position at `new_ratio` and mints the newly
    /// available debt capacity to the owner, minus the refinance fee.
    /// Lets an owner extract value when collateral has appreciated,
    /// without adding collateral. Returns the claimed amount.
    pub fn refinance(
        &mut self,
        id: VaultId,
        new_ratio: u64,
        caller: Address,
        now: u64,
    ) -> CdpResult<u64> {
        self.check_ratio_bounds(new_ratio)?;

        let rate = self.oracle.current_rate()?;
        let table = self.config.rate_table;
        let fee_pct = self.config.refinance_fee_pct;
        let sink = self.config.custodial_sink;

        let mut vault = self.ledger.vault(id)?.clone();
        require_owner(&vault, &caller)?;

        // Maximum debt sustainable at the requested ratio
        let total = max_debt_at(vault.collateral_amount, rate, new_ratio)?;
        let fee = mul_pct(vault.debt_principal, fee_pct)?;
        // Debt larger than the sustainable total minus the fee is invalid,
        // never a wraparound
        let claimable = total
            .checked_sub(vault.debt_principal)
            .and_then(|headroom| headroom.checked_sub(fee))
            .filter(|claimable| *claimable > 0)
            .ok_or(CdpError::ZeroAmount)?;

        interest::capitalize(&mut vault, &table, now)?;
        vault.collateral_ratio = new_ratio;
        vault.debt_principal = vault
            .debt_principal
            .checked_add(claimable)
            .ok_or(CdpError::Overflow)?;

        if fee > 0 {
            self.debt_token.transfer_from(caller, sink, fee)?;
        }
        self.debt_token.mint(caller, claimable)?;

        *self.ledger.vault_mut(id)? = vault;
        self.events.push(CdpEvent::VaultRefinanced {
            vault_id: id,
            new_ratio,
            fee,
            claimed: claimable,
            at: now,
        });
        Ok(claimable)
    }

    // ========================================================================
    // Query Surface
    // ========================================================================

    /// Total number of positions ever created
    pub fn vault_count(&self) -> u64 {
        self.ledger.counter
    }

    /// Looks up a position by id
    pub fn vault(&self, id: VaultId) -> CdpResult<&Vault> {
        self.ledger.vault(id)
    }

    /// Ids of every position `owner` has created, in creation order
    pub fn vaults_of(&self, owner: &Address) -> &[VaultId] {
        self.ledger.owned_by(owner)
    }

    /// Total interest the position owes at `now` (live plus carry)
    pub fn owed_interest(&self, id: VaultId, now: u64) -> CdpResult<u64> {
        interest::total_interest(self.ledger.vault(id)?, &self.config.rate_table, now)
    }

    /// Current oracle exchange rate (ORACLE_SCALE scaled)
    pub fn exchange_rate(&self) -> CdpResult<u64> {
        self.oracle.current_rate()
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    pub(crate) fn check_ratio_bounds(&self, ratio: u64) -> CdpResult<()> {
        check!(
            ratio >= self.config.min_ratio && ratio <= self.config.max_ratio,
            CdpError::InvalidCollateral {
                ratio,
                min_ratio: self.config.min_ratio,
                max_ratio: self.config.max_ratio,
            }
        );
        Ok(())
    }

    pub(crate) fn require_admin(&self, caller: &Address) -> CdpResult<()> {
        check!(
            *caller == self.config.admin,
            CdpError::InvalidCaller {
                expected: self.config.admin,
                actual: *caller,
            }
        );
        Ok(())
    }
}

/// Checks the caller against the stored owner
fn require_owner(vault: &Vault, caller: &Address) -> CdpResult<()> {
    check!(
        vault.owner == *caller,
        CdpError::InvalidCaller {
            expected: vault.owner,
            actual: *caller,
        }
    );
    Ok(())
}

/// Collateral ratio of `collateral` against `debt` at the given oracle
/// rate, percentage-scaled (100 = 1:1). Zero debt reads as an unbounded
/// ratio, which the bound check then rejects.
pub(crate) fn compute_ratio(collateral: u64, debt: u64, rate: u64) -> CdpResult<u64> {
    if debt == 0 {
        return Ok(u64::MAX);
    }
    let value = (collateral as u128)
        .checked_mul(rate as u128)
        .ok_or(CdpError::Overflow)?;
    let ratio = value
        .checked_mul(scale::RATIO_PRECISION as u128)
        .ok_or(CdpError::Overflow)?
        / scale::ORACLE_SCALE as u128
        / debt as u128;
    Ok(ratio.min(u64::MAX as u128) as u64)
}

/// Maximum debt sustainable by `collateral` at `ratio`, the inverse of
/// [`compute_ratio`]
pub(crate) fn max_debt_at(collateral: u64, rate: u64, ratio: u64) -> CdpResult<u64> {
    if ratio == 0 {
        return Err(CdpError::DivisionByZero);
    }
    let value = (collateral as u128)
        .checked_mul(rate as u128)
        .ok_or(CdpError::Overflow)?;
    let max_debt = value
        .checked_mul(scale::RATIO_PRECISION as u128)
        .ok_or(CdpError::Overflow)?
        / scale::ORACLE_SCALE as u128
        / ratio as u128;
    Ok(max_debt.min(u64::MAX as u128) as u64)
}

/// `amount * pct / 100` with checked intermediates
pub(crate) fn mul_pct(amount: u64, pct: u64) -> CdpResult<u64> {
    let scaled = (amount as u128)
        .checked_mul(pct as u128)
        .ok_or(CdpError::Overflow)?
        / scale::RATIO_PRECISION as u128;
    Ok(scaled.min(u64::MAX as u128) as u64)
}
