//! Administration Surface
//!
//! Privileged configuration mutations and emergency fund recovery. A
//! single admin identity, transferable only by itself, guards every
//! operation here. All mutations are synchronous and immediate - there
//! is no timelock, which is a deliberate centralization trade-off of
//! this design, flagged rather than papered over.

use crate::adapters::{CollateralAdapter, DebtTokenAdapter, PriceOracle};
use crate::check;
use crate::errors::{AmountErrorReason, CdpError, CdpResult};
use crate::events::CdpEvent;
use crate::rates::RateTable;
use crate::types::{Address, VaultId};

impl<C, D, O> crate::engine::VaultEngine<C, D, O>
where
    C: CollateralAdapter,
    D: DebtTokenAdapter,
    O: PriceOracle,
{
    /// Replaces the six-entry rate tier table
    pub fn set_rate_table(&mut self, table: RateTable, caller: Address) -> CdpResult<()> {
        self.require_admin(&caller)?;
        self.config.rate_table = table;
        self.events.push(CdpEvent::RateTableUpdated { rates: table.0 });
        Ok(())
    }

    /// Replaces the admissible collateral-ratio band.
    ///
    /// The rate tier bands are fixed constants and are not re-derived
    /// from the new bounds; positions outside the banded range fall into
    /// an edge tier (see [`RateTable::rate_for`]).
    pub fn set_ratio_bounds(&mut self, min_ratio: u64, max_ratio: u64, caller: Address) -> CdpResult<()> {
        self.require_admin(&caller)?;
        check!(
            min_ratio > 0,
            CdpError::InvalidAmount {
                amount: min_ratio,
                reason: AmountErrorReason::Zero,
            }
        );
        check!(
            min_ratio < max_ratio,
            CdpError::InvalidAmount {
                amount: max_ratio,
                reason: AmountErrorReason::Mismatch,
            }
        );
        self.config.min_ratio = min_ratio;
        self.config.max_ratio = max_ratio;
        self.events.push(CdpEvent::RatioBoundsUpdated { min_ratio, max_ratio });
        Ok(())
    }

    /// Replaces the refinance fee rate (applied against a base of 100)
    pub fn set_refinance_fee(&mut self, fee_pct: u64, caller: Address) -> CdpResult<()> {
        self.require_admin(&caller)?;
        self.config.refinance_fee_pct = fee_pct;
        self.events.push(CdpEvent::RefinanceFeeUpdated { fee_pct });
        Ok(())
    }

    /// Replaces the custodial sink receiving interest and fees
    pub fn set_custodial_sink(&mut self, sink: Address, caller: Address) -> CdpResult<()> {
        self.require_admin(&caller)?;
        self.config.custodial_sink = sink;
        self.events.push(CdpEvent::CustodialSinkUpdated { sink });
        Ok(())
    }

    /// Hands the admin identity over to `new_admin`
    pub fn transfer_admin(&mut self, new_admin: Address, caller: Address) -> CdpResult<()> {
        self.require_admin(&caller)?;
        let old_admin = self.config.admin;
        self.config.admin = new_admin;
        self.events.push(CdpEvent::AdminChanged { old_admin, new_admin });
        Ok(())
    }

    /// Withdraws all swept interest (collateral units) to the custodial
    /// sink, zeroing the accumulator. Returns the amount withdrawn.
    pub fn collect_interest(&mut self, caller: Address) -> CdpResult<u64> {
        self.require_admin(&caller)?;
        let amount = self.ledger.total_collectable_interest;
        check!(amount > 0, CdpError::ZeroAmount);

        let sink = self.config.custodial_sink;
        self.collateral.push_out(sink, amount)?;

        self.ledger.total_collectable_interest = 0;
        self.events.push(CdpEvent::InterestCollected { amount, sink });
        Ok(amount)
    }

    /// Empties a vault's collateral back to its owner, zeroing it. Last
    /// resort for funds that cannot otherwise move, e.g. behind a
    /// permanently broken downstream adapter. Returns the refunded
    /// amount.
    pub fn emergency_refund(&mut self, id: VaultId, caller: Address) -> CdpResult<u64> {
        self.require_admin(&caller)?;
        let vault = self.ledger.vault(id)?;
        let amount = vault.collateral_amount;
        let owner = vault.owner;
        check!(amount > 0, CdpError::ZeroAmount);

        self.collateral.push_out(owner, amount)?;

        self.ledger.vault_mut(id)?.collateral_amount = 0;
        self.events.push(CdpEvent::EmergencyRefund {
            vault_id: id,
            owner,
            amount,
        });
        Ok(amount)
    }
}
