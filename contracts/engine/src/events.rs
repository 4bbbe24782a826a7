//! Engine Events
//!
//! Every committed mutation emits one event. Events accumulate inside the
//! engine and are drained by the host with [`crate::VaultEngine::take_events`]
//! for off-chain indexing, audit trails and notifications.

use crate::types::{Address, VaultId};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Event discriminants for indexing and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum EventType {
    // Vault lifecycle (0x01 - 0x1F)
    VaultCreated = 0x01,
    CollateralDeposited = 0x02,
    InterestPaid = 0x03,
    DebtReimbursed = 0x04,
    VaultRefinanced = 0x05,

    // Sweep scheduler (0x20 - 0x3F)
    InterestSwept = 0x20,

    // Administration (0x80 - 0x9F)
    RateTableUpdated = 0x80,
    RatioBoundsUpdated = 0x81,
    RefinanceFeeUpdated = 0x82,
    CustodialSinkUpdated = 0x83,
    AdminChanged = 0x84,
    InterestCollected = 0x85,
    EmergencyRefund = 0x86,
}

/// Main event enum containing all engine events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum CdpEvent {
    // ============ Vault Lifecycle ============

    /// A new position was opened
    VaultCreated {
        vault_id: VaultId,
        owner: Address,
        collateral: u64,
        debt: u64,
        ratio: u64,
        at: u64,
    },

    /// Collateral and/or freshly minted debt added to a position
    CollateralDeposited {
        vault_id: VaultId,
        collateral_added: u64,
        debt_added: u64,
        new_ratio: u64,
        at: u64,
    },

    /// Outstanding interest paid in debt tokens, possibly by a third party
    InterestPaid {
        vault_id: VaultId,
        payer: Address,
        amount: u64,
        at: u64,
    },

    /// Principal reduced by an owner repayment
    DebtReimbursed {
        vault_id: VaultId,
        amount: u64,
        remaining_principal: u64,
        at: u64,
    },

    /// Debt capacity extracted at a new target ratio
    VaultRefinanced {
        vault_id: VaultId,
        new_ratio: u64,
        fee: u64,
        claimed: u64,
        at: u64,
    },

    // ============ Sweep Scheduler ============

    /// The round-robin target was force-settled out of its collateral
    InterestSwept {
        vault_id: VaultId,
        interest: u64,
        collateral_seized: u64,
        at: u64,
    },

    // ============ Administration ============

    /// The six-entry rate table was replaced
    RateTableUpdated { rates: [u64; 6] },

    /// The admissible collateral-ratio band was replaced
    RatioBoundsUpdated { min_ratio: u64, max_ratio: u64 },

    /// The refinance fee rate was replaced
    RefinanceFeeUpdated { fee_pct: u64 },

    /// The custodial sink address was replaced
    CustodialSinkUpdated { sink: Address },

    /// Admin identity handed over
    AdminChanged { old_admin: Address, new_admin: Address },

    /// Accumulated swept interest withdrawn to the custodial sink
    InterestCollected { amount: u64, sink: Address },

    /// A vault's collateral was emergency-refunded to its owner
    EmergencyRefund {
        vault_id: VaultId,
        owner: Address,
        amount: u64,
    },
}

impl CdpEvent {
    /// Returns the discriminant for indexing
    pub fn event_type(&self) -> EventType {
        match self {
            Self::VaultCreated { .. } => EventType::VaultCreated,
            Self::CollateralDeposited { .. } => EventType::CollateralDeposited,
            Self::InterestPaid { .. } => EventType::InterestPaid,
            Self::DebtReimbursed { .. } => EventType::DebtReimbursed,
            Self::VaultRefinanced { .. } => EventType::VaultRefinanced,
            Self::InterestSwept { .. } => EventType::InterestSwept,
            Self::RateTableUpdated { .. } => EventType::RateTableUpdated,
            Self::RatioBoundsUpdated { .. } => EventType::RatioBoundsUpdated,
            Self::RefinanceFeeUpdated { .. } => EventType::RefinanceFeeUpdated,
            Self::CustodialSinkUpdated { .. } => EventType::CustodialSinkUpdated,
            Self::AdminChanged { .. } => EventType::AdminChanged,
            Self::InterestCollected { .. } => EventType::InterestCollected,
            Self::EmergencyRefund { .. } => EventType::EmergencyRefund,
        }
    }
}
