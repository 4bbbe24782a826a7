//! Core Types for the Vault Engine
//!
//! Persisted ledger state: vault records, the global ledger, and the
//! admin-owned configuration. Everything here is serde/borsh
//! serializable so a host can durably snapshot the engine (this is
//! ledger state, not cache).

use crate::errors::{CdpError, CdpResult};
use crate::rates::RateTable;
use crate::{BTreeMap, Vec};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Type alias for identities (32-byte hash)
pub type Address = [u8; 32];

/// Type alias for vault identifiers. Ids are dense and monotonic:
/// `0..counter`, never reused.
pub type VaultId = u64;

// ============ Vault ============

/// A single collateralized debt position.
///
/// A vault is created once, mutated in place for the rest of its life and
/// never deleted; full reimbursement or an emergency refund only zero its
/// economically relevant fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct Vault {
    /// Unique, monotonically assigned identifier
    pub id: VaultId,
    /// Identity that created the position; only it may deposit,
    /// reimburse or refinance
    pub owner: Address,
    /// Debt token minted against this position, net of reimbursements,
    /// plus interest capitalized at deposit/refinance time
    pub debt_principal: u64,
    /// Units of locked collateral currently attributed to this position
    pub collateral_amount: u64,
    /// Collateral ratio recorded at the last mutation (100 = 1:1), not live
    pub collateral_ratio: u64,
    /// Timestamp at which the carry was last folded in or zeroed
    pub last_settled_at: u64,
    /// Interest locked in at the last mutation, added to newly computed
    /// live interest on the next query
    pub accrued_interest_carry: u64,
}

impl Vault {
    /// Creates a new vault record settled at `now`
    pub fn new(
        id: VaultId,
        owner: Address,
        debt_principal: u64,
        collateral_amount: u64,
        collateral_ratio: u64,
        now: u64,
    ) -> Self {
        Self {
            id,
            owner,
            debt_principal,
            collateral_amount,
            collateral_ratio,
            last_settled_at: now,
            accrued_interest_carry: 0,
        }
    }

    /// Returns true once the principal has been fully reimbursed. The
    /// slot is retained; the id is never reused.
    pub fn is_cleared(&self) -> bool {
        self.debt_principal == 0
    }
}

// ============ Ledger ============

/// Global position ledger: every vault, the owner index, the id counter
/// and the round-robin sweep state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct Ledger {
    /// All vaults ever created, keyed by dense id
    pub vaults: BTreeMap<VaultId, Vault>,
    /// Next id to assign
    pub counter: u64,
    /// Current round-robin sweep target. Valid whenever `counter > 0`.
    pub sweep_pointer: VaultId,
    /// Interest already swept out of vaults, in collateral units, pending
    /// withdrawal to the custodial sink
    pub total_collectable_interest: u64,
    /// Owner to owned vault ids, append-only
    pub owner_index: BTreeMap<Address, Vec<VaultId>>,
}

impl Ledger {
    /// Creates an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a vault by id
    pub fn vault(&self, id: VaultId) -> CdpResult<&Vault> {
        self.vaults.get(&id).ok_or(CdpError::VaultNotFound { vault_id: id })
    }

    /// Looks up a vault by id, mutably
    pub fn vault_mut(&mut self, id: VaultId) -> CdpResult<&mut Vault> {
        self.vaults
            .get_mut(&id)
            .ok_or(CdpError::VaultNotFound { vault_id: id })
    }

    /// Inserts a freshly created vault, advancing the counter and
    /// appending to the owner index. The vault's id must equal the
    /// current counter value.
    pub(crate) fn insert(&mut self, vault: Vault) {
        debug_assert_eq!(vault.id, self.counter);
        self.owner_index.entry(vault.owner).or_default().push(vault.id);
        self.counter += 1;
        self.vaults.insert(vault.id, vault);
    }

    /// Ids of all vaults ever created by `owner`, in creation order
    pub fn owned_by(&self, owner: &Address) -> &[VaultId] {
        self.owner_index.get(owner).map(Vec::as_slice).unwrap_or(&[])
    }
}

// ============ Configuration ============

/// Admin-owned engine configuration.
///
/// Mutated only through the administration surface; every computation
/// reads the current snapshot explicitly, there is no hidden global.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct EngineConfig {
    /// Minimum admissible collateral ratio
    pub min_ratio: u64,
    /// Maximum admissible collateral ratio
    pub max_ratio: u64,
    /// Refinance fee rate, applied against a base of 100 (the ratio
    /// scale): fee = principal * refinance_fee_pct / 100
    pub refinance_fee_pct: u64,
    /// Six-entry rate tier table, highest-collateralization tier first
    pub rate_table: RateTable,
    /// Account receiving collected interest and fees
    pub custodial_sink: Address,
    /// Admin identity, transferable only by itself
    pub admin: Address,
}

impl EngineConfig {
    /// Creates a configuration with compile-time defaults
    pub fn new(admin: Address, custodial_sink: Address) -> Self {
        use crate::constants::bounds;
        Self {
            min_ratio: bounds::DEFAULT_MIN_RATIO,
            max_ratio: bounds::DEFAULT_MAX_RATIO,
            refinance_fee_pct: bounds::DEFAULT_REFINANCE_FEE_PCT,
            rate_table: RateTable::default(),
            custodial_sink,
            admin,
        }
    }
}

// ============ Durable Snapshot ============

/// The complete durable state of the engine: configuration plus ledger.
///
/// Hosts persist this across restarts; adapters are reattached on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct EngineState {
    /// Current configuration snapshot
    pub config: EngineConfig,
    /// Position ledger
    pub ledger: Ledger,
}

#[cfg(feature = "std")]
impl EngineState {
    /// Serializes the snapshot with borsh
    pub fn to_bytes(&self) -> CdpResult<Vec<u8>> {
        borsh::to_vec(self).map_err(|_| CdpError::CorruptState)
    }

    /// Restores a snapshot serialized with [`EngineState::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> CdpResult<Self> {
        borsh::from_slice(bytes).map_err(|_| CdpError::CorruptState)
    }
}
