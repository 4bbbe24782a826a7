//! CDP Vault Accounting Engine
//!
//! Position ledger and interest bookkeeping for a collateralized debt
//! position protocol: users lock collateral, mint debt tokens against it
//! while their collateral ratio stays inside the configured band, and pay
//! interest at a rate chosen by the ratio tier their vault occupies.
//!
//! ## Components
//!
//! - **Rate Tier Table**: fixed six-band mapping from collateral ratio to
//!   annual interest rate
//! - **Position Ledger**: dense-id vault registry with an owner index
//! - **Interest Accrual**: pure snapshot-plus-clock interest model, settled
//!   on every mutation
//! - **Lifecycle Operations**: create, deposit, pay-interest, reimburse,
//!   refinance - atomic, all-or-nothing
//! - **Sweep Scheduler**: round-robin forced settlement of stale positions,
//!   paid out of vault collateral
//! - **Administration**: rate table, ratio bounds, fee, sink and admin
//!   identity mutations plus emergency fund recovery
//!
//! External collaborators (collateral transfer, debt-token ledger, price
//! oracle) are reached through the adapter traits in [`adapters`]; the
//! engine itself never moves funds.
//!
//! All ledger state is serde/borsh serializable so hosts can persist an
//! [`EngineState`] snapshot across restarts.
//!
//! This crate is `no_std` compatible for WASM compilation when built
//! without the default `std` feature.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Re-export collections for submodules based on feature
#[cfg(not(feature = "std"))]
pub use alloc::{collections::BTreeMap, vec::Vec};
#[cfg(feature = "std")]
pub use std::{collections::BTreeMap, vec::Vec};

pub mod adapters;
pub mod admin;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod events;
pub mod interest;
pub mod rates;
pub mod sweep;
pub mod types;
pub mod validation;


// Re-exports for convenience
pub use adapters::{CollateralAdapter, DebtTokenAdapter, PriceOracle};
pub use engine::VaultEngine;
pub use errors::{AmountErrorReason, CdpError, CdpResult};
pub use events::{CdpEvent, EventType};
pub use interest::{live_interest, total_interest};
pub use rates::RateTable;
pub use types::{Address, EngineConfig, EngineState, Ledger, Vault, VaultId};
