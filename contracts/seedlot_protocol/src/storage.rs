//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by Seedlot:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key          | Type             | Description                          |
//! |--------------|------------------|--------------------------------------|
//! | `Config`     | `ContractConfig` | Admin, stablecoin, pricing constants |
//! | `OfferTail`  | `u32`            | Next free offer catalog slot         |
//! | `LotTail`    | `u32`            | Next free lots ledger slot           |
//! | `NextMint`   | `u64`            | Next contract-local asset id         |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                    | Type                | Description                    |
//! |------------------------|---------------------|--------------------------------|
//! | `Offer(index)`         | `Offer`             | Offer catalog slot             |
//! | `Lot(index)`           | `Lot`               | Lots ledger slot               |
//! | `Cert(manager)`        | `CertificationTier` | Manager certification          |
//! | `OrderBal(offer, who)` | `u64`               | Unfulfilled order tokens       |
//! | `LotBal(lot, who)`     | `u64`               | Lot tokens held                |
//! | `PendingFees(manager)` | `i128`              | Upfront fees of unsettled lots |
//! | `Debt(manager)`        | `i128`              | Unrecovered clawback shortfall |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! Catalog and ledger slots are append-only: a slot below its tail is always
//! populated, and nothing ever deletes one.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{CertificationTier, ContractConfig, Lot, Offer};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

/// Lifetime of the fee allowance a manager grants at preparation. A denial
/// settled after it lapses records the fee as manager debt instead.
pub const FEE_ALLOWANCE_LEDGERS: u32 = 5 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Contract configuration (Instance).
    Config,
    /// Offer catalog tail pointer (Instance).
    OfferTail,
    /// Lots ledger tail pointer (Instance).
    LotTail,
    /// Asset id allocator (Instance).
    NextMint,
    /// Offer catalog slot (Persistent).
    Offer(u32),
    /// Lots ledger slot (Persistent).
    Lot(u32),
    /// Certification of a manager (Persistent).
    Cert(Address),
    /// Order-token balance keyed by (offer index, holder) (Persistent).
    OrderBal(u32, Address),
    /// Lot-token balance keyed by (lot index, holder) (Persistent).
    LotBal(u32, Address),
    /// Sum of upfront fees on a manager's unsettled lots (Persistent).
    PendingFees(Address),
    /// Stablecoin units a manager still owes escrow (Persistent).
    Debt(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn save_config(env: &Env, config: &ContractConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

/// Returns `None` before `initialize`.
pub fn load_config(env: &Env) -> Option<ContractConfig> {
    let config = env.storage().instance().get(&DataKey::Config);
    if config.is_some() {
        bump_instance(env);
    }
    config
}

fn read_counter<T>(env: &Env, key: &DataKey) -> T
where
    T: soroban_sdk::TryFromVal<Env, soroban_sdk::Val> + Default,
{
    env.storage().instance().get(key).unwrap_or_default()
}

pub fn offer_tail(env: &Env) -> u32 {
    read_counter(env, &DataKey::OfferTail)
}

pub fn lot_tail(env: &Env) -> u32 {
    read_counter(env, &DataKey::LotTail)
}

/// Reads, increments and stores the asset id allocator.
/// Returns the id to use for the *current* mint (pre-increment value).
pub fn next_mint_id(env: &Env) -> u64 {
    bump_instance(env);
    let current: u64 = read_counter(env, &DataKey::NextMint);
    env.storage()
        .instance()
        .set(&DataKey::NextMint, &(current + 1));
    current
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Writes `offer` at the catalog tail and advances the tail.
/// The caller has already checked capacity.
pub fn append_offer(env: &Env, offer: &Offer) {
    let key = DataKey::Offer(offer.index);
    env.storage().persistent().set(&key, offer);
    bump_persistent(env, &key);
    env.storage()
        .instance()
        .set(&DataKey::OfferTail, &(offer.index + 1));
    bump_instance(env);
}

pub fn load_offer(env: &Env, index: u32) -> Option<Offer> {
    let key = DataKey::Offer(index);
    let offer = env.storage().persistent().get(&key);
    if offer.is_some() {
        bump_persistent(env, &key);
    }
    offer
}

/// Writes `lot` at the ledger tail and advances the tail.
/// The caller has already checked capacity.
pub fn append_lot(env: &Env, lot: &Lot) {
    save_lot(env, lot);
    env.storage()
        .instance()
        .set(&DataKey::LotTail, &(lot.index + 1));
    bump_instance(env);
}

/// Overwrite an existing lot slot (status changes only).
pub fn save_lot(env: &Env, lot: &Lot) {
    let key = DataKey::Lot(lot.index);
    env.storage().persistent().set(&key, lot);
    bump_persistent(env, &key);
}

pub fn load_lot(env: &Env, index: u32) -> Option<Lot> {
    let key = DataKey::Lot(index);
    let lot = env.storage().persistent().get(&key);
    if lot.is_some() {
        bump_persistent(env, &key);
    }
    lot
}

pub fn load_certification(env: &Env, manager: &Address) -> CertificationTier {
    let key = DataKey::Cert(manager.clone());
    match env.storage().persistent().get(&key) {
        Some(tier) => {
            bump_persistent(env, &key);
            tier
        }
        None => CertificationTier::Uncertified,
    }
}

pub fn save_certification(env: &Env, manager: &Address, tier: CertificationTier) {
    let key = DataKey::Cert(manager.clone());
    env.storage().persistent().set(&key, &tier);
    bump_persistent(env, &key);
}

fn load_balance(env: &Env, key: &DataKey) -> u64 {
    match env.storage().persistent().get(key) {
        Some(balance) => {
            bump_persistent(env, key);
            balance
        }
        None => 0,
    }
}

/// Zero balances are removed rather than stored.
fn save_balance(env: &Env, key: &DataKey, balance: u64) {
    if balance == 0 {
        env.storage().persistent().remove(key);
    } else {
        env.storage().persistent().set(key, &balance);
        bump_persistent(env, key);
    }
}

pub fn order_balance(env: &Env, offer_index: u32, holder: &Address) -> u64 {
    load_balance(env, &DataKey::OrderBal(offer_index, holder.clone()))
}

pub fn set_order_balance(env: &Env, offer_index: u32, holder: &Address, balance: u64) {
    save_balance(env, &DataKey::OrderBal(offer_index, holder.clone()), balance);
}

pub fn lot_balance(env: &Env, lot_index: u32, holder: &Address) -> u64 {
    load_balance(env, &DataKey::LotBal(lot_index, holder.clone()))
}

pub fn set_lot_balance(env: &Env, lot_index: u32, holder: &Address, balance: u64) {
    save_balance(env, &DataKey::LotBal(lot_index, holder.clone()), balance);
}

fn load_amount(env: &Env, key: &DataKey) -> i128 {
    match env.storage().persistent().get(key) {
        Some(amount) => {
            bump_persistent(env, key);
            amount
        }
        None => 0,
    }
}

fn save_amount(env: &Env, key: &DataKey, amount: i128) {
    if amount == 0 {
        env.storage().persistent().remove(key);
    } else {
        env.storage().persistent().set(key, &amount);
        bump_persistent(env, key);
    }
}

pub fn pending_fees(env: &Env, manager: &Address) -> i128 {
    load_amount(env, &DataKey::PendingFees(manager.clone()))
}

pub fn set_pending_fees(env: &Env, manager: &Address, amount: i128) {
    save_amount(env, &DataKey::PendingFees(manager.clone()), amount);
}

pub fn debt(env: &Env, manager: &Address) -> i128 {
    load_amount(env, &DataKey::Debt(manager.clone()))
}

pub fn set_debt(env: &Env, manager: &Address, amount: i128) {
    save_amount(env, &DataKey::Debt(manager.clone()), amount);
}
