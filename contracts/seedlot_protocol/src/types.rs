//! # Types
//!
//! Shared data structures used across all modules of the Seedlot protocol.
//!
//! ## Certification as a tagged lattice
//!
//! A manager's certification is a [`CertificationTier`], not a token amount.
//! The legal transitions are:
//!
//! ```text
//! Uncertified ──► Tier1 ──► Tier2 ──► Tier3 ──► Tier4
//!      │            │         │         │         │
//!      └────────────┴─────────┴────┬────┴─────────┘
//!                                  ▼
//!                             Decertified ──► Tier1
//! ```
//!
//! The 0..=5 balance encoding survives only as the read accessor
//! `certification_balance`, for wallets that display the certification asset.
//!
//! ## Lot status as a finite-state machine
//!
//! ```text
//! Unconfirmed ──► Confirmed
//!      └────────► Denied
//! ```
//!
//! Both `Confirmed` and `Denied` are terminal. An `Unconfirmed` lot's tokens
//! are frozen in the investor's hands.

use soroban_sdk::{contracttype, Address, String};

/// Highest tier a manager can be certified at.
pub const MAX_TIER: u32 = 4;

/// Token-balance value that encodes [`CertificationTier::Decertified`].
pub const DECERTIFIED_BALANCE: u32 = 5;

/// Certification level of a farm manager.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CertificationTier {
    Uncertified,
    Tier1,
    Tier2,
    Tier3,
    Tier4,
    /// Revoked. Can only move back to `Tier1`.
    Decertified,
}

impl CertificationTier {
    /// Tier for a numeric level in `1..=4`.
    pub fn from_level(level: u32) -> Option<Self> {
        match level {
            1 => Some(Self::Tier1),
            2 => Some(Self::Tier2),
            3 => Some(Self::Tier3),
            4 => Some(Self::Tier4),
            _ => None,
        }
    }

    /// Numeric level the next certification must carry.
    ///
    /// A decertified manager starts over at tier 1.
    pub fn next_level(&self) -> u32 {
        match self {
            Self::Uncertified | Self::Decertified => 1,
            Self::Tier1 => 2,
            Self::Tier2 => 3,
            Self::Tier3 => 4,
            Self::Tier4 => DECERTIFIED_BALANCE,
        }
    }

    /// Balance of the certification asset this tier corresponds to.
    pub fn as_balance(&self) -> u32 {
        match self {
            Self::Uncertified => 0,
            Self::Tier1 => 1,
            Self::Tier2 => 2,
            Self::Tier3 => 3,
            Self::Tier4 => 4,
            Self::Decertified => DECERTIFIED_BALANCE,
        }
    }

    /// Whether the manager may currently prepare lots.
    pub fn is_certified(&self) -> bool {
        !matches!(self, Self::Uncertified | Self::Decertified)
    }
}

/// Name, symbol and URI attached to a contract-issued asset.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintMetadata {
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

/// Deployment parameters passed once to `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractParams {
    /// Trees in one lot; multiplies the per-tree price.
    pub trees_per_lot: u32,
    /// Stablecoin base units per price cent (10_000 for 6 decimals).
    pub units_per_cent: i128,
    /// Offer catalog ceiling, at most `TOTAL_OFFERS`.
    pub offer_capacity: u32,
    /// Lots ledger ceiling, at most `TOTAL_LOTS`.
    pub lot_capacity: u32,
    pub certification: MintMetadata,
}

/// Singleton contract configuration. Immutable after `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractConfig {
    pub admin: Address,
    pub stablecoin: Address,
    pub trees_per_lot: u32,
    pub units_per_cent: i128,
    pub offer_capacity: u32,
    pub lot_capacity: u32,
    /// Asset id of the certification mint.
    pub certification_mint: u64,
    pub certification: MintMetadata,
}

/// Metadata supplied by the admin for a new offer.
///
/// `price` is the price per tree in cents, as a decimal string.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OfferMetadata {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub location: String,
    pub variety: String,
    pub price: String,
}

/// A slot in the offer catalog.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Offer {
    pub index: u32,
    /// Asset id of the order token backing this offer.
    pub mint: u64,
    pub metadata: OfferMetadata,
}

/// Settlement state of a prepared lot.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LotStatus {
    /// Prepared; tokens frozen; 90% of the manager's pay held in escrow.
    Unconfirmed,
    /// Planting verified; tokens thawed; manager fully paid.
    Confirmed,
    /// Planting rejected; mint closed and the order restored.
    Denied,
}

impl LotStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Unconfirmed)
    }
}

/// A slot in the lots ledger.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lot {
    pub index: u32,
    /// Asset id of the lot token.
    pub mint: u64,
    /// Offer whose order tokens this lot consumed.
    pub offer_index: u32,
    pub investor: Address,
    pub manager: Address,
    /// Free-form manager identity recorded in the lot metadata.
    pub manager_label: String,
    pub location: String,
    pub variety: String,
    /// Lot tokens minted, one per lot unit claimed.
    pub supply: u64,
    /// Price per tree in cents locked in at preparation.
    pub original_price_per_tree: u64,
    pub status: LotStatus,
}

/// Key/value view of a lot mint's metadata.
///
/// `state` is `"0"` while unconfirmed and `"1"` once confirmed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LotMetadata {
    pub mint: u64,
    pub location: String,
    pub variety: String,
    pub manager: String,
    pub state: String,
}
