//! Canonical event types emitted by the Seedlot protocol contract.
//!
//! These mirror the topics published from `contracts/seedlot_protocol/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the Seedlot contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Contract state and certification mint created (`init` topic).
    ContractInitialized,
    /// An offer was appended to the catalog (`offer_add` topic).
    OfferAdded,
    /// An investor escrowed payment for order tokens (`ordered` topic).
    OrderPlaced,
    /// A manager moved up one certification tier (`certified` topic).
    ManagerCertified,
    /// A manager was decertified (`decertify` topic).
    ManagerDecertified,
    /// Orders were turned into a frozen lot (`prepared` topic).
    LotsPrepared,
    /// A lot was confirmed and the manager paid in full (`confirmed` topic).
    LotConfirmed,
    /// A lot was denied and its fee clawed back (`denied` topic).
    LotDenied,
    /// A harvest was split between investor, manager and admin (`harvest` topic).
    HarvestPaid,
    /// Lot tokens changed hands (`lot_xfer` topic).
    LotTransferred,
    /// Lot tokens were burned (`lot_burn` topic).
    LotBurned,
    /// A denial left part of the fee unrecovered (`debt` topic).
    DebtRecorded,
    /// A manager paid down their debt (`debt_paid` topic).
    DebtRepaid,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

/// What the second topic of an event identifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    None,
    Offer,
    Lot,
    Manager,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "init" => Self::ContractInitialized,
            "offer_add" => Self::OfferAdded,
            "ordered" => Self::OrderPlaced,
            "certified" => Self::ManagerCertified,
            "decertify" => Self::ManagerDecertified,
            "prepared" => Self::LotsPrepared,
            "confirmed" => Self::LotConfirmed,
            "denied" => Self::LotDenied,
            "harvest" => Self::HarvestPaid,
            "lot_xfer" => Self::LotTransferred,
            "lot_burn" => Self::LotBurned,
            "debt" => Self::DebtRecorded,
            "debt_paid" => Self::DebtRepaid,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ContractInitialized => "contract_initialized",
            Self::OfferAdded => "offer_added",
            Self::OrderPlaced => "order_placed",
            Self::ManagerCertified => "manager_certified",
            Self::ManagerDecertified => "manager_decertified",
            Self::LotsPrepared => "lots_prepared",
            Self::LotConfirmed => "lot_confirmed",
            Self::LotDenied => "lot_denied",
            Self::HarvestPaid => "harvest_paid",
            Self::LotTransferred => "lot_transferred",
            Self::LotBurned => "lot_burned",
            Self::DebtRecorded => "debt_recorded",
            Self::DebtRepaid => "debt_repaid",
            Self::Unknown => "unknown",
        }
    }

    pub fn subject(&self) -> Subject {
        match self {
            Self::OfferAdded | Self::OrderPlaced => Subject::Offer,
            Self::LotsPrepared
            | Self::LotConfirmed
            | Self::LotDenied
            | Self::HarvestPaid
            | Self::LotTransferred
            | Self::LotBurned => Subject::Lot,
            Self::ManagerCertified
            | Self::ManagerDecertified
            | Self::DebtRecorded
            | Self::DebtRepaid => Subject::Manager,
            Self::ContractInitialized | Self::Unknown => Subject::None,
        }
    }
}

/// A fully decoded Seedlot event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedlotEvent {
    /// RPC event id, unique per contract event.
    pub event_id: String,
    pub event_type: String,
    pub offer_index: Option<i64>,
    pub lot_index: Option<i64>,
    pub manager: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    pub offer_index: Option<i64>,
    pub lot_index: Option<i64>,
    pub manager: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
