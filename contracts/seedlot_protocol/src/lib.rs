//! # Seedlot Protocol Contract
//!
//! Escrow and settlement for fractional, certification-gated tree-lot
//! investment. Investors buy order tokens against an offer, certified farm
//! managers turn them into frozen lot tokens, the admin confirms or denies
//! the planting, and harvest proceeds are split three ways.
//!
//! | Phase         | Entry Point(s)                                   |
//! |---------------|--------------------------------------------------|
//! | Bootstrap     | [`SeedlotProtocol::initialize`]                  |
//! | Certification | `certify`, `decertify`                           |
//! | Catalog       | [`SeedlotProtocol::add_offer`]                   |
//! | Ordering      | [`SeedlotProtocol::place_order`]                 |
//! | Preparation   | [`SeedlotProtocol::prepare_lots`]                |
//! | Settlement    | [`SeedlotProtocol::confirm_lots`]                |
//! | Harvest       | [`SeedlotProtocol::pay_harvest`]                 |
//! | Debt          | [`SeedlotProtocol::repay_debt`]                  |
//! | Lot tokens    | `transfer_lot`, `burn_lot`                       |
//! | Queries       | `get_config`, `get_offers`, `get_lots`, balances |
//!
//! ## Architecture
//!
//! Tier transitions live in [`certification`], money arithmetic in
//! [`pricing`], and storage access in [`storage`]. Entry points validate
//! every precondition before the first write, so a returned error leaves
//! no trace; the host reverts nested token transfers along with it.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, token, Address, Env, String, Vec};

mod certification;
pub mod events;
mod pricing;
mod storage;
mod types;

#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_harvest;

use events::{HarvestPaid, LotsPrepared};
pub use types::{
    CertificationTier, ContractConfig, ContractParams, Lot, LotMetadata, LotStatus, MintMetadata,
    Offer, OfferMetadata,
};

/// Hard ceiling on the offer catalog.
pub const TOTAL_OFFERS: u32 = 300;
/// Hard ceiling on the lots ledger.
pub const TOTAL_LOTS: u32 = 10_000;

/// Longest page returned by `get_offers` / `get_lots`.
const MAX_PAGE: u32 = 100;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AdminCannotBeCertified = 1,
    CertificationsMustIncreaseByOneTier = 2,
    CannotCertifyAboveTierFour = 3,
    NoCertificationTierZero = 4,
    ManagerAlreadyDecertified = 5,
    OffersFull = 6,
    InvalidOfferIndex = 7,
    OrderMintNotFound = 8,
    AdditionalMetadataIllFormed = 9,
    InvalidPrice = 10,
    LotsFull = 11,
    ManagerNotCertified = 12,
    InvalidLotIndex = 13,
    LotMintMismatch = 14,
    AlreadyInitialized = 15,
    NotInitialized = 16,
    NotAdmin = 17,
    InvalidConfig = 18,
    InvalidCapacity = 19,
    InvalidQuantity = 20,
    InvalidAmount = 21,
    InsufficientOrderTokens = 22,
    InsufficientLotTokens = 23,
    LotAlreadySettled = 24,
    LotNotConfirmed = 25,
    UserMismatch = 26,
    AccountFrozen = 27,
    Overflow = 28,
    OutstandingDebt = 29,
    NoOutstandingDebt = 30,
}

#[contract]
pub struct SeedlotProtocol;

#[contractimpl]
impl SeedlotProtocol {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Create the singleton contract state and the certification mint.
    ///
    /// Must be called exactly once; `admin` signs and becomes the immutable
    /// admin. `stablecoin` is the token contract used for every payment.
    pub fn initialize(
        env: Env,
        admin: Address,
        stablecoin: Address,
        params: ContractParams,
    ) -> Result<ContractConfig, Error> {
        admin.require_auth();
        if storage::has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        if params.trees_per_lot == 0 || params.units_per_cent <= 0 {
            return Err(Error::InvalidConfig);
        }
        if params.offer_capacity == 0
            || params.offer_capacity > TOTAL_OFFERS
            || params.lot_capacity == 0
            || params.lot_capacity > TOTAL_LOTS
        {
            return Err(Error::InvalidCapacity);
        }

        let config = ContractConfig {
            admin: admin.clone(),
            stablecoin: stablecoin.clone(),
            trees_per_lot: params.trees_per_lot,
            units_per_cent: params.units_per_cent,
            offer_capacity: params.offer_capacity,
            lot_capacity: params.lot_capacity,
            certification_mint: storage::next_mint_id(&env),
            certification: params.certification,
        };
        storage::save_config(&env, &config);

        events::emit_initialized(&env, admin, stablecoin, config.certification_mint);
        Ok(config)
    }

    // ─────────────────────────────────────────────────────────
    // Certification
    // ─────────────────────────────────────────────────────────

    /// Raise `manager` to tier `tier` (1..=4), exactly one step above the
    /// current tier.
    pub fn certify(
        env: Env,
        admin: Address,
        manager: Address,
        tier: u32,
    ) -> Result<CertificationTier, Error> {
        let config = require_admin(&env, &admin)?;
        let current = storage::load_certification(&env, &manager);
        let next = certification::certify(&config.admin, &manager, current, tier)?;
        storage::save_certification(&env, &manager, next);

        events::emit_certified(&env, manager, next);
        Ok(next)
    }

    /// Revoke `manager`'s certification whatever its tier.
    pub fn decertify(env: Env, admin: Address, manager: Address) -> Result<(), Error> {
        let config = require_admin(&env, &admin)?;
        let current = storage::load_certification(&env, &manager);
        let next = certification::decertify(&config.admin, &manager, current)?;
        storage::save_certification(&env, &manager, next);

        events::emit_decertified(&env, manager);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Offer catalog
    // ─────────────────────────────────────────────────────────

    /// Append an offer and create its order-token mint.
    ///
    /// The catalog is append-only; once `offer_capacity` slots are used
    /// every further call fails with `OffersFull`.
    pub fn add_offer(env: Env, admin: Address, metadata: OfferMetadata) -> Result<Offer, Error> {
        let config = require_admin(&env, &admin)?;
        let tail = storage::offer_tail(&env);
        if tail >= config.offer_capacity {
            return Err(Error::OffersFull);
        }

        let offer = Offer {
            index: tail,
            mint: storage::next_mint_id(&env),
            metadata,
        };
        storage::append_offer(&env, &offer);

        events::emit_offer_added(&env, offer.index, offer.mint);
        Ok(offer)
    }

    // ─────────────────────────────────────────────────────────
    // Ordering
    // ─────────────────────────────────────────────────────────

    /// Buy `quantity` lots of offer `offer_index`.
    ///
    /// Moves the full price from `investor` into escrow and mints the same
    /// number of order tokens. Returns the stablecoin amount escrowed.
    pub fn place_order(
        env: Env,
        investor: Address,
        offer_index: u32,
        quantity: u64,
    ) -> Result<i128, Error> {
        investor.require_auth();
        let config = load_config(&env)?;
        if quantity == 0 {
            return Err(Error::InvalidQuantity);
        }
        let offer = offer_at(&env, offer_index)?;
        let price = offer_price(&offer)?;
        let amount = pricing::lots_value(&config, price, quantity)?;
        let balance = storage::order_balance(&env, offer_index, &investor)
            .checked_add(quantity)
            .ok_or(Error::Overflow)?;

        let stablecoin = token::Client::new(&env, &config.stablecoin);
        stablecoin.transfer(&investor, &env.current_contract_address(), &amount);
        storage::set_order_balance(&env, offer_index, &investor, balance);

        events::emit_order_placed(&env, offer_index, investor, quantity, amount);
        Ok(amount)
    }

    // ─────────────────────────────────────────────────────────
    // Lot preparation
    // ─────────────────────────────────────────────────────────

    /// Claim `quantity` of `investor`'s orders on offer `order_index`.
    ///
    /// Burns the order tokens, mints a new lot whose tokens stay frozen with
    /// the investor until settlement, and pays the manager 10% of the lot's
    /// value from escrow. The manager also re-grants the contract an
    /// allowance covering the fees of all their unsettled lots, so a denial
    /// can claw its fee back.
    pub fn prepare_lots(
        env: Env,
        manager: Address,
        investor: Address,
        order_index: u32,
        quantity: u64,
        manager_for_lot: String,
    ) -> Result<Lot, Error> {
        manager.require_auth();
        let config = load_config(&env)?;
        certification::require_certified(storage::load_certification(&env, &manager))?;
        if storage::debt(&env, &manager) > 0 {
            return Err(Error::OutstandingDebt);
        }
        let tail = storage::lot_tail(&env);
        if tail >= config.lot_capacity {
            return Err(Error::LotsFull);
        }
        if quantity == 0 {
            return Err(Error::InvalidQuantity);
        }
        let offer = offer_at(&env, order_index)?;
        let price = offer_price(&offer)?;
        let held = storage::order_balance(&env, order_index, &investor);
        if held < quantity {
            return Err(Error::InsufficientOrderTokens);
        }
        let total = pricing::lots_value(&config, price, quantity)?;
        let fee = pricing::upfront_fee(total);

        let stablecoin = token::Client::new(&env, &config.stablecoin);
        let contract = env.current_contract_address();
        let pending = storage::pending_fees(&env, &manager)
            .checked_add(fee)
            .ok_or(Error::Overflow)?;

        storage::set_order_balance(&env, order_index, &investor, held - quantity);
        let lot = Lot {
            index: tail,
            mint: storage::next_mint_id(&env),
            offer_index: order_index,
            investor: investor.clone(),
            manager: manager.clone(),
            manager_label: manager_for_lot,
            location: offer.metadata.location,
            variety: offer.metadata.variety,
            supply: quantity,
            original_price_per_tree: price,
            status: LotStatus::Unconfirmed,
        };
        storage::append_lot(&env, &lot);
        storage::set_lot_balance(&env, lot.index, &investor, quantity);

        if fee > 0 {
            storage::set_pending_fees(&env, &manager, pending);
            stablecoin.transfer(&contract, &manager, &fee);
            let expiration = env
                .ledger()
                .sequence()
                .saturating_add(storage::FEE_ALLOWANCE_LEDGERS);
            stablecoin.approve(&manager, &contract, &pending, &expiration);
        }

        events::emit_lots_prepared(
            &env,
            LotsPrepared {
                lot_index: lot.index,
                offer_index: order_index,
                investor,
                manager,
                quantity,
                amount: fee,
            },
        );
        Ok(lot)
    }

    // ─────────────────────────────────────────────────────────
    // Settlement
    // ─────────────────────────────────────────────────────────

    /// Settle lot `lot_index`, prepared from offer `order_index`.
    ///
    /// `confirmed = true` pays the manager the remaining 90%, less any debt
    /// they owe, and thaws the lot tokens. `confirmed = false` closes the
    /// lot mint, gives the investor their order tokens back, decertifies the
    /// manager and claws the upfront fee back into escrow. Whatever part of
    /// the fee the manager's allowance or balance cannot cover is recorded
    /// as manager debt; the denial itself never fails on it.
    pub fn confirm_lots(
        env: Env,
        admin: Address,
        confirmed: bool,
        order_index: u32,
        lot_index: u32,
    ) -> Result<LotStatus, Error> {
        let config = require_admin(&env, &admin)?;
        let mut lot = lot_at(&env, lot_index)?;
        let offer = offer_at(&env, order_index)?;
        if offer.index != lot.offer_index {
            return Err(Error::OrderMintNotFound);
        }
        if lot.status.is_terminal() {
            return Err(Error::LotAlreadySettled);
        }
        let total = pricing::lots_value(&config, lot.original_price_per_tree, lot.supply)?;
        let fee = pricing::upfront_fee(total);
        let owed = storage::debt(&env, &lot.manager);
        let pending = storage::pending_fees(&env, &lot.manager);
        let stablecoin = token::Client::new(&env, &config.stablecoin);
        let contract = env.current_contract_address();

        if confirmed {
            let remaining = pricing::remaining_fee(total);
            let offset = owed.min(remaining);
            let payout = remaining - offset;

            storage::set_pending_fees(&env, &lot.manager, (pending - fee).max(0));
            lot.status = LotStatus::Confirmed;
            storage::save_lot(&env, &lot);
            if offset > 0 {
                storage::set_debt(&env, &lot.manager, owed - offset);
                events::emit_debt_repaid(&env, lot.manager.clone(), offset, owed - offset);
            }
            if payout > 0 {
                stablecoin.transfer(&contract, &lot.manager, &payout);
            }
            events::emit_lot_confirmed(&env, lot.index, lot.manager, payout);
        } else {
            let restored = storage::order_balance(&env, lot.offer_index, &lot.investor)
                .checked_add(lot.supply)
                .ok_or(Error::Overflow)?;
            let worst_case = owed.checked_add(fee).ok_or(Error::Overflow)?;

            storage::set_pending_fees(&env, &lot.manager, (pending - fee).max(0));
            storage::set_lot_balance(&env, lot.index, &lot.investor, 0);
            storage::set_order_balance(&env, lot.offer_index, &lot.investor, restored);
            storage::save_certification(&env, &lot.manager, CertificationTier::Decertified);
            lot.status = LotStatus::Denied;
            storage::save_lot(&env, &lot);

            let clawed = claw_back(&env, &stablecoin, &lot.manager, fee);
            events::emit_decertified(&env, lot.manager.clone());
            if clawed < fee {
                let outstanding = worst_case - clawed;
                storage::set_debt(&env, &lot.manager, outstanding);
                events::emit_debt_recorded(&env, lot.manager.clone(), fee - clawed, outstanding);
            }
            events::emit_lot_denied(&env, lot.index, lot.manager, clawed);
        }
        Ok(lot.status)
    }

    // ─────────────────────────────────────────────────────────
    // Harvest
    // ─────────────────────────────────────────────────────────

    /// Distribute a harvest for a confirmed lot, paid by `payer`.
    ///
    /// Amounts are in cents. The manager receives `harvest_amount` plus a
    /// quarter of `profit`, `user` (who must hold the whole lot) half of it,
    /// and the admin the remainder.
    pub fn pay_harvest(
        env: Env,
        payer: Address,
        user: Address,
        lot_index: u32,
        harvest_amount: i128,
        profit: i128,
    ) -> Result<(), Error> {
        payer.require_auth();
        let config = load_config(&env)?;
        let lot = lot_at(&env, lot_index)?;
        match lot.status {
            LotStatus::Confirmed => {}
            LotStatus::Unconfirmed => return Err(Error::LotNotConfirmed),
            LotStatus::Denied => return Err(Error::LotMintMismatch),
        }
        // A fully burned lot has no holder left to pay.
        if lot.supply == 0 || storage::lot_balance(&env, lot.index, &user) != lot.supply {
            return Err(Error::UserMismatch);
        }
        if harvest_amount < 0 || profit < 0 {
            return Err(Error::InvalidAmount);
        }
        let split = pricing::harvest_split(
            pricing::cents_to_units(&config, harvest_amount)?,
            pricing::cents_to_units(&config, profit)?,
        )?;

        let stablecoin = token::Client::new(&env, &config.stablecoin);
        for (to, amount) in [
            (&user, split.investor),
            (&config.admin, split.admin),
            (&lot.manager, split.manager),
        ] {
            if amount > 0 {
                stablecoin.transfer(&payer, to, &amount);
            }
        }

        events::emit_harvest_paid(
            &env,
            HarvestPaid {
                lot_index: lot.index,
                payer,
                investor_amount: split.investor,
                manager_amount: split.manager,
                admin_amount: split.admin,
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Manager debt
    // ─────────────────────────────────────────────────────────

    /// Pay down `manager`'s clawback debt from their own account, capped at
    /// what is owed. Returns the debt still outstanding.
    pub fn repay_debt(env: Env, manager: Address, amount: i128) -> Result<i128, Error> {
        manager.require_auth();
        let config = load_config(&env)?;
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let owed = storage::debt(&env, &manager);
        if owed == 0 {
            return Err(Error::NoOutstandingDebt);
        }
        let paid = amount.min(owed);
        let outstanding = owed - paid;

        token::Client::new(&env, &config.stablecoin).transfer(
            &manager,
            &env.current_contract_address(),
            &paid,
        );
        storage::set_debt(&env, &manager, outstanding);

        events::emit_debt_repaid(&env, manager, paid, outstanding);
        Ok(outstanding)
    }

    // ─────────────────────────────────────────────────────────
    // Lot tokens
    // ─────────────────────────────────────────────────────────

    /// Move confirmed lot tokens between holders.
    pub fn transfer_lot(
        env: Env,
        from: Address,
        to: Address,
        lot_index: u32,
        amount: u64,
    ) -> Result<(), Error> {
        from.require_auth();
        let lot = lot_at(&env, lot_index)?;
        require_thawed(&lot)?;
        if amount == 0 {
            return Err(Error::InvalidQuantity);
        }
        let held = storage::lot_balance(&env, lot.index, &from);
        if held < amount {
            return Err(Error::InsufficientLotTokens);
        }

        storage::set_lot_balance(&env, lot.index, &from, held - amount);
        let received = storage::lot_balance(&env, lot.index, &to)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        storage::set_lot_balance(&env, lot.index, &to, received);

        events::emit_lot_transferred(&env, lot.index, from, to, amount);
        Ok(())
    }

    /// Burn confirmed lot tokens, shrinking the lot's supply.
    pub fn burn_lot(env: Env, holder: Address, lot_index: u32, amount: u64) -> Result<(), Error> {
        holder.require_auth();
        let mut lot = lot_at(&env, lot_index)?;
        require_thawed(&lot)?;
        if amount == 0 {
            return Err(Error::InvalidQuantity);
        }
        let held = storage::lot_balance(&env, lot.index, &holder);
        if held < amount {
            return Err(Error::InsufficientLotTokens);
        }

        storage::set_lot_balance(&env, lot.index, &holder, held - amount);
        lot.supply -= amount;
        storage::save_lot(&env, &lot);

        events::emit_lot_burned(&env, lot.index, holder, amount);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_config(env: Env) -> Result<ContractConfig, Error> {
        load_config(&env)
    }

    /// Stablecoin currently held in escrow.
    pub fn escrow_balance(env: Env) -> Result<i128, Error> {
        let config = load_config(&env)?;
        Ok(token::Client::new(&env, &config.stablecoin).balance(&env.current_contract_address()))
    }

    pub fn offer_tail(env: Env) -> u32 {
        storage::offer_tail(&env)
    }

    pub fn get_offer(env: Env, index: u32) -> Result<Offer, Error> {
        offer_at(&env, index)
    }

    pub fn get_offer_metadata(env: Env, index: u32) -> Result<OfferMetadata, Error> {
        Ok(offer_at(&env, index)?.metadata)
    }

    /// Up to `limit` offers starting at `start`, clamped to the tail.
    pub fn get_offers(env: Env, start: u32, limit: u32) -> Vec<Offer> {
        let end = page_end(start, limit, storage::offer_tail(&env));
        let mut offers = Vec::new(&env);
        for index in start..end {
            if let Some(offer) = storage::load_offer(&env, index) {
                offers.push_back(offer);
            }
        }
        offers
    }

    pub fn lot_tail(env: Env) -> u32 {
        storage::lot_tail(&env)
    }

    /// Lots ledger slot, including denied lots.
    pub fn get_lot(env: Env, index: u32) -> Result<Lot, Error> {
        lot_at(&env, index)
    }

    /// Up to `limit` lots starting at `start`, clamped to the tail.
    pub fn get_lots(env: Env, start: u32, limit: u32) -> Vec<Lot> {
        let end = page_end(start, limit, storage::lot_tail(&env));
        let mut lots = Vec::new(&env);
        for index in start..end {
            if let Some(lot) = storage::load_lot(&env, index) {
                lots.push_back(lot);
            }
        }
        lots
    }

    /// Metadata of a live lot mint. Denied lots no longer resolve.
    pub fn get_lot_metadata(env: Env, index: u32) -> Result<LotMetadata, Error> {
        let lot = lot_at(&env, index)?;
        let state = match lot.status {
            LotStatus::Unconfirmed => "0",
            LotStatus::Confirmed => "1",
            LotStatus::Denied => return Err(Error::LotMintMismatch),
        };
        Ok(LotMetadata {
            mint: lot.mint,
            location: lot.location,
            variety: lot.variety,
            manager: lot.manager_label,
            state: String::from_str(&env, state),
        })
    }

    pub fn certification_tier(env: Env, manager: Address) -> CertificationTier {
        storage::load_certification(&env, &manager)
    }

    /// Certification as a token balance: 0 uncertified, 1..=4 tier, 5 decertified.
    pub fn certification_balance(env: Env, manager: Address) -> u32 {
        storage::load_certification(&env, &manager).as_balance()
    }

    /// Stablecoin units `manager` owes escrow from unrecovered clawbacks.
    pub fn manager_debt(env: Env, manager: Address) -> i128 {
        storage::debt(&env, &manager)
    }

    /// Upfront fees paid out on `manager`'s still unsettled lots.
    pub fn pending_fees(env: Env, manager: Address) -> i128 {
        storage::pending_fees(&env, &manager)
    }

    pub fn order_balance(env: Env, offer_index: u32, holder: Address) -> u64 {
        storage::order_balance(&env, offer_index, &holder)
    }

    pub fn lot_balance(env: Env, lot_index: u32, holder: Address) -> u64 {
        storage::lot_balance(&env, lot_index, &holder)
    }

    pub fn is_lot_frozen(env: Env, lot_index: u32) -> Result<bool, Error> {
        let lot = lot_at(&env, lot_index)?;
        match lot.status {
            LotStatus::Unconfirmed => Ok(true),
            LotStatus::Confirmed => Ok(false),
            LotStatus::Denied => Err(Error::LotMintMismatch),
        }
    }
}

// ─────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────

fn load_config(env: &Env) -> Result<ContractConfig, Error> {
    storage::load_config(env).ok_or(Error::NotInitialized)
}

fn require_admin(env: &Env, admin: &Address) -> Result<ContractConfig, Error> {
    admin.require_auth();
    let config = load_config(env)?;
    if config.admin != *admin {
        return Err(Error::NotAdmin);
    }
    Ok(config)
}

fn offer_at(env: &Env, index: u32) -> Result<Offer, Error> {
    if index >= storage::offer_tail(env) {
        return Err(Error::InvalidOfferIndex);
    }
    storage::load_offer(env, index).ok_or(Error::OrderMintNotFound)
}

fn lot_at(env: &Env, index: u32) -> Result<Lot, Error> {
    if index >= storage::lot_tail(env) {
        return Err(Error::InvalidLotIndex);
    }
    storage::load_lot(env, index).ok_or(Error::InvalidLotIndex)
}

/// Price per tree in cents, after checking the rest of the offer's metadata.
fn offer_price(offer: &Offer) -> Result<u64, Error> {
    if offer.metadata.location.len() == 0 || offer.metadata.variety.len() == 0 {
        return Err(Error::AdditionalMetadataIllFormed);
    }
    pricing::parse_price_cents(&offer.metadata.price)
}

/// Pull up to `fee` back from `manager` through the allowance granted at
/// preparation. Returns what was collected; a revoked or lapsed allowance
/// or an emptied account yields less.
fn claw_back(env: &Env, stablecoin: &token::Client, manager: &Address, fee: i128) -> i128 {
    let contract = env.current_contract_address();
    let collectable = fee
        .min(stablecoin.allowance(manager, &contract))
        .min(stablecoin.balance(manager));
    if collectable <= 0 {
        return 0;
    }
    match stablecoin.try_transfer_from(&contract, manager, &contract, &collectable) {
        Ok(Ok(())) => collectable,
        _ => 0,
    }
}

fn require_thawed(lot: &Lot) -> Result<(), Error> {
    match lot.status {
        LotStatus::Confirmed => Ok(()),
        LotStatus::Unconfirmed => Err(Error::AccountFrozen),
        LotStatus::Denied => Err(Error::LotMintMismatch),
    }
}

fn page_end(start: u32, limit: u32, tail: u32) -> u32 {
    start.saturating_add(limit.min(MAX_PAGE)).min(tail)
}
