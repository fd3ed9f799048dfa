use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::types::CertificationTier;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractInitialized {
    pub admin: Address,
    pub stablecoin: Address,
    pub certification_mint: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OfferAdded {
    pub offer_index: u32,
    pub mint: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderPlaced {
    pub offer_index: u32,
    pub investor: Address,
    pub quantity: u64,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ManagerCertified {
    pub manager: Address,
    pub tier: CertificationTier,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LotsPrepared {
    pub lot_index: u32,
    pub offer_index: u32,
    pub investor: Address,
    pub manager: Address,
    pub quantity: u64,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LotSettled {
    pub lot_index: u32,
    pub manager: Address,
    pub amount: i128,
}

/// `amount` is the change; `outstanding` the debt left afterwards.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ManagerDebt {
    pub manager: Address,
    pub amount: i128,
    pub outstanding: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HarvestPaid {
    pub lot_index: u32,
    pub payer: Address,
    pub investor_amount: i128,
    pub manager_amount: i128,
    pub admin_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LotTokensMoved {
    pub lot_index: u32,
    pub from: Address,
    pub to: Option<Address>,
    pub amount: u64,
}

pub fn emit_initialized(env: &Env, admin: Address, stablecoin: Address, certification_mint: u64) {
    let topics = (symbol_short!("init"),);
    let data = ContractInitialized {
        admin,
        stablecoin,
        certification_mint,
    };
    env.events().publish(topics, data);
}

pub fn emit_offer_added(env: &Env, offer_index: u32, mint: u64) {
    let topics = (symbol_short!("offer_add"), offer_index);
    env.events().publish(topics, OfferAdded { offer_index, mint });
}

pub fn emit_order_placed(
    env: &Env,
    offer_index: u32,
    investor: Address,
    quantity: u64,
    amount: i128,
) {
    let topics = (symbol_short!("ordered"), offer_index);
    let data = OrderPlaced {
        offer_index,
        investor,
        quantity,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_certified(env: &Env, manager: Address, tier: CertificationTier) {
    let topics = (symbol_short!("certified"), manager.clone());
    env.events().publish(topics, ManagerCertified { manager, tier });
}

pub fn emit_decertified(env: &Env, manager: Address) {
    let topics = (symbol_short!("decertify"), manager.clone());
    let data = ManagerCertified {
        manager,
        tier: CertificationTier::Decertified,
    };
    env.events().publish(topics, data);
}

pub fn emit_lots_prepared(env: &Env, data: LotsPrepared) {
    let topics = (symbol_short!("prepared"), data.lot_index);
    env.events().publish(topics, data);
}

/// `amount` is what the manager was paid.
pub fn emit_lot_confirmed(env: &Env, lot_index: u32, manager: Address, amount: i128) {
    let topics = (symbol_short!("confirmed"), lot_index);
    let data = LotSettled {
        lot_index,
        manager,
        amount,
    };
    env.events().publish(topics, data);
}

/// `amount` is what was clawed back from the manager.
pub fn emit_lot_denied(env: &Env, lot_index: u32, manager: Address, amount: i128) {
    let topics = (symbol_short!("denied"), lot_index);
    let data = LotSettled {
        lot_index,
        manager,
        amount,
    };
    env.events().publish(topics, data);
}

/// Part of a denied lot's fee could not be clawed back.
pub fn emit_debt_recorded(env: &Env, manager: Address, amount: i128, outstanding: i128) {
    let topics = (symbol_short!("debt"), manager.clone());
    let data = ManagerDebt {
        manager,
        amount,
        outstanding,
    };
    env.events().publish(topics, data);
}

pub fn emit_debt_repaid(env: &Env, manager: Address, amount: i128, outstanding: i128) {
    let topics = (symbol_short!("debt_paid"), manager.clone());
    let data = ManagerDebt {
        manager,
        amount,
        outstanding,
    };
    env.events().publish(topics, data);
}

pub fn emit_harvest_paid(env: &Env, data: HarvestPaid) {
    let topics = (symbol_short!("harvest"), data.lot_index);
    env.events().publish(topics, data);
}

pub fn emit_lot_transferred(env: &Env, lot_index: u32, from: Address, to: Address, amount: u64) {
    let topics = (symbol_short!("lot_xfer"), lot_index);
    let data = LotTokensMoved {
        lot_index,
        from,
        to: Some(to),
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_lot_burned(env: &Env, lot_index: u32, from: Address, amount: u64) {
    let topics = (symbol_short!("lot_burn"), lot_index);
    let data = LotTokensMoved {
        lot_index,
        from,
        to: None,
        amount,
    };
    env.events().publish(topics, data);
}
