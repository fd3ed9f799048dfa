//! Price parsing and the settlement arithmetic.
//!
//! Prices travel as decimal strings of cents per tree. Money is converted to
//! stablecoin base units with the deployment's `units_per_cent` before any
//! split is taken, and every step is checked.

use soroban_sdk::String;

use crate::types::ContractConfig;
use crate::Error;

/// Longest price string accepted; keeps the parsed value inside `u64`.
const MAX_PRICE_DIGITS: usize = 18;

/// Share of a lot's value paid to the manager at preparation, in tenths.
const UPFRONT_FEE_DIVISOR: i128 = 10;

/// Parse a cents-per-tree price string such as `"1500"`.
pub fn parse_price_cents(price: &String) -> Result<u64, Error> {
    let len = price.len() as usize;
    if len == 0 || len > MAX_PRICE_DIGITS {
        return Err(Error::InvalidPrice);
    }
    let mut buf = [0u8; MAX_PRICE_DIGITS];
    price.copy_into_slice(&mut buf[..len]);

    let mut cents: u64 = 0;
    for byte in &buf[..len] {
        if !byte.is_ascii_digit() {
            return Err(Error::InvalidPrice);
        }
        cents = cents
            .checked_mul(10)
            .and_then(|c| c.checked_add(u64::from(byte - b'0')))
            .ok_or(Error::InvalidPrice)?;
    }
    if cents == 0 {
        return Err(Error::InvalidPrice);
    }
    Ok(cents)
}

/// Convert an amount in cents to stablecoin base units.
pub fn cents_to_units(config: &ContractConfig, cents: i128) -> Result<i128, Error> {
    cents
        .checked_mul(config.units_per_cent)
        .ok_or(Error::Overflow)
}

/// Stablecoin value of `quantity` lots at `price_cents` per tree.
pub fn lots_value(config: &ContractConfig, price_cents: u64, quantity: u64) -> Result<i128, Error> {
    cents_to_units(config, i128::from(price_cents))?
        .checked_mul(i128::from(config.trees_per_lot))
        .and_then(|v| v.checked_mul(i128::from(quantity)))
        .ok_or(Error::Overflow)
}

/// Manager's upfront share of a lot's value (truncating 10%).
pub fn upfront_fee(total: i128) -> i128 {
    total / UPFRONT_FEE_DIVISOR
}

/// What the manager is still owed once the lot is confirmed.
///
/// Taken as `total - fee` so the lot's value leaves escrow exactly.
pub fn remaining_fee(total: i128) -> i128 {
    total - upfront_fee(total)
}

/// Stablecoin legs of a harvest payout.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HarvestSplit {
    pub investor: i128,
    pub manager: i128,
    pub admin: i128,
}

impl HarvestSplit {
    /// Total debited from the payer.
    pub fn total(&self) -> i128 {
        self.investor + self.manager + self.admin
    }
}

/// Split a harvest payment, both inputs already in base units.
///
/// The investor gets half of the profit, the manager a quarter plus the
/// harvest cost, and the admin the rest (a quarter plus any truncation
/// remainder), so the legs always sum to `harvest + profit`.
pub fn harvest_split(harvest: i128, profit: i128) -> Result<HarvestSplit, Error> {
    if harvest < 0 || profit < 0 {
        return Err(Error::InvalidAmount);
    }
    let investor = profit / 2;
    let quarter = profit / 4;
    let manager = harvest.checked_add(quarter).ok_or(Error::Overflow)?;
    let admin = profit - investor - quarter;
    Ok(HarvestSplit {
        investor,
        manager,
        admin,
    })
}
