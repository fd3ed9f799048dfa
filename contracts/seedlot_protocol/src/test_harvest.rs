extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::invariants::assert_moved_by;
use crate::test_utils::TestContext;
use crate::{Error, TOTAL_OFFERS};

fn funded_payer(ctx: &TestContext, amount: i128) -> Address {
    let payer = Address::generate(&ctx.env);
    ctx.fund(&payer, amount);
    payer
}

#[test]
fn test_harvest_split() {
    let ctx = TestContext::new();
    let (_, lot) = ctx.confirmed_lot(1, 1);
    let payer = funded_payer(&ctx, 35_000);

    let investor_before = ctx.balance(&ctx.investor);
    let manager_before = ctx.balance(&ctx.manager);
    let admin_before = ctx.balance(&ctx.admin);

    ctx.client
        .pay_harvest(&payer, &ctx.investor, &lot.index, &15_000, &20_000);

    assert_moved_by("investor", investor_before, ctx.balance(&ctx.investor), 10_000);
    assert_moved_by("manager", manager_before, ctx.balance(&ctx.manager), 20_000);
    assert_moved_by("admin", admin_before, ctx.balance(&ctx.admin), 5_000);
    assert_eq!(ctx.balance(&payer), 0);
}

#[test]
fn test_harvest_split_in_usdc_units() {
    let ctx = TestContext::with_params(10, 10_000, TOTAL_OFFERS, 100);
    let (_, lot) = ctx.confirmed_lot(1, 1);
    let payer = funded_payer(&ctx, 350_000_000);

    let manager_before = ctx.balance(&ctx.manager);
    ctx.client
        .pay_harvest(&payer, &ctx.investor, &lot.index, &15_000, &20_000);

    assert_moved_by(
        "manager",
        manager_before,
        ctx.balance(&ctx.manager),
        200_000_000,
    );
    assert_eq!(ctx.balance(&ctx.admin), 50_000_000);
    assert_eq!(ctx.balance(&payer), 0);
}

#[test]
fn test_harvest_remainder_goes_to_admin() {
    let ctx = TestContext::new();
    let (_, lot) = ctx.confirmed_lot(1, 1);
    let payer = funded_payer(&ctx, 1_000);
    let investor_before = ctx.balance(&ctx.investor);
    let manager_before = ctx.balance(&ctx.manager);

    ctx.client
        .pay_harvest(&payer, &ctx.investor, &lot.index, &100, &7);

    assert_moved_by("investor", investor_before, ctx.balance(&ctx.investor), 3);
    assert_moved_by("manager", manager_before, ctx.balance(&ctx.manager), 101);
    assert_eq!(ctx.balance(&ctx.admin), 3);
    assert_eq!(ctx.balance(&payer), 1_000 - 107);
}

#[test]
fn test_harvest_without_profit_pays_manager_only() {
    let ctx = TestContext::new();
    let (_, lot) = ctx.confirmed_lot(1, 1);
    let payer = funded_payer(&ctx, 500);
    let investor_before = ctx.balance(&ctx.investor);

    ctx.client
        .pay_harvest(&payer, &ctx.investor, &lot.index, &500, &0);

    assert_eq!(ctx.balance(&ctx.investor), investor_before);
    assert_eq!(ctx.balance(&ctx.admin), 0);
    assert_eq!(ctx.balance(&payer), 0);
}

#[test]
fn test_harvest_requires_confirmed_lot() {
    let ctx = TestContext::new();
    let (offer, lot) = ctx.prepared_lot(2, 1);
    let payer = funded_payer(&ctx, 35_000);

    assert_eq!(
        ctx.client
            .try_pay_harvest(&payer, &ctx.investor, &lot.index, &15_000, &20_000),
        Err(Ok(Error::LotNotConfirmed))
    );

    ctx.client
        .confirm_lots(&ctx.admin, &false, &offer.index, &lot.index);
    assert_eq!(
        ctx.client
            .try_pay_harvest(&payer, &ctx.investor, &lot.index, &15_000, &20_000),
        Err(Ok(Error::LotMintMismatch))
    );
    assert_eq!(
        ctx.client
            .try_pay_harvest(&payer, &ctx.investor, &9, &15_000, &20_000),
        Err(Ok(Error::InvalidLotIndex))
    );
    assert_eq!(ctx.balance(&payer), 35_000);
}

#[test]
fn test_harvest_user_must_hold_whole_lot() {
    let ctx = TestContext::new();
    let (_, lot) = ctx.confirmed_lot(2, 2);
    let payer = funded_payer(&ctx, 35_000);
    let buyer = Address::generate(&ctx.env);

    assert_eq!(
        ctx.client
            .try_pay_harvest(&payer, &buyer, &lot.index, &15_000, &20_000),
        Err(Ok(Error::UserMismatch))
    );

    ctx.client.transfer_lot(&ctx.investor, &buyer, &lot.index, &1);
    assert_eq!(
        ctx.client
            .try_pay_harvest(&payer, &ctx.investor, &lot.index, &15_000, &20_000),
        Err(Ok(Error::UserMismatch))
    );

    // The buyer takes the rest and becomes the sole holder.
    ctx.client.transfer_lot(&ctx.investor, &buyer, &lot.index, &1);
    ctx.client
        .pay_harvest(&payer, &buyer, &lot.index, &15_000, &20_000);
    assert_eq!(ctx.balance(&buyer), 10_000);
}

#[test]
fn test_harvest_rejects_fully_burned_lot() {
    let ctx = TestContext::new();
    let (_, lot) = ctx.confirmed_lot(2, 2);
    let payer = funded_payer(&ctx, 35_000);
    let stranger = Address::generate(&ctx.env);

    ctx.client.burn_lot(&ctx.investor, &lot.index, &2);
    assert_eq!(ctx.client.get_lot(&lot.index).supply, 0);

    assert_eq!(
        ctx.client
            .try_pay_harvest(&payer, &stranger, &lot.index, &15_000, &20_000),
        Err(Ok(Error::UserMismatch))
    );
    assert_eq!(
        ctx.client
            .try_pay_harvest(&payer, &ctx.investor, &lot.index, &15_000, &20_000),
        Err(Ok(Error::UserMismatch))
    );
    assert_eq!(ctx.balance(&payer), 35_000);
    assert_eq!(ctx.balance(&stranger), 0);
}

#[test]
fn test_harvest_rejects_negative_amounts() {
    let ctx = TestContext::new();
    let (_, lot) = ctx.confirmed_lot(1, 1);
    let payer = funded_payer(&ctx, 35_000);

    assert_eq!(
        ctx.client
            .try_pay_harvest(&payer, &ctx.investor, &lot.index, &-1, &20_000),
        Err(Ok(Error::InvalidAmount))
    );
    assert_eq!(
        ctx.client
            .try_pay_harvest(&payer, &ctx.investor, &lot.index, &15_000, &-4),
        Err(Ok(Error::InvalidAmount))
    );
}

#[test]
fn test_harvest_underfunded_payer_moves_nothing() {
    let ctx = TestContext::new();
    let (_, lot) = ctx.confirmed_lot(1, 1);
    let payer = funded_payer(&ctx, 34_999);
    let investor_before = ctx.balance(&ctx.investor);

    assert!(ctx
        .client
        .try_pay_harvest(&payer, &ctx.investor, &lot.index, &15_000, &20_000)
        .is_err());

    assert_eq!(ctx.balance(&payer), 34_999);
    assert_eq!(ctx.balance(&ctx.investor), investor_before);
    assert_eq!(ctx.balance(&ctx.admin), 0);
}
