extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, IntoVal, TryIntoVal,
};

use crate::events::{
    HarvestPaid, LotSettled, LotTokensMoved, LotsPrepared, ManagerCertified, ManagerDebt,
    OfferAdded, OrderPlaced,
};
use crate::test_utils::TestContext;
use crate::CertificationTier;

#[test]
fn test_offer_added_event() {
    let ctx = TestContext::new();
    let offer = ctx.add_offer();

    let all_events = ctx.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("offer_add"), offer_index)
    assert_eq!(last_event.0, ctx.client.address);
    let expected_topics = vec![
        &ctx.env,
        symbol_short!("offer_add").into_val(&ctx.env),
        offer.index.into_val(&ctx.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: OfferAdded = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(
        event_data,
        OfferAdded {
            offer_index: offer.index,
            mint: offer.mint,
        }
    );
}

#[test]
fn test_order_placed_event() {
    let ctx = TestContext::new();
    let offer = ctx.add_offer();
    ctx.fund(&ctx.investor, 4_500);
    ctx.client.place_order(&ctx.investor, &offer.index, &3);

    let all_events = ctx.env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, ctx.client.address);
    let expected_topics = vec![
        &ctx.env,
        symbol_short!("ordered").into_val(&ctx.env),
        offer.index.into_val(&ctx.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: OrderPlaced = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(
        event_data,
        OrderPlaced {
            offer_index: offer.index,
            investor: ctx.investor.clone(),
            quantity: 3,
            amount: 4_500,
        }
    );
}

#[test]
fn test_certified_event() {
    let ctx = TestContext::new();
    ctx.client.certify(&ctx.admin, &ctx.manager, &1);

    let all_events = ctx.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &ctx.env,
        symbol_short!("certified").into_val(&ctx.env),
        ctx.manager.into_val(&ctx.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ManagerCertified = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(event_data.manager, ctx.manager);
    assert_eq!(event_data.tier, CertificationTier::Tier1);
}

#[test]
fn test_lots_prepared_event() {
    let ctx = TestContext::new();
    let (offer, lot) = ctx.prepared_lot(5, 3);

    let all_events = ctx.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("prepared"), lot_index)
    assert_eq!(last_event.0, ctx.client.address);
    let expected_topics = vec![
        &ctx.env,
        symbol_short!("prepared").into_val(&ctx.env),
        lot.index.into_val(&ctx.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: LotsPrepared = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(
        event_data,
        LotsPrepared {
            lot_index: lot.index,
            offer_index: offer.index,
            investor: ctx.investor.clone(),
            manager: ctx.manager.clone(),
            quantity: 3,
            amount: 450,
        }
    );
}

#[test]
fn test_lot_confirmed_event() {
    let ctx = TestContext::new();
    let (offer, lot) = ctx.prepared_lot(3, 3);
    ctx.client
        .confirm_lots(&ctx.admin, &true, &offer.index, &lot.index);

    let all_events = ctx.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &ctx.env,
        symbol_short!("confirmed").into_val(&ctx.env),
        lot.index.into_val(&ctx.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: LotSettled = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(
        event_data,
        LotSettled {
            lot_index: lot.index,
            manager: ctx.manager.clone(),
            amount: 4_050,
        }
    );
}

#[test]
fn test_lot_denied_event() {
    let ctx = TestContext::new();
    let (offer, lot) = ctx.prepared_lot(3, 3);
    ctx.client
        .confirm_lots(&ctx.admin, &false, &offer.index, &lot.index);

    let all_events = ctx.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &ctx.env,
        symbol_short!("denied").into_val(&ctx.env),
        lot.index.into_val(&ctx.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: LotSettled = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(event_data.amount, 450);
    assert_eq!(event_data.manager, ctx.manager);
}

#[test]
fn test_debt_recorded_event() {
    let ctx = TestContext::new();
    let (offer, lot) = ctx.prepared_lot(2, 2);
    ctx.revoke_fee_allowance(&ctx.manager);
    ctx.client
        .confirm_lots(&ctx.admin, &false, &offer.index, &lot.index);

    let all_events = ctx.env.events().all();
    let denied = all_events.last().expect("No events found");
    let denied_data: LotSettled = denied.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(denied_data.amount, 0);

    // The debt event directly precedes the denial.
    let debt = all_events.get(all_events.len() - 2).expect("No debt event");
    let expected_topics = vec![
        &ctx.env,
        symbol_short!("debt").into_val(&ctx.env),
        ctx.manager.into_val(&ctx.env),
    ];
    assert_eq!(debt.1, expected_topics);

    let event_data: ManagerDebt = debt.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(event_data.manager, ctx.manager);
    assert_eq!(event_data.amount, 300);
    assert_eq!(event_data.outstanding, 300);
}

#[test]
fn test_debt_repaid_event() {
    let ctx = TestContext::new();
    let (offer, lot) = ctx.prepared_lot(2, 2);
    ctx.revoke_fee_allowance(&ctx.manager);
    ctx.client
        .confirm_lots(&ctx.admin, &false, &offer.index, &lot.index);
    ctx.client.repay_debt(&ctx.manager, &120);

    let all_events = ctx.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &ctx.env,
        symbol_short!("debt_paid").into_val(&ctx.env),
        ctx.manager.into_val(&ctx.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ManagerDebt = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(event_data.amount, 120);
    assert_eq!(event_data.outstanding, 180);
}

#[test]
fn test_harvest_paid_event() {
    let ctx = TestContext::new();
    let (_, lot) = ctx.confirmed_lot(1, 1);
    let payer = Address::generate(&ctx.env);
    ctx.fund(&payer, 35_000);
    ctx.client
        .pay_harvest(&payer, &ctx.investor, &lot.index, &15_000, &20_000);

    let all_events = ctx.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &ctx.env,
        symbol_short!("harvest").into_val(&ctx.env),
        lot.index.into_val(&ctx.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: HarvestPaid = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(
        event_data,
        HarvestPaid {
            lot_index: lot.index,
            payer,
            investor_amount: 10_000,
            manager_amount: 20_000,
            admin_amount: 5_000,
        }
    );
}

#[test]
fn test_lot_transferred_event() {
    let ctx = TestContext::new();
    let (_, lot) = ctx.confirmed_lot(2, 2);
    let buyer = Address::generate(&ctx.env);
    ctx.client.transfer_lot(&ctx.investor, &buyer, &lot.index, &2);

    let all_events = ctx.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &ctx.env,
        symbol_short!("lot_xfer").into_val(&ctx.env),
        lot.index.into_val(&ctx.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: LotTokensMoved = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(
        event_data,
        LotTokensMoved {
            lot_index: lot.index,
            from: ctx.investor.clone(),
            to: Some(buyer),
            amount: 2,
        }
    );
}
