use soroban_sdk::{testutils::Address as _, Address};
use vault_interfaces::CreditKind;

use super::{create_setup, deposit, set_time, DAY, LOCK_90_DAYS, START, UNIT};
use crate::VaultError;

#[test]
fn ninety_day_lock_blocks_then_releases_principal() {
    let s = create_setup();

    deposit(&s, &s.depositor, 100 * UNIT, LOCK_90_DAYS);
    assert_eq!(s.vault.get_holdings(&s.depositor), (10 * UNIT, 100 * UNIT));

    set_time(&s.env, START + 10 * DAY);
    assert_eq!(
        s.vault.try_withdraw_principal(&s.depositor, &(100 * UNIT)),
        Err(Ok(VaultError::LockNotElapsed))
    );

    set_time(&s.env, START + 90 * DAY);
    let before = s.asset.balance(&s.depositor);
    let paid = s.vault.withdraw_principal(&s.depositor, &(100 * UNIT));

    assert!(paid >= 100 * UNIT);
    assert_eq!(s.asset.balance(&s.depositor) - before, paid);
    assert_eq!(s.vault.get_holdings(&s.depositor), (10 * UNIT, 0));
}

#[test]
fn harvest_after_300_days_moves_yield_to_treasury() {
    let s = create_setup();
    deposit(&s, &s.depositor, 100 * UNIT, LOCK_90_DAYS);

    set_time(&s.env, START + 300 * DAY);
    let treasury_before = s.treasury.balance();
    let harvested = s.vault.harvest_yield();

    assert!(harvested > 0);
    // 100 units at 10% for 300 of 365 days, rounded down.
    assert_eq!(harvested, 8_219_178);
    assert_eq!(s.treasury.balance() - treasury_before, harvested);
    assert_eq!(s.asset.balance(&s.treasury.address), harvested);
    assert_eq!(s.treasury.total_credited(&CreditKind::Harvest), harvested);

    // Principal stays placed; nothing is left to sweep.
    assert_eq!(s.market.balance(&s.vault.address), 100 * UNIT);
    assert_eq!(s.vault.accrued_yield(), 0);
    assert_eq!(s.vault.try_harvest_yield(), Err(Ok(VaultError::NoYieldAvailable)));
}

#[test]
fn harvest_with_no_elapsed_time_has_nothing_to_take() {
    let s = create_setup();
    deposit(&s, &s.depositor, 100 * UNIT, LOCK_90_DAYS);

    assert_eq!(s.vault.try_harvest_yield(), Err(Ok(VaultError::NoYieldAvailable)));
    assert_eq!(s.treasury.balance(), 0);
}

#[test]
fn merchant_payment_is_bounded_by_yield_claim() {
    let s = create_setup();
    let merchant = Address::generate(&s.env);
    deposit(&s, &s.depositor, 100 * UNIT, LOCK_90_DAYS);

    assert_eq!(
        s.vault.try_pay_merchant(&s.depositor, &(11 * UNIT), &merchant),
        Err(Ok(VaultError::InsufficientFunds))
    );
    assert_eq!(s.asset.balance(&merchant), 0);
    assert_eq!(s.yield_claim.balance(&s.depositor), 10 * UNIT);

    s.vault.pay_merchant(&s.depositor, &(9 * UNIT), &merchant);

    assert_eq!(s.asset.balance(&merchant), 9 * UNIT);
    assert_eq!(s.yield_claim.balance(&s.depositor), UNIT);
    assert_eq!(s.vault.reserves(), 991 * UNIT);
}
