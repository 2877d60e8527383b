#![cfg(test)]

extern crate std;

use soroban_sdk::{
    testutils::Address as _,
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};
use vault_interfaces::CreditKind;

use crate::{Treasury, TreasuryClient};

const UNIT: i128 = 1_000_000;

struct Setup {
    env: Env,
    treasury: TreasuryClient<'static>,
    asset: TokenClient<'static>,
    vault: Address,
}

fn create_setup() -> Setup {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let vault = Address::generate(&env);
    let issuer = Address::generate(&env);

    let asset_id = env.register_stellar_asset_contract_v2(issuer).address();
    StellarAssetClient::new(&env, &asset_id).mint(&vault, &(1_000 * UNIT));

    let treasury_id = env.register(Treasury, (admin, asset_id.clone()));
    let treasury = TreasuryClient::new(&env, &treasury_id);
    treasury.set_vault(&vault);

    let asset = TokenClient::new(&env, &asset_id);

    Setup { env, treasury, asset, vault }
}

fn credit(s: &Setup, amount: i128, kind: CreditKind) {
    let expiration = s.env.ledger().sequence() + 100;
    s.asset.approve(&s.vault, &s.treasury.address, &amount, &expiration);
    s.treasury.credit(&s.vault, &amount, &kind);
}

#[test]
fn credit_pulls_funds_and_books_them_by_kind() {
    let s = create_setup();

    credit(&s, 8 * UNIT, CreditKind::Harvest);
    credit(&s, 100 * UNIT, CreditKind::EarlyExit);
    credit(&s, 2 * UNIT, CreditKind::Harvest);

    assert_eq!(s.treasury.balance(), 110 * UNIT);
    assert_eq!(s.treasury.total_credited(&CreditKind::Harvest), 10 * UNIT);
    assert_eq!(s.treasury.total_credited(&CreditKind::EarlyExit), 100 * UNIT);
    assert_eq!(s.asset.balance(&s.treasury.address), 110 * UNIT);
    assert_eq!(s.asset.balance(&s.vault), 890 * UNIT);
}

#[test]
#[should_panic(expected = "Error(Contract, #3)")]
fn credit_from_anyone_but_the_vault_panics() {
    let s = create_setup();
    let stranger = Address::generate(&s.env);
    s.treasury.credit(&stranger, &UNIT, &CreditKind::Harvest);
}

#[test]
#[should_panic(expected = "Error(Contract, #4)")]
fn zero_credit_panics() {
    let s = create_setup();
    s.treasury.credit(&s.vault, &0_i128, &CreditKind::Harvest);
}

#[test]
#[should_panic]
fn credit_without_allowance_panics() {
    let s = create_setup();
    s.treasury.credit(&s.vault, &UNIT, &CreditKind::Harvest);
}

#[test]
#[should_panic(expected = "Error(Contract, #2)")]
fn credit_before_wiring_panics() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let vault = Address::generate(&env);
    let asset_id = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let treasury_id = env.register(Treasury, (admin, asset_id));
    let treasury = TreasuryClient::new(&env, &treasury_id);

    treasury.credit(&vault, &UNIT, &CreditKind::Harvest);
}

#[test]
#[should_panic(expected = "Error(Contract, #1)")]
fn vault_can_only_be_wired_once() {
    let s = create_setup();
    s.treasury.set_vault(&Address::generate(&s.env));
}

#[test]
fn admin_withdraw_pays_out_booked_funds() {
    let s = create_setup();
    let recipient = Address::generate(&s.env);

    credit(&s, 50 * UNIT, CreditKind::Harvest);
    let remaining = s.treasury.withdraw(&recipient, &(20 * UNIT));

    assert_eq!(remaining, 30 * UNIT);
    assert_eq!(s.treasury.balance(), 30 * UNIT);
    assert_eq!(s.asset.balance(&recipient), 20 * UNIT);
    // Lifetime totals are not reduced by withdrawals.
    assert_eq!(s.treasury.total_credited(&CreditKind::Harvest), 50 * UNIT);
}

#[test]
#[should_panic(expected = "Error(Contract, #5)")]
fn admin_withdraw_above_balance_panics() {
    let s = create_setup();
    let recipient = Address::generate(&s.env);

    credit(&s, 5 * UNIT, CreditKind::Harvest);
    s.treasury.withdraw(&recipient, &(5 * UNIT + 1));
}
