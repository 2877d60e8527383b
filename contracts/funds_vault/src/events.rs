use soroban_sdk::{symbol_short, Address, Env};
use vault_interfaces::CreditKind;

pub fn deposit(env: &Env, depositor: &Address, amount: i128, yield_claim: i128, lock_duration: u64) {
    env.events().publish(
        (symbol_short!("deposit"), depositor.clone()),
        (amount, yield_claim, lock_duration),
    );
}

/// `closed` is true when the redemption emptied the position.
pub fn withdraw(env: &Env, holder: &Address, amount: i128, closed: bool) {
    env.events()
        .publish((symbol_short!("withdraw"), holder.clone()), (amount, closed));
}

pub fn harvest(env: &Env, amount: i128) {
    env.events()
        .publish((symbol_short!("harvest"), CreditKind::Harvest), amount);
}

pub fn early_claim(env: &Env, caller: &Address, depositor: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("early"), caller.clone(), depositor.clone()),
        amount,
    );
}

pub fn pay(env: &Env, payer: &Address, merchant: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("pay"), payer.clone(), merchant.clone()),
        amount,
    );
}

pub fn sell(env: &Env, seller: &Address, asset: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("sell"), seller.clone(), asset.clone()),
        amount,
    );
}

pub fn fund(env: &Env, owner: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("fund"), owner.clone()), amount);
}
