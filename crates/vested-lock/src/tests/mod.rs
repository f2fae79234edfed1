use token_ledger::{LedgerParams, TokenLedger, TokenMetadata};

use crate::{mock::*, *};


pub const HOLDER_A: EthereumAddress = EthereumAddress([0x0a; 20]);
pub const HOLDER_B: EthereumAddress = EthereumAddress([0x0b; 20]);
pub const HOLDER_BALANCE: Balance = 500;

pub fn new_ledger() -> TokenLedger {
    TokenLedger::new(LedgerParams {
        address: LEDGER_ADDRESS,
        chain_id: 31337,
        controller: CONTROLLER,
        metadata: TokenMetadata::default(),
        initial_holders: vec![HOLDER_A, HOLDER_B],
        initial_balances: vec![HOLDER_BALANCE, HOLDER_BALANCE],
        vesting_reserve: VESTED_AMOUNT,
    })
    .unwrap()
}

/// Construct the lock with the given schedule and fund it before the start.
pub fn new_funded_lock(percents: Vec<u16>) -> (VestedLock, TokenLedger) {
    let mut ledger = new_ledger();
    let mut lock = VestedLock::new(LockParams {
        percents,
        ..test_params()
    })
    .unwrap();

    ledger
        .approve(&call(CONTROLLER, START - 10), LOCK_ADDRESS, VESTED_AMOUNT)
        .unwrap();
    lock.lock_funds(&call(CONTROLLER, START - 10), &mut ledger)
        .unwrap();

    ledger.take_events();
    lock.take_events();
    (lock, ledger)
}
