use assert_matches::assert_matches;

use crate::{mock::*, *};

fn sum_of_balances(ledger: &TokenLedger<MockVerifier>) -> Balance {
    [ALICE, BOB, CHARLIE, CONTROLLER, RELAYER]
        .iter()
        .map(|account| ledger.balance_of(account))
        .sum()
}

/// This test verifies that construction mints the initial balances and the vesting reserve.
#[test]
fn construction_mints_initial_supply() {
    let ledger = TokenLedger::with_verifier(test_params(), MockVerifier::new()).unwrap();

    assert_eq!(ledger.balance_of(&ALICE), ALICE_BALANCE);
    assert_eq!(ledger.balance_of(&BOB), BOB_BALANCE);
    assert_eq!(ledger.balance_of(&CONTROLLER), VESTING_RESERVE);
    assert_eq!(ledger.balance_of(&CHARLIE), 0);
    assert_eq!(
        ledger.total_supply(),
        ALICE_BALANCE + BOB_BALANCE + VESTING_RESERVE
    );
    assert_eq!(
        ledger.events(),
        [
            Event::Transfer {
                from: EthereumAddress::ZERO,
                to: ALICE,
                value: ALICE_BALANCE
            },
            Event::Transfer {
                from: EthereumAddress::ZERO,
                to: BOB,
                value: BOB_BALANCE
            },
            Event::Transfer {
                from: EthereumAddress::ZERO,
                to: CONTROLLER,
                value: VESTING_RESERVE
            },
        ]
    );
}

#[test]
fn construction_exposes_metadata() {
    let ledger = new_test_ledger(MockVerifier::new());

    assert_eq!(ledger.name(), "Green Minting Token");
    assert_eq!(ledger.symbol(), "GMT");
    assert_eq!(ledger.decimals(), 18);
    assert_eq!(ledger.address(), LEDGER_ADDRESS);
    assert_eq!(ledger.chain_id(), 31337);
    assert_eq!(
        ledger.domain_separator(),
        eip712_common::make_domain_hash(eip712_common::Domain {
            name: "Green Minting Token",
            version: "1",
            chain_id: &eip712_common::encode_uint256(31337),
            verifying_contract: &LEDGER_ADDRESS.0,
        })
    );
}

/// This test verifies that the same holder listed twice receives both balances.
#[test]
fn construction_accumulates_repeated_holders() {
    let mut params = test_params();
    params.initial_holders = vec![ALICE, ALICE];
    params.initial_balances = vec![10, 20];

    let ledger = TokenLedger::with_verifier(params, MockVerifier::new()).unwrap();

    assert_eq!(ledger.balance_of(&ALICE), 30);
    assert_eq!(ledger.total_supply(), 30 + VESTING_RESERVE);
}

#[test]
fn construction_fails_on_mismatched_lengths() {
    let mut params = test_params();
    params.initial_balances.push(1);

    assert_matches!(
        TokenLedger::with_verifier(params, MockVerifier::new()).map(|_| ()),
        Err(ConstructionError::MismatchedLengths {
            holders: 2,
            balances: 3
        })
    );
}

#[test]
fn construction_fails_on_zero_address_holder() {
    let mut params = test_params();
    params.initial_holders[1] = EthereumAddress::ZERO;

    assert_matches!(
        TokenLedger::with_verifier(params, MockVerifier::new()).map(|_| ()),
        Err(ConstructionError::ZeroAddressHolder(1))
    );
}

#[test]
fn construction_fails_on_zero_address_controller() {
    let mut params = test_params();
    params.controller = EthereumAddress::ZERO;

    assert_matches!(
        TokenLedger::with_verifier(params, MockVerifier::new()).map(|_| ()),
        Err(ConstructionError::ZeroAddressController)
    );
}

#[test]
fn construction_fails_on_supply_overflow() {
    let mut params = test_params();
    params.vesting_reserve = Balance::MAX;

    assert_matches!(
        TokenLedger::with_verifier(params, MockVerifier::new()).map(|_| ()),
        Err(ConstructionError::SupplyOverflow)
    );
}

/// This test verifies that a chain of transfers preserves the total supply.
#[test]
fn transfers_preserve_total_supply() {
    let mut ledger = new_test_ledger(MockVerifier::new());
    let total_supply = ledger.total_supply();

    ledger.transfer(&call(ALICE), BOB, 300).unwrap();
    ledger.transfer(&call(BOB), CHARLIE, 800).unwrap();
    ledger.transfer(&call(CONTROLLER), ALICE, 1).unwrap();

    assert_eq!(ledger.balance_of(&ALICE), 701);
    assert_eq!(ledger.balance_of(&BOB), 0);
    assert_eq!(ledger.balance_of(&CHARLIE), 800);
    assert_eq!(ledger.balance_of(&CONTROLLER), VESTING_RESERVE - 1);
    assert_eq!(ledger.total_supply(), total_supply);
    assert_eq!(sum_of_balances(&ledger), total_supply);
    assert_eq!(
        ledger.take_events(),
        [
            Event::Transfer {
                from: ALICE,
                to: BOB,
                value: 300
            },
            Event::Transfer {
                from: BOB,
                to: CHARLIE,
                value: 800
            },
            Event::Transfer {
                from: CONTROLLER,
                to: ALICE,
                value: 1
            },
        ]
    );
    assert!(ledger.events().is_empty());
}

#[test]
fn transfer_to_self_keeps_balance() {
    let mut ledger = new_test_ledger(MockVerifier::new());

    ledger.transfer(&call(ALICE), ALICE, ALICE_BALANCE).unwrap();

    assert_eq!(ledger.balance_of(&ALICE), ALICE_BALANCE);
    assert_eq!(ledger.take_events().len(), 1);
}

#[test]
fn transfer_fails_on_insufficient_balance() {
    let mut ledger = new_test_ledger(MockVerifier::new());

    assert_eq!(
        ledger.transfer(&call(ALICE), BOB, ALICE_BALANCE + 1),
        Err(LedgerError::InsufficientBalance {
            account: ALICE,
            balance: ALICE_BALANCE,
            needed: ALICE_BALANCE + 1,
        })
    );
    assert_eq!(ledger.balance_of(&ALICE), ALICE_BALANCE);
    assert_eq!(ledger.balance_of(&BOB), BOB_BALANCE);
    assert!(ledger.events().is_empty());
}

#[test]
fn transfer_fails_on_zero_address_receiver() {
    let mut ledger = new_test_ledger(MockVerifier::new());

    assert_eq!(
        ledger.transfer(&call(ALICE), EthereumAddress::ZERO, 1),
        Err(LedgerError::ZeroAddress(AddressRole::Receiver))
    );
    assert_eq!(ledger.balance_of(&ALICE), ALICE_BALANCE);
}

#[test]
fn approve_sets_allowance() {
    let mut ledger = new_test_ledger(MockVerifier::new());

    ledger.approve(&call(ALICE), BOB, 100).unwrap();
    ledger.approve(&call(ALICE), BOB, 40).unwrap();

    assert_eq!(ledger.allowance(&ALICE, &BOB), 40);
    assert_eq!(ledger.allowance(&BOB, &ALICE), 0);
    assert_eq!(
        ledger.take_events().last(),
        Some(&Event::Approval {
            owner: ALICE,
            spender: BOB,
            value: 40
        })
    );
}

#[test]
fn approve_fails_on_zero_address_spender() {
    let mut ledger = new_test_ledger(MockVerifier::new());

    assert_eq!(
        ledger.approve(&call(ALICE), EthereumAddress::ZERO, 1),
        Err(LedgerError::ZeroAddress(AddressRole::Spender))
    );
    assert!(ledger.events().is_empty());
}

#[test]
fn transfer_from_spends_allowance() {
    let mut ledger = new_test_ledger(MockVerifier::new());
    ledger.approve(&call(ALICE), RELAYER, 300).unwrap();

    ledger
        .transfer_from(&call(RELAYER), ALICE, CHARLIE, 200)
        .unwrap();

    assert_eq!(ledger.allowance(&ALICE, &RELAYER), 100);
    assert_eq!(ledger.balance_of(&ALICE), ALICE_BALANCE - 200);
    assert_eq!(ledger.balance_of(&CHARLIE), 200);
    assert_eq!(ledger.balance_of(&RELAYER), 0);
}

#[test]
fn transfer_from_keeps_unlimited_allowance() {
    let mut ledger = new_test_ledger(MockVerifier::new());
    ledger
        .approve(&call(ALICE), RELAYER, UNLIMITED_ALLOWANCE)
        .unwrap();

    ledger
        .transfer_from(&call(RELAYER), ALICE, CHARLIE, ALICE_BALANCE)
        .unwrap();

    assert_eq!(ledger.allowance(&ALICE, &RELAYER), UNLIMITED_ALLOWANCE);
    assert_eq!(ledger.balance_of(&CHARLIE), ALICE_BALANCE);
}

#[test]
fn transfer_from_fails_on_insufficient_allowance() {
    let mut ledger = new_test_ledger(MockVerifier::new());
    ledger.approve(&call(ALICE), RELAYER, 10).unwrap();

    assert_eq!(
        ledger.transfer_from(&call(RELAYER), ALICE, CHARLIE, 11),
        Err(LedgerError::InsufficientAllowance {
            owner: ALICE,
            spender: RELAYER,
            allowance: 10,
            needed: 11,
        })
    );
    assert_eq!(ledger.allowance(&ALICE, &RELAYER), 10);
    assert_eq!(ledger.balance_of(&ALICE), ALICE_BALANCE);
}

/// This test verifies that a failed delegated transfer does not spend the allowance.
#[test]
fn transfer_from_failure_keeps_allowance() {
    let mut ledger = new_test_ledger(MockVerifier::new());
    ledger
        .approve(&call(ALICE), RELAYER, ALICE_BALANCE * 2)
        .unwrap();
    ledger.take_events();

    assert_matches!(
        ledger.transfer_from(&call(RELAYER), ALICE, CHARLIE, ALICE_BALANCE + 1),
        Err(LedgerError::InsufficientBalance { .. })
    );
    assert_eq!(ledger.allowance(&ALICE, &RELAYER), ALICE_BALANCE * 2);
    assert_eq!(ledger.balance_of(&ALICE), ALICE_BALANCE);
    assert!(ledger.events().is_empty());
}

#[test]
fn params_deserialize() {
    let params: LedgerParams = serde_json::from_str(&format!(
        r#"{{
            "address": "{LEDGER_ADDRESS}",
            "chainId": 31337,
            "controller": "{CONTROLLER}",
            "initialHolders": ["{ALICE}", "{BOB}"],
            "initialBalances": [1000, 500],
            "vestingReserve": 10000
        }}"#
    ))
    .unwrap();
    assert_eq!(params, test_params());

    let err = serde_json::from_str::<LedgerParams>(r#"{"owner": "0x00"}"#).unwrap_err();
    assert!(err.to_string().contains("unknown field `owner`"));
}
