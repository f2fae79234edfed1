//! The mock for the ledger tests.

use mockall::mock;
use primitives_ethereum::{EcdsaSignature, EthereumAddress};

use crate::{
    traits::EthereumSignatureVerifier,
    types::{AuthorizationMessageParams, Balance, CallContext, LedgerParams, TokenMetadata},
    TokenLedger,
};

mock! {
    pub Verifier {}

    impl EthereumSignatureVerifier for Verifier {
        type MessageParams = AuthorizationMessageParams;

        fn recover_signer(
            &self,
            signature: &EcdsaSignature,
            message_params: &<Self as EthereumSignatureVerifier>::MessageParams,
        ) -> Option<EthereumAddress>;
    }
}

pub const LEDGER_ADDRESS: EthereumAddress = EthereumAddress([0xee; 20]);
pub const CONTROLLER: EthereumAddress = EthereumAddress([0xc0; 20]);
pub const ALICE: EthereumAddress = EthereumAddress([0x0a; 20]);
pub const BOB: EthereumAddress = EthereumAddress([0x0b; 20]);
pub const CHARLIE: EthereumAddress = EthereumAddress([0x0c; 20]);
pub const RELAYER: EthereumAddress = EthereumAddress([0x0f; 20]);

pub const ALICE_BALANCE: Balance = 1000;
pub const BOB_BALANCE: Balance = 500;
pub const VESTING_RESERVE: Balance = 10_000;

pub const NOW: u64 = 1_700_000_000;

pub fn test_params() -> LedgerParams {
    LedgerParams {
        address: LEDGER_ADDRESS,
        chain_id: 31337,
        controller: CONTROLLER,
        metadata: TokenMetadata::default(),
        initial_holders: vec![ALICE, BOB],
        initial_balances: vec![ALICE_BALANCE, BOB_BALANCE],
        vesting_reserve: VESTING_RESERVE,
    }
}

/// Construct the test ledger and drop the mint events.
pub fn new_test_ledger(verifier: MockVerifier) -> TokenLedger<MockVerifier> {
    let mut ledger = TokenLedger::with_verifier(test_params(), verifier).unwrap();
    ledger.take_events();
    ledger
}

pub fn call(caller: EthereumAddress) -> CallContext {
    CallContext::new(caller, NOW)
}
