//! The mock for the lock tests.

use mockall::mock;
use primitives_ethereum::EthereumAddress;
use token_ledger::{Balance, CallContext};

use crate::{traits, LockParams};

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("mock ledger error")]
pub struct MockLedgerError;

mock! {
    pub Ledger {}

    impl traits::LedgerInterface for Ledger {
        type Error = MockLedgerError;

        fn address(&self) -> EthereumAddress;

        fn transfer(
            &mut self,
            ctx: &CallContext,
            to: EthereumAddress,
            amount: Balance,
        ) -> Result<(), MockLedgerError>;

        fn transfer_from(
            &mut self,
            ctx: &CallContext,
            from: EthereumAddress,
            to: EthereumAddress,
            amount: Balance,
        ) -> Result<(), MockLedgerError>;
    }
}

pub const LOCK_ADDRESS: EthereumAddress = EthereumAddress([0x1c; 20]);
pub const LEDGER_ADDRESS: EthereumAddress = EthereumAddress([0xee; 20]);
pub const BENEFICIARY: EthereumAddress = EthereumAddress([0xbe; 20]);
pub const CONTROLLER: EthereumAddress = EthereumAddress([0xc0; 20]);
pub const STRANGER: EthereumAddress = EthereumAddress([0x5a; 20]);

pub const VESTED_AMOUNT: Balance = 100_000;
pub const STAGE_DURATION: u64 = 150;
pub const START: u64 = 1_700_000_000;

pub fn test_params() -> LockParams {
    LockParams {
        address: LOCK_ADDRESS,
        ledger: LEDGER_ADDRESS,
        beneficiary: BENEFICIARY,
        funding_controller: CONTROLLER,
        vested_amount: VESTED_AMOUNT,
        stage_duration: STAGE_DURATION,
        percents: vec![3000, 2000, 5000],
        start: START,
    }
}

pub fn call(caller: EthereumAddress, timestamp: u64) -> CallContext {
    CallContext::new(caller, timestamp)
}
