//! Traits we use and expose.

use primitives_ethereum::EthereumAddress;
use token_ledger::{Balance, CallContext, LedgerError, TokenLedger};

/// The interface to the ledger holding the locked funds.
pub trait LedgerInterface {
    /// The ledger operation error.
    type Error;

    /// The address the ledger is deployed at.
    fn address(&self) -> EthereumAddress;

    /// Move `amount` from the caller to `to`.
    fn transfer(
        &mut self,
        ctx: &CallContext,
        to: EthereumAddress,
        amount: Balance,
    ) -> Result<(), Self::Error>;

    /// Move `amount` from `from` to `to` spending the allowance of the caller.
    fn transfer_from(
        &mut self,
        ctx: &CallContext,
        from: EthereumAddress,
        to: EthereumAddress,
        amount: Balance,
    ) -> Result<(), Self::Error>;
}

impl<V> LedgerInterface for TokenLedger<V> {
    type Error = LedgerError;

    fn address(&self) -> EthereumAddress {
        TokenLedger::address(self)
    }

    fn transfer(
        &mut self,
        ctx: &CallContext,
        to: EthereumAddress,
        amount: Balance,
    ) -> Result<(), Self::Error> {
        TokenLedger::transfer(self, ctx, to, amount)
    }

    fn transfer_from(
        &mut self,
        ctx: &CallContext,
        from: EthereumAddress,
        to: EthereumAddress,
        amount: Balance,
    ) -> Result<(), Self::Error> {
        TokenLedger::transfer_from(self, ctx, from, to, amount)
    }
}
