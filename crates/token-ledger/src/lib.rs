//! An ERC20-like token ledger with the EIP-3009 signed transfer authorizations.
//!
//! The ledger is a plain state machine: every operation takes the [`CallContext`] it is executed
//! in, and either applies all of its effects or returns an error and changes nothing.

use std::collections::BTreeMap;

use eip712_common::{encode_uint256, make_domain_hash, Domain};
use primitives_ethereum::EthereumAddress;
use tracing::{debug, info};

pub mod authorization;
pub mod eip712;
pub mod error;
pub mod traits;
pub mod types;

#[cfg(test)]
mod mock;
#[cfg(test)]
mod tests;

pub use authorization::AuthorizationRegistry;
pub use eip3009::{CancelAuthorization, Nonce, TransferAuthorization};
pub use eip712::Eip3009Verifier;
pub use error::*;
pub use types::*;

/// The token ledger.
#[derive(Debug, Clone)]
pub struct TokenLedger<V = Eip3009Verifier> {
    /// The address the ledger is deployed at.
    address: EthereumAddress,
    /// The identifier of the network the ledger is deployed to.
    chain_id: u64,
    /// The token metadata.
    metadata: TokenMetadata,
    /// The cached EIP-712 domain separator.
    domain_separator: [u8; 32],
    /// The sum of all balances.
    total_supply: Balance,
    /// The balances, absent entries are zero.
    balances: BTreeMap<EthereumAddress, Balance>,
    /// The allowances by `(owner, spender)`, absent entries are zero.
    allowances: BTreeMap<(EthereumAddress, EthereumAddress), Balance>,
    /// The authorization nonces.
    authorizations: AuthorizationRegistry,
    /// The authorization signature verifier.
    verifier: V,
    /// The events not yet taken by the observer.
    events: Vec<Event>,
}

impl TokenLedger<Eip3009Verifier> {
    /// Construct the ledger verifying the authorizations as EIP-712 typed data.
    pub fn new(params: LedgerParams) -> Result<Self, ConstructionError> {
        Self::with_verifier(params, Eip3009Verifier)
    }
}

impl<V> TokenLedger<V> {
    /// Construct the ledger with a custom authorization verifier.
    ///
    /// Mints every initial balance to its holder, and then the vesting reserve to the controller.
    pub fn with_verifier(params: LedgerParams, verifier: V) -> Result<Self, ConstructionError> {
        let LedgerParams {
            address,
            chain_id,
            controller,
            metadata,
            initial_holders,
            initial_balances,
            vesting_reserve,
        } = params;

        if initial_holders.len() != initial_balances.len() {
            return Err(ConstructionError::MismatchedLengths {
                holders: initial_holders.len(),
                balances: initial_balances.len(),
            });
        }
        if let Some(index) = initial_holders.iter().position(EthereumAddress::is_zero) {
            return Err(ConstructionError::ZeroAddressHolder(index));
        }
        if controller.is_zero() {
            return Err(ConstructionError::ZeroAddressController);
        }
        initial_balances
            .iter()
            .try_fold(vesting_reserve, |acc, balance| acc.checked_add(*balance))
            .ok_or(ConstructionError::SupplyOverflow)?;

        let domain_separator = make_domain_hash(Domain {
            name: &metadata.name,
            version: &metadata.version,
            chain_id: &encode_uint256(chain_id.into()),
            verifying_contract: &address.0,
        });

        let mut ledger = Self {
            address,
            chain_id,
            metadata,
            domain_separator,
            total_supply: 0,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
            authorizations: AuthorizationRegistry::default(),
            verifier,
            events: Vec::new(),
        };

        for (holder, balance) in initial_holders.into_iter().zip(initial_balances) {
            ledger.mint(holder, balance);
        }
        ledger.mint(controller, vesting_reserve);

        info!(
            message = "Ledger constructed",
            address = %ledger.address,
            chain_id = ledger.chain_id,
            total_supply = ledger.total_supply,
        );

        Ok(ledger)
    }

    /// The address the ledger is deployed at.
    pub fn address(&self) -> EthereumAddress {
        self.address
    }

    /// The identifier of the network the ledger is deployed to.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The token name.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// The token symbol.
    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    /// The token decimals.
    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    /// The EIP-712 domain separator the authorizations are signed under.
    pub fn domain_separator(&self) -> [u8; 32] {
        self.domain_separator
    }

    /// The sum of all balances.
    pub fn total_supply(&self) -> Balance {
        self.total_supply
    }

    pub fn balance_of(&self, account: &EthereumAddress) -> Balance {
        self.balances.get(account).copied().unwrap_or_default()
    }

    pub fn allowance(&self, owner: &EthereumAddress, spender: &EthereumAddress) -> Balance {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// The events emitted so far and not yet taken.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Take the emitted events, leaving the queue empty.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Move `amount` from the caller to `to`.
    pub fn transfer(
        &mut self,
        ctx: &CallContext,
        to: EthereumAddress,
        amount: Balance,
    ) -> Result<(), LedgerError> {
        self.ensure_transfer(ctx.caller, to, amount)?;
        self.apply_transfer(ctx.caller, to, amount);
        Ok(())
    }

    /// Set the allowance of `spender` over the caller funds to `amount`.
    ///
    /// An allowance of [`UNLIMITED_ALLOWANCE`] is never decreased.
    pub fn approve(
        &mut self,
        ctx: &CallContext,
        spender: EthereumAddress,
        amount: Balance,
    ) -> Result<(), LedgerError> {
        let owner = ctx.caller;
        if owner.is_zero() {
            return Err(LedgerError::ZeroAddress(AddressRole::Approver));
        }
        if spender.is_zero() {
            return Err(LedgerError::ZeroAddress(AddressRole::Spender));
        }

        self.allowances.insert((owner, spender), amount);
        debug!(message = "Approval", %owner, %spender, value = amount);
        self.events.push(Event::Approval {
            owner,
            spender,
            value: amount,
        });
        Ok(())
    }

    /// Move `amount` from `from` to `to` spending the allowance of the caller.
    pub fn transfer_from(
        &mut self,
        ctx: &CallContext,
        from: EthereumAddress,
        to: EthereumAddress,
        amount: Balance,
    ) -> Result<(), LedgerError> {
        let spender = ctx.caller;
        let allowance = self.allowance(&from, &spender);
        let new_allowance = if allowance == UNLIMITED_ALLOWANCE {
            None
        } else {
            let new_allowance =
                allowance
                    .checked_sub(amount)
                    .ok_or(LedgerError::InsufficientAllowance {
                        owner: from,
                        spender,
                        allowance,
                        needed: amount,
                    })?;
            Some(new_allowance)
        };
        self.ensure_transfer(from, to, amount)?;

        if let Some(new_allowance) = new_allowance {
            self.allowances.insert((from, spender), new_allowance);
        }
        self.apply_transfer(from, to, amount);
        Ok(())
    }

    /// Check that [`Self::apply_transfer`] can be called with the given arguments.
    fn ensure_transfer(
        &self,
        from: EthereumAddress,
        to: EthereumAddress,
        amount: Balance,
    ) -> Result<(), LedgerError> {
        if from.is_zero() {
            return Err(LedgerError::ZeroAddress(AddressRole::Sender));
        }
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress(AddressRole::Receiver));
        }
        let balance = self.balance_of(&from);
        if balance < amount {
            return Err(LedgerError::InsufficientBalance {
                account: from,
                balance,
                needed: amount,
            });
        }
        Ok(())
    }

    /// Move the balance, must be preceded by [`Self::ensure_transfer`].
    fn apply_transfer(&mut self, from: EthereumAddress, to: EthereumAddress, amount: Balance) {
        if from != to {
            let from_balance = self.balances.entry(from).or_default();
            *from_balance = from_balance.saturating_sub(amount);
            // Can't overflow as the total supply is bounded.
            let to_balance = self.balances.entry(to).or_default();
            *to_balance = to_balance.saturating_add(amount);
        }

        debug!(message = "Transfer", %from, %to, value = amount);
        self.events.push(Event::Transfer {
            from,
            to,
            value: amount,
        });
    }

    /// Credit the account with the new tokens, only used at construction.
    fn mint(&mut self, to: EthereumAddress, amount: Balance) {
        let balance = self.balances.entry(to).or_default();
        *balance = balance.saturating_add(amount);
        self.total_supply = self.total_supply.saturating_add(amount);

        self.events.push(Event::Transfer {
            from: EthereumAddress::ZERO,
            to,
            value: amount,
        });
    }
}
