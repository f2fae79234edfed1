//! The ledger errors.

use primitives_ethereum::EthereumAddress;

use crate::types::{Balance, Timestamp};

/// An error that can occur while constructing the ledger.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// The holders and balances lists differ in length.
    #[error("{holders} initial holders but {balances} initial balances")]
    MismatchedLengths {
        /// The number of holders.
        holders: usize,
        /// The number of balances.
        balances: usize,
    },
    /// One of the initial holders is the zero address.
    #[error("initial holder at index {0} is the zero address")]
    ZeroAddressHolder(usize),
    /// The controller is the zero address.
    #[error("controller is the zero address")]
    ZeroAddressController,
    /// The initial supply does not fit the balance type.
    #[error("initial supply overflows")]
    SupplyOverflow,
}

/// The role a zero address was used in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressRole {
    /// The debited account.
    Sender,
    /// The credited account.
    Receiver,
    /// The owner granting an allowance.
    Approver,
    /// The account receiving an allowance.
    Spender,
}

/// An error that can occur while executing a ledger operation.
///
/// Any error leaves the ledger state unchanged.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The debited account does not have enough funds.
    #[error("account {account} has balance {balance}, but {needed} is needed")]
    InsufficientBalance {
        /// The debited account.
        account: EthereumAddress,
        /// The current balance.
        balance: Balance,
        /// The amount requested.
        needed: Balance,
    },
    /// The spender is not allowed to move this much on behalf of the owner.
    #[error("spender {spender} has allowance {allowance} from {owner}, but {needed} is needed")]
    InsufficientAllowance {
        /// The owner of the funds.
        owner: EthereumAddress,
        /// The spender.
        spender: EthereumAddress,
        /// The current allowance.
        allowance: Balance,
        /// The amount requested.
        needed: Balance,
    },
    /// The zero address was used where a real account is required.
    #[error("zero address used as {0:?}")]
    ZeroAddress(AddressRole),
    /// The authorization was rejected.
    #[error("authorization rejected: {0}")]
    Authorization(#[from] AuthorizationError),
}

/// An error that can occur while processing a signed authorization.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationError {
    /// The authorization can no longer be used.
    #[error("authorization expired: valid before {valid_before}, now {now}")]
    Expired {
        /// The end of the validity window.
        valid_before: Timestamp,
        /// The call time.
        now: Timestamp,
    },
    /// The authorization can not be used yet.
    #[error("authorization is not yet valid: valid after {valid_after}, now {now}")]
    NotYetValid {
        /// The start of the validity window.
        valid_after: Timestamp,
        /// The call time.
        now: Timestamp,
    },
    /// The signature does not recover to the authorizer.
    #[error("invalid signature")]
    SignatureInvalid,
    /// The nonce was already used.
    #[error("authorization is used")]
    NonceReused,
    /// The nonce was cancelled.
    #[error("authorization is cancelled")]
    NonceCancelled,
    /// The receive authorization was submitted by someone other than the payee.
    #[error("caller {caller} must be the payee {payee}")]
    CallerMismatch {
        /// The submitter.
        caller: EthereumAddress,
        /// The payee of the authorization.
        payee: EthereumAddress,
    },
}

impl AuthorizationError {
    /// Whether resubmitting the same authorization later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NotYetValid { .. })
    }
}
