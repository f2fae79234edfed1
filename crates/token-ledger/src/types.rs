//! Custom types we use.

use codec::{Decode, Encode, MaxEncodedLen};
use eip3009::{AuthorizationMessage, Nonce};
use primitives_ethereum::EthereumAddress;
use serde::{Deserialize, Serialize};

/// The balance of an account.
pub type Balance = u128;

/// Unix time in seconds.
pub type Timestamp = u64;

/// The allowance value that is never decreased by delegated transfers.
pub const UNLIMITED_ALLOWANCE: Balance = Balance::MAX;

/// The environment a call is executed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    /// The direct submitter of the call.
    pub caller: EthereumAddress,
    /// The prevailing time, as provided by the environment.
    ///
    /// Not trusted to be precise, only assumed to be non-decreasing across calls.
    pub timestamp: Timestamp,
}

impl CallContext {
    /// Create a new call context.
    pub fn new(caller: EthereumAddress, timestamp: Timestamp) -> Self {
        Self { caller, timestamp }
    }
}

/// The state of an `(authorizer, nonce)` pair.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Encode,
    Decode,
    MaxEncodedLen,
    Serialize,
    Deserialize,
)]
pub enum AuthorizationState {
    /// The nonce was never used.
    #[default]
    Unused,
    /// The nonce was consumed by a transfer or receive authorization.
    Used,
    /// The nonce was cancelled.
    Cancelled,
}

impl AuthorizationState {
    /// Whether the nonce can no longer be used or cancelled.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Unused)
    }
}

/// The collection of parameters used for constructing a message that had to be signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationMessageParams {
    /// The EIP-712 domain separator of the ledger.
    pub domain_separator: [u8; 32],
    /// The typed message.
    pub message: AuthorizationMessage,
}

/// The ledger events, for the off-chain observers.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub enum Event {
    /// Balance was moved. Mints have the zero address as `from`.
    Transfer {
        /// The debited account.
        from: EthereumAddress,
        /// The credited account.
        to: EthereumAddress,
        /// The moved amount.
        value: Balance,
    },
    /// An allowance was set.
    Approval {
        /// The owner of the funds.
        owner: EthereumAddress,
        /// The account allowed to spend the funds.
        spender: EthereumAddress,
        /// The new allowance.
        value: Balance,
    },
    /// A transfer or receive authorization was executed.
    AuthorizationUsed {
        /// The signer of the authorization.
        authorizer: EthereumAddress,
        /// The consumed nonce.
        nonce: Nonce,
    },
    /// An authorization nonce was cancelled.
    AuthorizationCanceled {
        /// The signer of the cancellation.
        authorizer: EthereumAddress,
        /// The cancelled nonce.
        nonce: Nonce,
    },
}

/// The token metadata, also used for the EIP-712 domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TokenMetadata {
    /// The name of the token, also the EIP-712 domain name.
    pub name: String,
    /// The ticker of the token.
    pub symbol: String,
    /// The number of decimals used for display.
    pub decimals: u8,
    /// The EIP-712 domain version.
    /// Bump this value to make the old signed authorizations obsolete.
    pub version: String,
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: "Green Minting Token".to_owned(),
            symbol: "GMT".to_owned(),
            decimals: 18,
            version: "1".to_owned(),
        }
    }
}

/// The ledger construction parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LedgerParams {
    /// The address the ledger is deployed at.
    pub address: EthereumAddress,
    /// The identifier of the network the ledger is deployed to.
    pub chain_id: u64,
    /// The deploying account, receiving the vesting reserve.
    pub controller: EthereumAddress,
    /// The token metadata.
    #[serde(default)]
    pub metadata: TokenMetadata,
    /// The initial holders, parallel to `initial_balances`.
    pub initial_holders: Vec<EthereumAddress>,
    /// The initial balances, parallel to `initial_holders`.
    pub initial_balances: Vec<Balance>,
    /// The amount minted to the controller to fund the vesting.
    pub vesting_reserve: Balance,
}
