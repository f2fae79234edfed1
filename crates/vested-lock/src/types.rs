//! Custom types we use.

use primitives_ethereum::EthereumAddress;
use serde::{Deserialize, Serialize};
use token_ledger::{Balance, Timestamp};

/// The lock construction parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LockParams {
    /// The address the lock is deployed at, the escrow account on the ledger.
    pub address: EthereumAddress,
    /// The address of the ledger holding the locked funds.
    pub ledger: EthereumAddress,
    /// The only account that can claim.
    pub beneficiary: EthereumAddress,
    /// The only account that can fund the lock.
    pub funding_controller: EthereumAddress,
    /// The amount pulled from the funding controller at funding.
    pub vested_amount: Balance,
    /// The duration of each stage, in seconds.
    pub stage_duration: Timestamp,
    /// The share unlocked at each stage, in basis points.
    pub percents: Vec<u16>,
    /// The unix time the first stage starts at.
    pub start: Timestamp,
}

/// Whether the lock holds the funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FundingState {
    /// Awaiting the funding.
    #[default]
    Unfunded,
    /// Funded, which can happen only once.
    Funded {
        /// The amount deposited.
        total_deposited: Balance,
    },
}

/// The lock events, for the off-chain observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The lock was funded.
    FundsLocked {
        /// The funding controller.
        controller: EthereumAddress,
        /// The deposited amount.
        amount: Balance,
    },
    /// The beneficiary claimed the vested tokens.
    TokensClaimed {
        /// The beneficiary.
        beneficiary: EthereumAddress,
        /// The claimed amount.
        amount: Balance,
        /// The sum of all claims so far.
        total_claimed: Balance,
    },
}
