//! The distribution plan, as loaded from JSON.

use primitives_ethereum::EthereumAddress;
use serde::{Deserialize, Serialize};
use token_ledger::{Balance, Timestamp, TokenMetadata};

/// The full description of the token distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DistributionPlan {
    /// The deploying account, the controller of the vesting reserve.
    pub deployer: EthereumAddress,
    /// The nonce of the deployer at the ledger deployment, the lock is deployed right after.
    #[serde(default)]
    pub deployer_nonce: u64,
    /// The identifier of the network.
    pub chain_id: u64,
    /// The token metadata.
    #[serde(default)]
    pub token: TokenMetadata,
    /// The initial holders.
    pub prefunded_accounts: Vec<PrefundedAccount>,
    /// The beneficiary of the vested lock.
    pub vesting_account: EthereumAddress,
    /// The amount to lock under vesting.
    #[serde(with = "balance_string")]
    pub vested_amount: Balance,
    /// The duration of each vesting stage, in seconds.
    pub stage_duration: Timestamp,
    /// The share unlocked at each stage, in basis points.
    pub percents: Vec<u16>,
    /// The unix time the first stage starts at.
    pub start: Timestamp,
}

/// An initial holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrefundedAccount {
    /// The holder.
    pub address: EthereumAddress,
    /// The initial balance.
    #[serde(with = "balance_string")]
    pub amount: Balance,
}

/// The balance as a decimal string, as it overflows the JSON safe integers.
pub mod balance_string {
    use serde::{Deserialize, Deserializer, Serializer};
    use token_ledger::Balance;

    pub fn serialize<S: Serializer>(value: &Balance, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Balance, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}
