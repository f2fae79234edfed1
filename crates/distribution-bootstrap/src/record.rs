//! The deployment record persisted after the bootstrap.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use primitives_ethereum::EthereumAddress;
use serde::{Deserialize, Serialize};
use token_ledger::{Balance, Timestamp};

use crate::plan::{balance_string, PrefundedAccount};

/// The deployment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeploymentRecord {
    /// The address of the ledger.
    pub ledger: EthereumAddress,
    /// The address of the vested lock.
    pub vested_lock: EthereumAddress,
    /// The deploying account.
    pub deployer: EthereumAddress,
    /// The initial holders.
    pub prefunded_accounts: Vec<PrefundedAccount>,
    /// The beneficiary of the vested lock.
    pub vesting_account: EthereumAddress,
    /// The amount locked under vesting.
    #[serde(with = "balance_string")]
    pub vested_amount: Balance,
    /// The duration of each vesting stage, in seconds.
    pub stage_duration: Timestamp,
    /// The share unlocked at each stage, in basis points.
    pub percents: Vec<u16>,
    /// The unix time the first stage starts at.
    pub start: Timestamp,
}

/// An error that can occur while saving the record.
#[derive(thiserror::Error, Debug)]
pub enum SaveRecordError {
    /// The record could not be encoded.
    #[error("unable to encode the record: {0}")]
    Encode(#[source] serde_json::Error),
    /// The record could not be written.
    #[error("unable to write the record to {}: {source}", path.display())]
    Write {
        /// The path of the record file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// The name of the record file for the deployment to `network` at the given time.
pub fn record_file_name(network: &str, time: &NaiveDateTime) -> String {
    format!("{network}__{}.json", time.format("%Y-%m-%d_%H-%M-%S"))
}

/// Write the record as a pretty-printed JSON into the `dir`, creating it if needed.
///
/// Returns the path of the written file.
pub fn save_record(
    dir: &Path,
    network: &str,
    time: &NaiveDateTime,
    record: &DeploymentRecord,
) -> Result<PathBuf, SaveRecordError> {
    let data = serde_json::to_string_pretty(record).map_err(SaveRecordError::Encode)?;

    let write_err = |path: &Path| {
        let path = path.to_owned();
        move |source| SaveRecordError::Write { path, source }
    };
    std::fs::create_dir_all(dir).map_err(write_err(dir))?;

    let path = dir.join(record_file_name(network, time));
    std::fs::write(&path, data).map_err(write_err(&path))?;
    Ok(path)
}
