//! Bootstrap of the token distribution: the ledger, the vested lock and the lock funding.

use token_ledger::{CallContext, LedgerError, LedgerParams, Timestamp, TokenLedger};
use tracing::info;
use vested_lock::{LockParams, VestedLock};

pub mod address;
pub mod plan;
pub mod record;

pub use address::contract_address;
pub use plan::{DistributionPlan, PrefundedAccount};
pub use record::{record_file_name, save_record, DeploymentRecord, SaveRecordError};

/// An error that can occur during the bootstrap.
#[derive(thiserror::Error, Debug)]
pub enum BootstrapError {
    /// The deployer nonce is exhausted.
    #[error("deployer nonce overflow")]
    NonceOverflow,
    /// The ledger could not be constructed.
    #[error("unable to construct the ledger: {0}")]
    Ledger(#[source] token_ledger::ConstructionError),
    /// The lock could not be constructed.
    #[error("unable to construct the vested lock: {0}")]
    Lock(#[source] vested_lock::ConstructionError),
    /// The lock allowance could not be set.
    #[error("unable to approve the vested lock: {0}")]
    Approve(#[source] LedgerError),
    /// The lock could not be funded.
    #[error("unable to fund the vested lock: {0}")]
    Funding(#[source] vested_lock::Error<LedgerError>),
}

/// The bootstrapped distribution.
#[derive(Debug)]
pub struct Deployment {
    /// The ledger, with the initial balances and the lock funded.
    pub ledger: TokenLedger,
    /// The funded lock.
    pub lock: VestedLock,
    /// The record to persist.
    pub record: DeploymentRecord,
}

/// Construct the ledger and the lock at the addresses the deployer would create them at,
/// then approve and fund the lock on behalf of the deployer at `now`.
pub fn bootstrap(plan: &DistributionPlan, now: Timestamp) -> Result<Deployment, BootstrapError> {
    let ledger_address = contract_address(&plan.deployer, plan.deployer_nonce);
    let lock_nonce = plan
        .deployer_nonce
        .checked_add(1)
        .ok_or(BootstrapError::NonceOverflow)?;
    let lock_address = contract_address(&plan.deployer, lock_nonce);

    let (initial_holders, initial_balances): (Vec<_>, Vec<_>) = plan
        .prefunded_accounts
        .iter()
        .map(|account| (account.address, account.amount))
        .unzip();
    let mut ledger = TokenLedger::new(LedgerParams {
        address: ledger_address,
        chain_id: plan.chain_id,
        controller: plan.deployer,
        metadata: plan.token.clone(),
        initial_holders,
        initial_balances,
        vesting_reserve: plan.vested_amount,
    })
    .map_err(BootstrapError::Ledger)?;
    info!(message = "Ledger deployed", address = %ledger_address);

    let mut lock = VestedLock::new(LockParams {
        address: lock_address,
        ledger: ledger_address,
        beneficiary: plan.vesting_account,
        funding_controller: plan.deployer,
        vested_amount: plan.vested_amount,
        stage_duration: plan.stage_duration,
        percents: plan.percents.clone(),
        start: plan.start,
    })
    .map_err(BootstrapError::Lock)?;
    info!(message = "Vested lock deployed", address = %lock_address);

    let ctx = CallContext::new(plan.deployer, now);
    ledger
        .approve(&ctx, lock_address, plan.vested_amount)
        .map_err(BootstrapError::Approve)?;
    lock.lock_funds(&ctx, &mut ledger)
        .map_err(BootstrapError::Funding)?;

    let record = DeploymentRecord {
        ledger: ledger_address,
        vested_lock: lock_address,
        deployer: plan.deployer,
        prefunded_accounts: plan.prefunded_accounts.clone(),
        vesting_account: plan.vesting_account,
        vested_amount: plan.vested_amount,
        stage_duration: plan.stage_duration,
        percents: plan.percents.clone(),
        start: plan.start,
    };

    Ok(Deployment {
        ledger,
        lock,
        record,
    })
}
