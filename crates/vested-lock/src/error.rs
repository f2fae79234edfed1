//! The lock errors.

use primitives_ethereum::EthereumAddress;
use vesting_schedule_staged::ScheduleError;

/// An error that can occur while constructing the lock.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// The schedule is invalid.
    #[error("invalid schedule: {0}")]
    Schedule(#[from] ScheduleError),
    /// The beneficiary is the zero address.
    #[error("beneficiary is the zero address")]
    ZeroAddressBeneficiary,
    /// The funding controller is the zero address.
    #[error("funding controller is the zero address")]
    ZeroAddressFundingController,
}

/// The funding was attempted in the wrong state.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundingStateError {
    /// The lock can be funded only once.
    #[error("lock is already funded")]
    AlreadyFunded,
}

/// The claim can not proceed.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimError {
    /// Nothing is vested beyond what was already claimed.
    #[error("no vested tokens available")]
    NothingAvailable,
}

/// The call is not permitted.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// Only the beneficiary can claim.
    #[error("caller {caller} is not the beneficiary")]
    CallerNotBeneficiary {
        /// The caller.
        caller: EthereumAddress,
    },
    /// Only the funding controller can fund.
    #[error("caller {caller} is not the funding controller")]
    CallerNotFundingController {
        /// The caller.
        caller: EthereumAddress,
    },
    /// The lock was handed a ledger other than the one it holds the funds at.
    #[error("lock is bound to ledger {expected}, got {actual}")]
    LedgerMismatch {
        /// The ledger the lock was constructed with.
        expected: EthereumAddress,
        /// The ledger the lock was handed.
        actual: EthereumAddress,
    },
}

/// An error that can occur while executing a lock operation.
///
/// Any error leaves the lock and the ledger state unchanged.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error<E> {
    /// The call is not permitted.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// The funding was attempted in the wrong state.
    #[error(transparent)]
    FundingState(#[from] FundingStateError),
    /// The claim can not proceed.
    #[error(transparent)]
    Claim(#[from] ClaimError),
    /// The ledger rejected the transfer.
    #[error("ledger error: {0}")]
    Ledger(#[source] E),
}
