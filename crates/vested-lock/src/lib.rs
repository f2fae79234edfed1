//! A single-allocation escrow releasing the funds on a staged schedule.
//!
//! The lock is funded exactly once by pulling the vested amount from the funding controller
//! through the ledger allowance. From the start on, the beneficiary can claim the cumulative
//! share of the deposit unlocked by the stages reached so far. The vesting is computed from
//! the recorded deposit only, so the tokens sent to the lock account directly are never counted.

use primitives_ethereum::EthereumAddress;
use token_ledger::{Balance, CallContext, Timestamp};
use tracing::{info, warn};
use vesting_schedule_staged::{traits::SplitFracScaler, StagedSchedule};

pub mod error;
pub mod traits;
pub mod types;

#[cfg(test)]
mod mock;
#[cfg(test)]
mod tests;

pub use error::*;
pub use traits::LedgerInterface;
pub use types::*;

/// The scaler used for computing the vested share of the deposit.
type Scaler = SplitFracScaler<Balance, u16>;

/// The vested lock.
#[derive(Debug, Clone)]
pub struct VestedLock {
    /// The address the lock is deployed at.
    address: EthereumAddress,
    /// The address of the ledger holding the locked funds.
    ledger: EthereumAddress,
    /// The only account that can claim.
    beneficiary: EthereumAddress,
    /// The only account that can fund the lock.
    funding_controller: EthereumAddress,
    /// The amount pulled at funding.
    vested_amount: Balance,
    /// The release schedule.
    schedule: StagedSchedule<Timestamp>,
    /// The unix time the first stage starts at.
    start: Timestamp,
    /// Whether the funds were deposited.
    funding: FundingState,
    /// The sum of all claims so far.
    claimed: Balance,
    /// The events not yet taken by the observer.
    events: Vec<Event>,
}

impl VestedLock {
    /// Construct the lock, awaiting the funding.
    pub fn new(params: LockParams) -> Result<Self, ConstructionError> {
        let LockParams {
            address,
            ledger,
            beneficiary,
            funding_controller,
            vested_amount,
            stage_duration,
            percents,
            start,
        } = params;

        let schedule = StagedSchedule::new(stage_duration, percents)?;
        if beneficiary.is_zero() {
            return Err(ConstructionError::ZeroAddressBeneficiary);
        }
        if funding_controller.is_zero() {
            return Err(ConstructionError::ZeroAddressFundingController);
        }

        info!(
            message = "Lock constructed",
            %address,
            %beneficiary,
            vested_amount,
            start,
            stage_duration,
            stages = schedule.percents().len(),
        );

        Ok(Self {
            address,
            ledger,
            beneficiary,
            funding_controller,
            vested_amount,
            schedule,
            start,
            funding: FundingState::Unfunded,
            claimed: 0,
            events: Vec::new(),
        })
    }

    pub fn address(&self) -> EthereumAddress {
        self.address
    }

    pub fn ledger(&self) -> EthereumAddress {
        self.ledger
    }

    pub fn beneficiary(&self) -> EthereumAddress {
        self.beneficiary
    }

    pub fn funding_controller(&self) -> EthereumAddress {
        self.funding_controller
    }

    pub fn vested_amount(&self) -> Balance {
        self.vested_amount
    }

    pub fn schedule(&self) -> &StagedSchedule<Timestamp> {
        &self.schedule
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn funding_state(&self) -> FundingState {
        self.funding
    }

    /// The sum of all claims so far.
    pub fn claimed(&self) -> Balance {
        self.claimed
    }

    /// The events emitted so far and not yet taken.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Take the emitted events, leaving the queue empty.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// The amount the beneficiary can claim at `now`.
    pub fn available_vested_tokens(&self, now: Timestamp) -> Balance {
        let FundingState::Funded { total_deposited } = self.funding else {
            return 0;
        };
        let Some(duration_since_start) = now.checked_sub(self.start) else {
            return 0;
        };
        let vested = match self
            .schedule
            .compute_vested_balance::<Scaler, _>(&total_deposited, duration_since_start)
        {
            Ok(vested) => vested,
            Err(error) => {
                // The vested share never exceeds the whole deposit, so this is a bug.
                debug_assert!(false, "vested balance computation failed: {error:?}");
                warn!(
                    message = "Vested balance computation failed",
                    lock = %self.address,
                    ?error,
                    total_deposited,
                    duration_since_start,
                );
                return 0;
            }
        };
        vested.saturating_sub(self.claimed)
    }

    /// Pull the vested amount from the funding controller.
    ///
    /// The controller must have approved the lock address for at least the vested amount.
    pub fn lock_funds<L: LedgerInterface>(
        &mut self,
        ctx: &CallContext,
        ledger: &mut L,
    ) -> Result<(), Error<L::Error>> {
        if matches!(self.funding, FundingState::Funded { .. }) {
            return Err(FundingStateError::AlreadyFunded.into());
        }
        if ctx.caller != self.funding_controller {
            return Err(AccessError::CallerNotFundingController { caller: ctx.caller }.into());
        }
        self.ensure_ledger(ledger)?;

        let amount = self.vested_amount;
        ledger
            .transfer_from(
                &CallContext::new(self.address, ctx.timestamp),
                self.funding_controller,
                self.address,
                amount,
            )
            .map_err(|err| {
                warn!(message = "Funding transfer failed", lock = %self.address, amount);
                Error::Ledger(err)
            })?;

        self.funding = FundingState::Funded {
            total_deposited: amount,
        };
        info!(message = "Funds locked", lock = %self.address, amount);
        self.events.push(Event::FundsLocked {
            controller: self.funding_controller,
            amount,
        });
        Ok(())
    }

    /// Transfer everything vested and not yet claimed to the beneficiary.
    pub fn claim_vested_tokens<L: LedgerInterface>(
        &mut self,
        ctx: &CallContext,
        ledger: &mut L,
    ) -> Result<Balance, Error<L::Error>> {
        if ctx.caller != self.beneficiary {
            return Err(AccessError::CallerNotBeneficiary { caller: ctx.caller }.into());
        }
        self.ensure_ledger(ledger)?;

        let amount = self.available_vested_tokens(ctx.timestamp);
        if amount == 0 {
            return Err(ClaimError::NothingAvailable.into());
        }

        ledger
            .transfer(
                &CallContext::new(self.address, ctx.timestamp),
                self.beneficiary,
                amount,
            )
            .map_err(|err| {
                warn!(message = "Claim transfer failed", lock = %self.address, amount);
                Error::Ledger(err)
            })?;

        // Can't overflow, as the claims never exceed the deposit.
        self.claimed = self.claimed.saturating_add(amount);
        info!(
            message = "Tokens claimed",
            beneficiary = %self.beneficiary,
            amount,
            total_claimed = self.claimed,
        );
        self.events.push(Event::TokensClaimed {
            beneficiary: self.beneficiary,
            amount,
            total_claimed: self.claimed,
        });
        Ok(amount)
    }

    fn ensure_ledger<L: LedgerInterface>(&self, ledger: &L) -> Result<(), AccessError> {
        let actual = ledger.address();
        if actual != self.ledger {
            return Err(AccessError::LedgerMismatch {
                expected: self.ledger,
                actual,
            });
        }
        Ok(())
    }
}
