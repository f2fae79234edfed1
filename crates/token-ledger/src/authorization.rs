//! The EIP-3009 signed transfer authorizations.
//!
//! An authorization is identified by the `(authorizer, nonce)` pair. Nonces are random rather than
//! sequential, so a holder can have any number of outstanding authorizations at once. Every pair
//! moves from [`AuthorizationState::Unused`] to either [`AuthorizationState::Used`] or
//! [`AuthorizationState::Cancelled`] exactly once and stays there.

use std::collections::BTreeMap;

use eip3009::{AuthorizationMessage, CancelAuthorization, Nonce, TransferAuthorization};
use primitives_ethereum::{EcdsaSignature, EthereumAddress};
use tracing::{info, warn};

use crate::{
    error::{AuthorizationError, LedgerError},
    traits::{verify_ethereum_signature, EthereumSignatureVerifier},
    types::{AuthorizationMessageParams, AuthorizationState, CallContext, Event, Timestamp},
    TokenLedger,
};

/// The states of the authorization nonces.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationRegistry {
    /// The terminal states, absent entries are unused.
    states: BTreeMap<(EthereumAddress, Nonce), AuthorizationState>,
}

impl AuthorizationRegistry {
    /// The state of the given nonce of the given authorizer.
    pub fn state(&self, authorizer: &EthereumAddress, nonce: &Nonce) -> AuthorizationState {
        self.states
            .get(&(*authorizer, *nonce))
            .copied()
            .unwrap_or_default()
    }

    /// Check that the nonce can still be used or cancelled.
    fn ensure_unused(
        &self,
        authorizer: &EthereumAddress,
        nonce: &Nonce,
    ) -> Result<(), AuthorizationError> {
        match self.state(authorizer, nonce) {
            AuthorizationState::Unused => Ok(()),
            AuthorizationState::Used => Err(AuthorizationError::NonceReused),
            AuthorizationState::Cancelled => Err(AuthorizationError::NonceCancelled),
        }
    }

    /// Move an unused nonce to a terminal state.
    fn finalize(&mut self, authorizer: EthereumAddress, nonce: Nonce, state: AuthorizationState) {
        debug_assert!(state.is_terminal());
        let previous = self.states.insert((authorizer, nonce), state);
        debug_assert!(previous.is_none());
    }
}

/// Check that `now` is strictly inside the validity window.
fn ensure_valid_at(
    params: &TransferAuthorization,
    now: Timestamp,
) -> Result<(), AuthorizationError> {
    if now <= params.valid_after {
        return Err(AuthorizationError::NotYetValid {
            valid_after: params.valid_after,
            now,
        });
    }
    if now >= params.valid_before {
        return Err(AuthorizationError::Expired {
            valid_before: params.valid_before,
            now,
        });
    }
    Ok(())
}

impl<V> TokenLedger<V>
where
    V: EthereumSignatureVerifier<MessageParams = AuthorizationMessageParams>,
{
    /// The state of the given nonce of the given authorizer.
    pub fn authorization_state(
        &self,
        authorizer: &EthereumAddress,
        nonce: &Nonce,
    ) -> AuthorizationState {
        self.authorizations.state(authorizer, nonce)
    }

    /// Execute a transfer signed by the payer, submitted by anyone.
    pub fn transfer_with_authorization(
        &mut self,
        ctx: &CallContext,
        params: TransferAuthorization,
        signature: &EcdsaSignature,
    ) -> Result<(), LedgerError> {
        self.execute_transfer_authorization(
            ctx,
            AuthorizationMessage::TransferWithAuthorization(params),
            params,
            signature,
        )
    }

    /// Execute a transfer signed by the payer, submitted by the payee.
    ///
    /// Prevents a front-runner from executing the authorization outside of the payee's own call.
    pub fn receive_with_authorization(
        &mut self,
        ctx: &CallContext,
        params: TransferAuthorization,
        signature: &EcdsaSignature,
    ) -> Result<(), LedgerError> {
        if ctx.caller != params.to {
            let err = AuthorizationError::CallerMismatch {
                caller: ctx.caller,
                payee: params.to,
            };
            warn!(message = "Receive authorization submitted by a non-payee", error = %err);
            return Err(err.into());
        }
        self.execute_transfer_authorization(
            ctx,
            AuthorizationMessage::ReceiveWithAuthorization(params),
            params,
            signature,
        )
    }

    /// Cancel an unused nonce, signed by its authorizer.
    pub fn cancel_authorization(
        &mut self,
        ctx: &CallContext,
        params: CancelAuthorization,
        signature: &EcdsaSignature,
    ) -> Result<(), LedgerError> {
        let CancelAuthorization { authorizer, nonce } = params;
        let message = AuthorizationMessage::CancelAuthorization(params);

        self.ensure_authorization_usable(&message, signature)
            .map_err(|err| {
                warn!(
                    message = "Authorization cancellation rejected",
                    %authorizer,
                    nonce = %hex::encode(nonce),
                    error = %err,
                );
                err
            })?;

        self.authorizations
            .finalize(authorizer, nonce, AuthorizationState::Cancelled);
        info!(
            message = "Authorization cancelled",
            %authorizer,
            nonce = %hex::encode(nonce),
            submitter = %ctx.caller,
        );
        self.events
            .push(Event::AuthorizationCanceled { authorizer, nonce });
        Ok(())
    }

    /// Run the checks in order and apply the transfer only if all of them pass.
    fn execute_transfer_authorization(
        &mut self,
        ctx: &CallContext,
        message: AuthorizationMessage,
        params: TransferAuthorization,
        signature: &EcdsaSignature,
    ) -> Result<(), LedgerError> {
        let TransferAuthorization {
            from,
            to,
            value,
            nonce,
            ..
        } = params;

        let result = ensure_valid_at(&params, ctx.timestamp)
            .and_then(|()| self.ensure_authorization_usable(&message, signature))
            .map_err(LedgerError::from)
            .and_then(|()| self.ensure_transfer(from, to, value));
        if let Err(err) = result {
            warn!(
                message = "Transfer authorization rejected",
                authorizer = %from,
                nonce = %hex::encode(nonce),
                error = %err,
            );
            return Err(err);
        }

        self.authorizations
            .finalize(from, nonce, AuthorizationState::Used);
        info!(
            message = "Authorization used",
            authorizer = %from,
            nonce = %hex::encode(nonce),
            submitter = %ctx.caller,
        );
        self.events.push(Event::AuthorizationUsed {
            authorizer: from,
            nonce,
        });
        self.apply_transfer(from, to, value);
        Ok(())
    }

    /// Check the nonce state and then the signature.
    fn ensure_authorization_usable(
        &self,
        message: &AuthorizationMessage,
        signature: &EcdsaSignature,
    ) -> Result<(), AuthorizationError> {
        let authorizer = message.authorizer();
        self.authorizations
            .ensure_unused(&authorizer, message.nonce())?;

        let message_params = AuthorizationMessageParams {
            domain_separator: self.domain_separator,
            message: *message,
        };
        if !verify_ethereum_signature(&self.verifier, signature, &message_params, &authorizer) {
            return Err(AuthorizationError::SignatureInvalid);
        }
        Ok(())
    }
}
