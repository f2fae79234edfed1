//! The EIP-712 backed signature verifier.

use primitives_ethereum::{EcdsaSignature, EthereumAddress};

use crate::{traits::EthereumSignatureVerifier, types::AuthorizationMessageParams};

/// Verifies the EIP-3009 authorizations signed as EIP-712 typed data.
#[derive(Debug, Clone, Copy, Default)]
pub struct Eip3009Verifier;

impl EthereumSignatureVerifier for Eip3009Verifier {
    type MessageParams = AuthorizationMessageParams;

    fn recover_signer(
        &self,
        signature: &EcdsaSignature,
        message_params: &Self::MessageParams,
    ) -> Option<EthereumAddress> {
        eip3009::recover_authorizer(
            signature,
            &message_params.domain_separator,
            &message_params.message,
        )
    }
}
