//! Traits we use and expose.

use primitives_ethereum::{EcdsaSignature, EthereumAddress};

/// The verifier for the Ethereum signature.
///
/// The idea is we don't pass in the message we use for the verification, but instead we pass in
/// the message parameters.
///
/// This abstraction is built with EIP-712 in mind, but can also be implemented with any generic
/// ECDSA signature.
pub trait EthereumSignatureVerifier {
    /// The type describing the parameters used to construct a message.
    type MessageParams;

    /// Generate a message and verify the provided `signature` against the said message.
    /// Extract the [`EthereumAddress`] from the signature and return it.
    ///
    /// The caller should check that the extracted address matches what is expected, as successful
    /// recovery does not necessarily guarantee the correctness of the signature - that can only
    /// be achieved with checking the recovered address against the expected one.
    fn recover_signer(
        &self,
        signature: &EcdsaSignature,
        message_params: &Self::MessageParams,
    ) -> Option<EthereumAddress>;
}

/// Calls [`EthereumSignatureVerifier::recover_signer`] and then checks that the `signer`
/// matches the recovered address.
pub fn verify_ethereum_signature<T: EthereumSignatureVerifier>(
    verifier: &T,
    signature: &EcdsaSignature,
    message_params: &T::MessageParams,
    signer: &EthereumAddress,
) -> bool {
    let recovered = match verifier.recover_signer(signature, message_params) {
        Some(recovered) => recovered,
        None => return false,
    };
    &recovered == signer
}
