//! Common test utils for EIP-712 typed data message construction and signature verification.

use eip712_common::*;
use ethers_core::types::transaction::eip712::{Eip712, TypedData};
pub use libsecp256k1::SecretKey;
use primitives_ethereum::{EcdsaSignature, EthereumAddress};

/// Create a new ECDSA secret key from the seed.
pub fn ecdsa_pair(seed: &[u8]) -> SecretKey {
    SecretKey::parse(&keccak_256(seed)).unwrap()
}

/// Sign a given prehashed message with the given ECDSA secret key.
///
/// The recovery byte is encoded in the `27`/`28` form.
pub fn ecdsa_sign(pair: &SecretKey, msg: &[u8; 32]) -> EcdsaSignature {
    let (signature, recovery_id) = libsecp256k1::sign(&libsecp256k1::Message::parse(msg), pair);
    let mut buf = [0u8; 65];
    buf[0..64].copy_from_slice(&signature.serialize());
    buf[64] = recovery_id.serialize() + 27;
    EcdsaSignature(buf)
}

/// Compute the EIP-712 digest of a typed data JSON with an independent encoder.
pub fn typed_data_hash(type_data_json: &str) -> [u8; 32] {
    let typed_data: TypedData = serde_json::from_str(type_data_json).unwrap();
    typed_data.encode_eip712().unwrap()
}

/// Sign a given EIP-712 typed data JSON with the given ECDSA secret key.
pub fn ecdsa_sign_typed_data(pair: &SecretKey, type_data_json: &str) -> EcdsaSignature {
    ecdsa_sign(pair, &typed_data_hash(type_data_json))
}

/// Create an Ethereum address from the given ECDSA secret key.
pub fn ethereum_address(pair: &SecretKey) -> EthereumAddress {
    let public = libsecp256k1::PublicKey::from_secret_key(pair);
    let mut public_bytes = [0u8; 64];
    public_bytes.copy_from_slice(&public.serialize()[1..]);
    ecdsa_public_key_to_ethereum_address(&public_bytes)
}

/// Create an Ethereum address from the given seed.
///
/// This algorithm will return the addresses corresponding to the [`SecretKey`]s generated
/// by [`ecdsa_pair`] with the same `seed`.
pub fn ethereum_address_from_seed(seed: &[u8]) -> EthereumAddress {
    let pair = ecdsa_pair(seed);
    ethereum_address(&pair)
}

/// The EIP-712 domain as it is put into the typed data JSON.
#[derive(Debug, Clone, Copy)]
pub struct TypedDataDomain<'a> {
    /// The domain name.
    pub name: &'a str,
    /// The domain version.
    pub version: &'a str,
    /// The chain ID.
    pub chain_id: u64,
    /// The verifying contract address.
    pub verifying_contract: EthereumAddress,
}

/// Assemble a typed data JSON under the four-field EIP-712 domain.
///
/// The `fields` is the JSON array of the primary type fields, and the `message` is the JSON
/// object with the values.
pub fn typed_data_json(
    domain: &TypedDataDomain<'_>,
    primary_type: &str,
    fields: &str,
    message: &str,
) -> String {
    format!(
        r#"{{
            "primaryType": "{primary_type}",
            "domain": {{
                "name": "{name}",
                "version": "{version}",
                "chainId": "{chain_id:#x}",
                "verifyingContract": "{verifying_contract}"
            }},
            "message": {message},
            "types": {{
                "EIP712Domain": [
                    {{ "name": "name", "type": "string" }},
                    {{ "name": "version", "type": "string" }},
                    {{ "name": "chainId", "type": "uint256" }},
                    {{ "name": "verifyingContract", "type": "address" }}
                ],
                "{primary_type}": {fields}
            }}
        }}"#,
        name = domain.name,
        version = domain.version,
        chain_id = domain.chain_id,
        verifying_contract = domain.verifying_contract,
    )
}
