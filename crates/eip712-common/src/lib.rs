//! Common logic for EIP-712 typed data message construction and signature verification.

use hex_literal::hex;
pub use primitives_ethereum::{EcdsaSignature, EthereumAddress};
use sha3::{Digest, Keccak256};

/// The `EIP712Domain` type as it is hashed into the typehash.
pub const EIP712_DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// `EIP712Domain` typehash, `keccak256(EIP712_DOMAIN_TYPE)`.
pub const EIP712_DOMAIN_TYPEHASH: [u8; 32] =
    hex!("8b73c3c69bb8fe3d512ecc4cf759cc79239f7b179b0ffacaa9a75d522b39400f");

/// A type alias representing a `string` solidity type.
pub type EthString = str;
/// A type alias representing a `uint256` solidity type.
pub type EthUint256 = [u8; 32];
/// A type alias representing an `address` solidity type.
pub type EthAddress = [u8; 20];
/// A type alias representing the `bytes32` solidity type.
pub type EthBytes32 = [u8; 32];

/// A first number of an EIP191 message.
const EIP191_MAGIC_BYTE: u8 = 0x19;
/// The EIP191 version for the EIP-712 structured data.
const EIP191_VERSION_STRUCTURED_DATA: u8 = 0x01;

/// Upper bound (inclusive) for the `s` value of a canonical signature: `secp256k1n / 2`.
const SECP256K1_HALF_ORDER: [u8; 32] =
    hex!("7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0");

/// Keccak-256 of the given data.
pub fn keccak_256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}

/// Encode an unsigned integer as a big-endian `uint256` word.
pub fn encode_uint256(value: u128) -> EthUint256 {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Encode an `address` as a left-padded 32 bytes word.
pub fn encode_address(address: &EthAddress) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address);
    word
}

/// Prepare a hash for the whole EIP-712 message.
pub fn make_eip712_message_hash(domain_separator: &[u8; 32], payload_hash: &[u8; 32]) -> [u8; 32] {
    let mut msg: [u8; 66] = [0; 66];
    msg[0] = EIP191_MAGIC_BYTE;
    msg[1] = EIP191_VERSION_STRUCTURED_DATA;
    msg[2..34].copy_from_slice(domain_separator);
    msg[34..66].copy_from_slice(payload_hash);
    keccak_256(&msg)
}

/// The EIP712 domain.
#[derive(Debug, Clone, Copy)]
pub struct Domain<'a> {
    /// The name of the domain.
    pub name: &'a EthString,
    /// The version of the domain.
    /// Bump this value if you need to make the old signed messages obsolete.
    pub version: &'a EthString,
    /// The Chain ID of the Ethereum chain this code runs at.
    pub chain_id: &'a EthUint256,
    /// The verifying contract, intended for the address of the contract that will be verifying
    /// the signature.
    pub verifying_contract: &'a EthAddress,
}

/// Prepare a hash for `EIP712Domain` data type, also known as the domain separator.
pub fn make_domain_hash(domain: Domain<'_>) -> [u8; 32] {
    let mut buf = [0u8; 160];
    buf[0..32].copy_from_slice(&EIP712_DOMAIN_TYPEHASH);
    buf[32..64].copy_from_slice(&keccak_256(domain.name.as_bytes()));
    buf[64..96].copy_from_slice(&keccak_256(domain.version.as_bytes()));
    buf[96..128].copy_from_slice(domain.chain_id);
    buf[128..160].copy_from_slice(&encode_address(domain.verifying_contract));
    keccak_256(&buf)
}

/// Prepare a hash for the payload.
/// To be used at EIP-712 message payload.
pub fn make_payload_hash<'a>(
    typehash: &[u8; 32],
    datahashes: impl IntoIterator<Item = &'a [u8; 32]>,
) -> [u8; 32] {
    let datahashes = datahashes.into_iter();
    let (datahashes_size, _) = datahashes.size_hint();
    let mut buf = Vec::with_capacity(32 + datahashes_size * 32);
    buf.extend_from_slice(typehash);
    for item in datahashes {
        buf.extend_from_slice(item);
    }
    keccak_256(&buf)
}

/// Prepare the EIP-712 message.
pub fn make_message_hash(domain: Domain<'_>, payload_hash: &[u8; 32]) -> [u8; 32] {
    let domain_hash = make_domain_hash(domain);
    make_eip712_message_hash(&domain_hash, payload_hash)
}

/// Map the Ethereum `v` byte to a secp256k1 recovery id.
///
/// Both the legacy `27`/`28` and the raw `0`/`1` forms are accepted.
fn recovery_id(v: u8) -> Option<libsecp256k1::RecoveryId> {
    let id = match v {
        27 | 28 => v - 27,
        0 | 1 => v,
        _ => return None,
    };
    libsecp256k1::RecoveryId::parse(id).ok()
}

/// Extract the signer address from the signature and the message.
///
/// Returns [`None`] for any signature that does not recover to a proper address: an unknown
/// recovery byte, a malleable (high `s`) or out-of-range signature, a failed recovery, or
/// a recovery to the zero address.
pub fn recover_signer(sig: &EcdsaSignature, msg: &[u8; 32]) -> Option<EthereumAddress> {
    let recovery_id = recovery_id(sig.v())?;

    // Only the lower-`s` form is canonical.
    if sig.s() > SECP256K1_HALF_ORDER {
        return None;
    }

    let mut rs = [0u8; 64];
    rs.copy_from_slice(&sig.0[0..64]);
    let signature = libsecp256k1::Signature::parse_standard(&rs).ok()?;
    let message = libsecp256k1::Message::parse(msg);
    let pubkey = libsecp256k1::recover(&message, &signature, &recovery_id).ok()?;

    let mut raw_pubkey = [0u8; 64];
    raw_pubkey.copy_from_slice(&pubkey.serialize()[1..65]);
    let address = ecdsa_public_key_to_ethereum_address(&raw_pubkey);
    if address.is_zero() {
        return None;
    }
    Some(address)
}

/// Verify EIP-712 typed signature based on provided domain and payload hash.
pub fn verify_signature(
    signature: &EcdsaSignature,
    domain: Domain<'_>,
    payload_hash: &[u8; 32],
) -> Option<EthereumAddress> {
    let msg_hash = make_message_hash(domain, payload_hash);
    recover_signer(signature, &msg_hash)
}

/// Verify EIP-712 typed signature based on a precomputed domain separator and payload hash.
pub fn verify_signature_with_separator(
    signature: &EcdsaSignature,
    domain_separator: &[u8; 32],
    payload_hash: &[u8; 32],
) -> Option<EthereumAddress> {
    let msg_hash = make_eip712_message_hash(domain_separator, payload_hash);
    recover_signer(signature, &msg_hash)
}

/// Convert the uncompressed ECDSA public key (without the `0x04` tag) to Ethereum address.
pub fn ecdsa_public_key_to_ethereum_address(pubkey: &[u8; 64]) -> EthereumAddress {
    let mut address = [0u8; 20];
    address.copy_from_slice(&keccak_256(pubkey)[12..]);
    EthereumAddress(address)
}
