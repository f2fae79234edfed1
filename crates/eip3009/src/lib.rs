//! Implements EIP-712 typed verification logic for the EIP-3009 transfer authorizations.
//!
//! There is a closed set of three message types, each with its own typehash, so a signature
//! produced for one kind of authorization can never be replayed as another kind.

use codec::{Decode, Encode, MaxEncodedLen};
use eip712_common::{
    encode_address, encode_uint256, make_payload_hash, verify_signature_with_separator,
    EcdsaSignature, EthBytes32, EthereumAddress,
};
use hex_literal::hex;

/// The `TransferWithAuthorization` type as it is hashed into the typehash.
pub const TRANSFER_WITH_AUTHORIZATION_TYPE: &str = "TransferWithAuthorization(address from,address to,uint256 value,uint256 validAfter,uint256 validBefore,bytes32 nonce)";
/// The `ReceiveWithAuthorization` type as it is hashed into the typehash.
pub const RECEIVE_WITH_AUTHORIZATION_TYPE: &str = "ReceiveWithAuthorization(address from,address to,uint256 value,uint256 validAfter,uint256 validBefore,bytes32 nonce)";
/// The `CancelAuthorization` type as it is hashed into the typehash.
pub const CANCEL_AUTHORIZATION_TYPE: &str = "CancelAuthorization(address authorizer,bytes32 nonce)";

/// `TransferWithAuthorization` typehash.
pub const TRANSFER_WITH_AUTHORIZATION_TYPEHASH: [u8; 32] =
    hex!("7c7c6cdb67a18743f49ec6fa9b35f50d52ed05cbed4cc592e13b44501c1a2267");
/// `ReceiveWithAuthorization` typehash.
pub const RECEIVE_WITH_AUTHORIZATION_TYPEHASH: [u8; 32] =
    hex!("d099cc98ef71107a616c4f0f941f04c322d8e254fe26b3c6668db87aae413de8");
/// `CancelAuthorization` typehash.
pub const CANCEL_AUTHORIZATION_TYPEHASH: [u8; 32] =
    hex!("158b0a9edf7a828aad02f63cd515c68ef2f50ba807396f6d12842833a1597429");

/// A unique per-authorizer value that scopes an authorization to a single use.
pub type Nonce = EthBytes32;

/// The parameters shared by the transfer and receive authorizations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen)]
pub struct TransferAuthorization {
    /// The payer, who signed the authorization.
    pub from: EthereumAddress,
    /// The payee.
    pub to: EthereumAddress,
    /// The amount to move.
    pub value: u128,
    /// The authorization is valid strictly after this unix time.
    ///
    /// Signed as `uint256`, but only the values that fit into `u64` are accepted.
    pub valid_after: u64,
    /// The authorization is valid strictly before this unix time.
    ///
    /// Signed as `uint256`, so "never expires" has to be signed as `u64::MAX`
    /// rather than the `uint256` maximum.
    pub valid_before: u64,
    /// The unique nonce.
    pub nonce: Nonce,
}

/// The parameters of the authorization cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen)]
pub struct CancelAuthorization {
    /// The authorizer of the nonce being cancelled.
    pub authorizer: EthereumAddress,
    /// The nonce to cancel.
    pub nonce: Nonce,
}

/// A typed message that has to be signed for one of the authorization operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen)]
pub enum AuthorizationMessage {
    /// A transfer that anyone can submit.
    TransferWithAuthorization(TransferAuthorization),
    /// A transfer that only the payee can submit.
    ReceiveWithAuthorization(TransferAuthorization),
    /// A cancellation of an unused nonce.
    CancelAuthorization(CancelAuthorization),
}

impl AuthorizationMessage {
    /// The typehash of this message kind.
    pub fn typehash(&self) -> &'static [u8; 32] {
        match self {
            Self::TransferWithAuthorization(_) => &TRANSFER_WITH_AUTHORIZATION_TYPEHASH,
            Self::ReceiveWithAuthorization(_) => &RECEIVE_WITH_AUTHORIZATION_TYPEHASH,
            Self::CancelAuthorization(_) => &CANCEL_AUTHORIZATION_TYPEHASH,
        }
    }

    /// The address that is expected to have signed this message.
    pub fn authorizer(&self) -> EthereumAddress {
        match self {
            Self::TransferWithAuthorization(params) | Self::ReceiveWithAuthorization(params) => {
                params.from
            }
            Self::CancelAuthorization(params) => params.authorizer,
        }
    }

    /// The nonce this message consumes.
    pub fn nonce(&self) -> &Nonce {
        match self {
            Self::TransferWithAuthorization(params) | Self::ReceiveWithAuthorization(params) => {
                &params.nonce
            }
            Self::CancelAuthorization(params) => &params.nonce,
        }
    }

    /// Make the EIP-712 struct hash of this message.
    pub fn payload_hash(&self) -> [u8; 32] {
        match self {
            Self::TransferWithAuthorization(params) | Self::ReceiveWithAuthorization(params) => {
                make_payload_hash(
                    self.typehash(),
                    [
                        &encode_address(&params.from.0),
                        &encode_address(&params.to.0),
                        &encode_uint256(params.value),
                        &encode_uint256(params.valid_after.into()),
                        &encode_uint256(params.valid_before.into()),
                        &params.nonce,
                    ],
                )
            }
            Self::CancelAuthorization(params) => make_payload_hash(
                self.typehash(),
                [&encode_address(&params.authorizer.0), &params.nonce],
            ),
        }
    }
}

/// Recover the signer of an authorization message under the given domain separator.
///
/// The caller must compare the result against [`AuthorizationMessage::authorizer`].
pub fn recover_authorizer(
    signature: &EcdsaSignature,
    domain_separator: &[u8; 32],
    message: &AuthorizationMessage,
) -> Option<EthereumAddress> {
    verify_signature_with_separator(signature, domain_separator, &message.payload_hash())
}

#[cfg(test)]
mod tests {
    use eip712_common::{keccak_256, make_domain_hash, Domain};
    use eip712_common_test_utils::{
        ecdsa_pair, ecdsa_sign_typed_data, ethereum_address_from_seed, typed_data_hash, SecretKey,
        TypedDataDomain,
    };

    use super::*;

    const VERIFYING_CONTRACT: [u8; 20] = hex!("5FbDB2315678afecb367f032d93F642f64180aa3");
    const NONCE: Nonce = hex!("a0b1c2d3e4f5061728394a5b6c7d8e9fa0b1c2d3e4f5061728394a5b6c7d8e9f");

    fn domain_separator() -> [u8; 32] {
        make_domain_hash(Domain {
            name: "Green Minting Token",
            version: "1",
            // Chain ID is 31337 in hex.
            chain_id: &encode_uint256(0x7a69),
            verifying_contract: &VERIFYING_CONTRACT,
        })
    }

    fn typed_data_json(primary_type: &str, fields: &str, message: &str) -> String {
        eip712_common_test_utils::typed_data_json(
            &TypedDataDomain {
                name: "Green Minting Token",
                version: "1",
                chain_id: 31337,
                verifying_contract: EthereumAddress(VERIFYING_CONTRACT),
            },
            primary_type,
            fields,
            message,
        )
    }

    const TRANSFER_FIELDS: &str = r#"[
        { "name": "from", "type": "address" },
        { "name": "to", "type": "address" },
        { "name": "value", "type": "uint256" },
        { "name": "validAfter", "type": "uint256" },
        { "name": "validBefore", "type": "uint256" },
        { "name": "nonce", "type": "bytes32" }
    ]"#;

    const CANCEL_FIELDS: &str = r#"[
        { "name": "authorizer", "type": "address" },
        { "name": "nonce", "type": "bytes32" }
    ]"#;

    fn sample_transfer() -> TransferAuthorization {
        TransferAuthorization {
            from: ethereum_address_from_seed(b"Alice"),
            to: ethereum_address_from_seed(b"Bob"),
            value: 100,
            valid_after: 0,
            valid_before: 1_700_003_600,
            nonce: NONCE,
        }
    }

    fn transfer_json(primary_type: &str, params: &TransferAuthorization) -> String {
        let message = format!(
            r#"{{
                "from": "{}",
                "to": "{}",
                "value": "{}",
                "validAfter": "{}",
                "validBefore": "{}",
                "nonce": "0x{}"
            }}"#,
            params.from,
            params.to,
            params.value,
            params.valid_after,
            params.valid_before,
            hex::encode(params.nonce),
        );
        typed_data_json(primary_type, TRANSFER_FIELDS, &message)
    }

    fn cancel_json(params: &CancelAuthorization) -> String {
        let message = format!(
            r#"{{ "authorizer": "{}", "nonce": "0x{}" }}"#,
            params.authorizer,
            hex::encode(params.nonce),
        );
        typed_data_json("CancelAuthorization", CANCEL_FIELDS, &message)
    }

    fn alice() -> SecretKey {
        ecdsa_pair(b"Alice")
    }

    #[test]
    fn typehashes_match_type_strings() {
        assert_eq!(
            keccak_256(TRANSFER_WITH_AUTHORIZATION_TYPE.as_bytes()),
            TRANSFER_WITH_AUTHORIZATION_TYPEHASH
        );
        assert_eq!(
            keccak_256(RECEIVE_WITH_AUTHORIZATION_TYPE.as_bytes()),
            RECEIVE_WITH_AUTHORIZATION_TYPEHASH
        );
        assert_eq!(
            keccak_256(CANCEL_AUTHORIZATION_TYPE.as_bytes()),
            CANCEL_AUTHORIZATION_TYPEHASH
        );
    }

    #[test]
    fn message_hashes_match_independent_encoder() {
        let params = sample_transfer();
        let cases = [
            (
                AuthorizationMessage::TransferWithAuthorization(params),
                transfer_json("TransferWithAuthorization", &params),
            ),
            (
                AuthorizationMessage::ReceiveWithAuthorization(params),
                transfer_json("ReceiveWithAuthorization", &params),
            ),
            (
                AuthorizationMessage::CancelAuthorization(CancelAuthorization {
                    authorizer: params.from,
                    nonce: params.nonce,
                }),
                cancel_json(&CancelAuthorization {
                    authorizer: params.from,
                    nonce: params.nonce,
                }),
            ),
        ];

        for (message, json) in cases {
            let expected = typed_data_hash(&json);
            let actual = eip712_common::make_eip712_message_hash(
                &domain_separator(),
                &message.payload_hash(),
            );
            assert_eq!(actual, expected, "{:?}", message);
        }
    }

    #[test]
    fn valid_transfer_signature() {
        let params = sample_transfer();
        let signature =
            ecdsa_sign_typed_data(&alice(), &transfer_json("TransferWithAuthorization", &params));
        let message = AuthorizationMessage::TransferWithAuthorization(params);

        let recovered = recover_authorizer(&signature, &domain_separator(), &message).unwrap();
        assert_eq!(recovered, message.authorizer());
        assert_eq!(recovered, ethereum_address_from_seed(b"Alice"));
    }

    #[test]
    fn valid_cancel_signature() {
        let params = CancelAuthorization {
            authorizer: ethereum_address_from_seed(b"Alice"),
            nonce: NONCE,
        };
        let signature = ecdsa_sign_typed_data(&alice(), &cancel_json(&params));
        let message = AuthorizationMessage::CancelAuthorization(params);

        assert_eq!(
            recover_authorizer(&signature, &domain_separator(), &message),
            Some(ethereum_address_from_seed(b"Alice"))
        );
    }

    #[test]
    fn transfer_signature_is_not_a_receive_signature() {
        let params = sample_transfer();
        let signature =
            ecdsa_sign_typed_data(&alice(), &transfer_json("TransferWithAuthorization", &params));

        let recovered = recover_authorizer(
            &signature,
            &domain_separator(),
            &AuthorizationMessage::ReceiveWithAuthorization(params),
        );
        assert_ne!(recovered, Some(params.from));
    }

    #[test]
    fn altered_fields_do_not_recover_the_signer() {
        let params = sample_transfer();
        let signature =
            ecdsa_sign_typed_data(&alice(), &transfer_json("TransferWithAuthorization", &params));

        let alterations: [fn(&mut TransferAuthorization); 6] = [
            |p| p.from = ethereum_address_from_seed(b"Mallory"),
            |p| p.to = ethereum_address_from_seed(b"Mallory"),
            |p| p.value += 1,
            |p| p.valid_after += 1,
            |p| p.valid_before += 1,
            |p| p.nonce[31] ^= 1,
        ];

        for (index, alter) in alterations.iter().enumerate() {
            let mut altered = params;
            alter(&mut altered);
            let recovered = recover_authorizer(
                &signature,
                &domain_separator(),
                &AuthorizationMessage::TransferWithAuthorization(altered),
            );
            assert_ne!(recovered, Some(params.from), "alteration #{}", index);
        }
    }

    #[test]
    fn other_domain_does_not_recover_the_signer() {
        let params = sample_transfer();
        let signature =
            ecdsa_sign_typed_data(&alice(), &transfer_json("TransferWithAuthorization", &params));
        let message = AuthorizationMessage::TransferWithAuthorization(params);

        let other_chain = make_domain_hash(Domain {
            name: "Green Minting Token",
            version: "1",
            chain_id: &encode_uint256(1),
            verifying_contract: &VERIFYING_CONTRACT,
        });
        let other_contract = make_domain_hash(Domain {
            name: "Green Minting Token",
            version: "1",
            chain_id: &encode_uint256(0x7a69),
            verifying_contract: &hex!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512"),
        });

        for separator in [other_chain, other_contract] {
            assert_ne!(
                recover_authorizer(&signature, &separator, &message),
                Some(params.from)
            );
        }
    }

    /// This test verifies the widest validity window is hashed as the `uint256` word.
    #[test]
    fn max_valid_before_matches_independent_encoder() {
        let params = TransferAuthorization {
            valid_before: u64::MAX,
            ..sample_transfer()
        };
        let json = transfer_json("TransferWithAuthorization", &params);
        let signature = ecdsa_sign_typed_data(&alice(), &json);

        assert_eq!(
            recover_authorizer(
                &signature,
                &domain_separator(),
                &AuthorizationMessage::TransferWithAuthorization(params)
            ),
            Some(params.from)
        );
    }

    #[test]
    fn scale_encoding_keeps_message_kind() {
        let params = sample_transfer();
        let transfer = AuthorizationMessage::TransferWithAuthorization(params);
        let receive = AuthorizationMessage::ReceiveWithAuthorization(params);
        let cancel = AuthorizationMessage::CancelAuthorization(CancelAuthorization {
            authorizer: params.from,
            nonce: NONCE,
        });

        assert_eq!(transfer.encode()[0], 0);
        assert_eq!(receive.encode()[0], 1);
        assert_eq!(cancel.encode()[0], 2);
        assert_eq!(transfer.encode()[1..], params.encode()[..]);
        // 20 + 20 + 16 + 8 + 8 + 32 bytes of the transfer, plus the variant index.
        assert_eq!(AuthorizationMessage::max_encoded_len(), 105);

        let encoded = receive.encode();
        assert_eq!(
            AuthorizationMessage::decode(&mut encoded.as_slice()).ok(),
            Some(receive)
        );
    }
}
