//! ECDSA Signature.

use codec::{Decode, Encode, MaxEncodedLen};

/// The length of an Ethereum-style recoverable signature: `r ‖ s ‖ v`.
pub const ECDSA_SIGNATURE_LEN: usize = 65;

/// A ECDSA signature, used by Ethereum.
///
/// The layout is `r` (32 bytes), `s` (32 bytes), then the recovery byte `v`.
#[derive(Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen)]
pub struct EcdsaSignature(pub [u8; ECDSA_SIGNATURE_LEN]);

impl Default for EcdsaSignature {
    fn default() -> Self {
        Self([0; ECDSA_SIGNATURE_LEN])
    }
}

impl EcdsaSignature {
    /// Assemble a signature from its split `v`, `r`, `s` form, as wallets hand it out.
    pub fn from_vrs(v: u8, r: [u8; 32], s: [u8; 32]) -> Self {
        let mut buf = [0u8; ECDSA_SIGNATURE_LEN];
        buf[0..32].copy_from_slice(&r);
        buf[32..64].copy_from_slice(&s);
        buf[64] = v;
        Self(buf)
    }

    /// The `r` component.
    pub fn r(&self) -> [u8; 32] {
        let mut r = [0u8; 32];
        r.copy_from_slice(&self.0[0..32]);
        r
    }

    /// The `s` component.
    pub fn s(&self) -> [u8; 32] {
        let mut s = [0u8; 32];
        s.copy_from_slice(&self.0[32..64]);
        s
    }

    /// The recovery byte.
    pub fn v(&self) -> u8 {
        self.0[64]
    }
}

impl core::fmt::Debug for EcdsaSignature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("EcdsaSignature(0x")?;
        for hex in rustc_hex::ToHexIter::new(self.0.iter()) {
            core::fmt::Write::write_char(f, hex)?;
        }
        f.write_str(")")
    }
}

/// The signature bytes had the wrong length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("bad length of ECDSA signature: expected 65 bytes, got {0}")]
pub struct BadSignatureLength(pub usize);

impl TryFrom<&[u8]> for EcdsaSignature {
    type Error = BadSignatureLength;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; ECDSA_SIGNATURE_LEN] = value
            .try_into()
            .map_err(|_| BadSignatureLength(value.len()))?;
        Ok(Self(bytes))
    }
}
