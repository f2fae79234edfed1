//! Contract address derivation.

use eip712_common::keccak_256;
use primitives_ethereum::EthereumAddress;
use rlp::RlpStream;

/// Contract address that will be produced by the [`CREATE` opcode][1].
///
/// [1]: https://ethereum.github.io/yellowpaper/paper.pdf#section.7
pub fn contract_address(sender: &EthereumAddress, nonce: u64) -> EthereumAddress {
    let mut rlp = RlpStream::new_list(2);
    rlp.append(&sender.0.to_vec());
    rlp.append(&nonce);
    /// Address is the rightmost 160 bits of hash.
    const ADDR_OFFSET: usize = (256 - 160) / 8;
    let mut address = [0u8; 20];
    address.copy_from_slice(&keccak_256(&rlp.out())[ADDR_OFFSET..]);
    EthereumAddress(address)
}
