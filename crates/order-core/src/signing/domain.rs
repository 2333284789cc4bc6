//! EIP-712 domain separators and final digests.
//!
//! Every digest that reaches signer recovery, for a single order or for a bulk
//! order root, is `keccak256("\x19\x01" ‖ domainSeparator ‖ structHash)`.

use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::SolValue;

use crate::config::DomainConfig;

/// Default protocol domain name.
pub const SEAPORT_NAME: &str = "Seaport";

/// Default protocol domain version.
pub const SEAPORT_VERSION: &str = "1.6";

/// Canonical Seaport 1.6 deployment address (same on every chain).
pub const SEAPORT_ADDRESS: &str = "0x0000000000000068F116a894984e2DB1123eB395";

/// Chain ID for Ethereum mainnet.
pub const MAINNET_CHAIN_ID: u64 = 1;

/// EIP-191 prefix for structured data.
const EIP712_PREFIX: [u8; 2] = [0x19, 0x01];

/// EIP-712 domain of the verifying contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eip712Domain {
    /// Domain name.
    pub name: String,
    /// Domain version.
    pub version: String,
    /// Chain ID.
    pub chain_id: U256,
    /// Verifying contract address.
    pub verifying_contract: Address,
}

impl Eip712Domain {
    /// Protocol domain bound to the given contract and chain.
    pub fn seaport(chain_id: u64, verifying_contract: Address) -> Self {
        Self::custom(SEAPORT_NAME, SEAPORT_VERSION, chain_id, verifying_contract)
    }

    /// Create domain with custom parameters.
    pub fn custom(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: u64,
        verifying_contract: Address,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id: U256::from(chain_id),
            verifying_contract,
        }
    }

    /// Build the domain described by configuration.
    pub fn from_config(config: &DomainConfig) -> Self {
        Self::custom(
            config.name.clone(),
            config.version.clone(),
            config.chain_id,
            config.verifying_contract,
        )
    }

    /// Compute the EIP-712 domain separator hash.
    pub fn separator(&self) -> B256 {
        let domain_type_hash = keccak256(
            b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)",
        );

        let name_hash = keccak256(self.name.as_bytes());
        let version_hash = keccak256(self.version.as_bytes());

        // encodeData pads the address to a full word.
        let contract_padded = B256::left_padding_from(self.verifying_contract.as_slice());

        let encoded = (
            domain_type_hash,
            name_hash,
            version_hash,
            self.chain_id,
            contract_padded,
        )
            .abi_encode_packed();

        keccak256(&encoded)
    }

    /// Digest to sign for a struct hash under this domain.
    pub fn typed_data_hash(&self, struct_hash: B256) -> B256 {
        typed_data_hash(self.separator(), struct_hash)
    }
}

/// Compute the EIP-712 typed data hash.
pub fn typed_data_hash(domain_separator: B256, struct_hash: B256) -> B256 {
    let mut data = [0u8; 2 + 32 + 32];
    data[..2].copy_from_slice(&EIP712_PREFIX);
    data[2..34].copy_from_slice(domain_separator.as_slice());
    data[34..].copy_from_slice(struct_hash.as_slice());
    keccak256(data)
}
