//! Signer authorization policies.
//!
//! The verifier only answers "who signed"; whether that signer may act for the
//! account is delegated to an [`AuthorizationPolicy`].

use alloy_primitives::Address;
use order_core::config::ValidatorConfig;
use std::collections::HashSet;
use tracing::debug;

/// Decides whether a recovered signer is allowed to act for the account.
#[cfg_attr(test, mockall::automock)]
pub trait AuthorizationPolicy: Send + Sync {
    fn is_authorized_signer(&self, signer: Address) -> bool;
}

impl<F> AuthorizationPolicy for F
where
    F: Fn(Address) -> bool + Send + Sync,
{
    fn is_authorized_signer(&self, signer: Address) -> bool {
        self(signer)
    }
}

/// Accepts exactly one owner address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleOwner {
    owner: Address,
}

impl SingleOwner {
    pub fn new(owner: Address) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }
}

impl AuthorizationPolicy for SingleOwner {
    fn is_authorized_signer(&self, signer: Address) -> bool {
        signer != Address::ZERO && signer == self.owner
    }
}

/// Accepts any address from a fixed set.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    signers: HashSet<Address>,
}

impl AllowList {
    pub fn new(signers: impl IntoIterator<Item = Address>) -> Self {
        Self {
            signers: signers
                .into_iter()
                .filter(|signer| *signer != Address::ZERO)
                .collect(),
        }
    }

    /// Allow-list of the signers named in configuration.
    pub fn from_config(config: &ValidatorConfig) -> Self {
        let list = Self::new(config.authorized_signers.iter().copied());
        debug!(signers = list.len(), "Loaded signer allow-list");
        list
    }

    pub fn insert(&mut self, signer: Address) -> bool {
        signer != Address::ZERO && self.signers.insert(signer)
    }

    pub fn remove(&mut self, signer: &Address) -> bool {
        self.signers.remove(signer)
    }

    pub fn len(&self) -> usize {
        self.signers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }
}

impl AuthorizationPolicy for AllowList {
    fn is_authorized_signer(&self, signer: Address) -> bool {
        self.signers.contains(&signer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_owner() {
        let owner = Address::repeat_byte(0x01);
        let policy = SingleOwner::new(owner);
        assert!(policy.is_authorized_signer(owner));
        assert!(!policy.is_authorized_signer(Address::repeat_byte(0x02)));
    }

    #[test]
    fn test_zero_owner_never_authorizes() {
        let policy = SingleOwner::new(Address::ZERO);
        assert!(!policy.is_authorized_signer(Address::ZERO));
    }

    #[test]
    fn test_allow_list() {
        let mut list = AllowList::new([Address::repeat_byte(0x01), Address::ZERO]);
        assert_eq!(list.len(), 1);
        assert!(list.is_authorized_signer(Address::repeat_byte(0x01)));
        assert!(!list.is_authorized_signer(Address::ZERO));

        assert!(list.insert(Address::repeat_byte(0x02)));
        assert!(!list.insert(Address::ZERO));
        assert!(list.remove(&Address::repeat_byte(0x01)));
        assert!(!list.is_authorized_signer(Address::repeat_byte(0x01)));
        assert!(list.is_authorized_signer(Address::repeat_byte(0x02)));
    }

    #[test]
    fn test_allow_list_from_config() {
        let config = ValidatorConfig {
            authorized_signers: vec![Address::repeat_byte(0x0a), Address::repeat_byte(0x0b)],
        };
        let list = AllowList::from_config(&config);
        assert_eq!(list.len(), 2);
        assert!(!list.is_empty());
    }

    #[test]
    fn test_closure_policy() {
        let policy = |signer: Address| signer.0[0] == 0xaa;
        assert!(policy.is_authorized_signer(Address::repeat_byte(0xaa)));
        assert!(!policy.is_authorized_signer(Address::repeat_byte(0xab)));
    }

    #[test]
    fn test_mock_policy() {
        let mut policy = MockAuthorizationPolicy::new();
        policy
            .expect_is_authorized_signer()
            .withf(|signer| *signer == Address::repeat_byte(0x07))
            .times(1)
            .return_const(true);

        assert!(policy.is_authorized_signer(Address::repeat_byte(0x07)));
    }
}
