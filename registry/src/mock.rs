//! In-memory collaborator doubles — deterministic staking for testing.
//!
//! These mirror the mock contracts the pool is tested against on-chain: a
//! vault that tracks balance and pending unlocks, and a registrar that
//! records a single registration.

use crate::error::RegistryError;
use crate::registrar::PosRegistrar;
use crate::vault::StakingVault;
use pospool_types::{Amount, BlockNumber, NodeId, ValidatorKeys, RATIO_BASE};

/// An in-memory staking vault for testing.
///
/// Balance only changes when the pool tells it to.
#[derive(Debug, Default)]
pub struct MockStakingVault {
    balance: Amount,
    pending_unlocks: Vec<(Amount, BlockNumber)>,
    total_withdrawn: Amount,
}

impl MockStakingVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated interest accrued on the current balance, as basis points.
    ///
    /// Scenario tests use 400 bps — 4% of the staked balance.
    pub fn simulated_interest(&self, rate_bps: u32) -> Amount {
        self.balance
            .checked_mul_bps(rate_bps, RATIO_BASE)
            .unwrap_or(Amount::ZERO)
    }

    /// Unlock requests recorded so far, oldest first.
    pub fn pending_unlocks(&self) -> &[(Amount, BlockNumber)] {
        &self.pending_unlocks
    }

    /// Total currency ever released via `withdraw`.
    pub fn total_withdrawn(&self) -> Amount {
        self.total_withdrawn
    }
}

impl StakingVault for MockStakingVault {
    fn deposit(&mut self, amount: Amount) -> Result<(), RegistryError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| RegistryError::Other("vault balance overflow".into()))?;
        Ok(())
    }

    fn request_unlock(
        &mut self,
        amount: Amount,
        unlock_at: BlockNumber,
    ) -> Result<(), RegistryError> {
        if amount > self.balance {
            return Err(RegistryError::InsufficientBalance {
                needed: amount.raw(),
                available: self.balance.raw(),
            });
        }
        self.pending_unlocks.push((amount, unlock_at));
        Ok(())
    }

    fn withdraw(&mut self, amount: Amount) -> Result<Amount, RegistryError> {
        let pending: u128 = self.pending_unlocks.iter().map(|(a, _)| a.raw()).sum();
        if amount.raw() > pending {
            return Err(RegistryError::NothingUnlocked);
        }
        self.balance =
            self.balance
                .checked_sub(amount)
                .ok_or(RegistryError::InsufficientBalance {
                    needed: amount.raw(),
                    available: self.balance.raw(),
                })?;
        // consume pending unlocks oldest-first
        let mut remaining = amount.raw();
        self.pending_unlocks.retain_mut(|(a, _)| {
            if remaining == 0 {
                return true;
            }
            let take = remaining.min(a.raw());
            *a = Amount::new(a.raw() - take);
            remaining -= take;
            !a.is_zero()
        });
        self.total_withdrawn = self.total_withdrawn + amount;
        Ok(amount)
    }

    fn staking_balance(&self) -> Amount {
        self.balance
    }
}

/// An in-memory PoS registrar that records a single registration.
#[derive(Debug, Default)]
pub struct MockPosRegistrar {
    registered: Option<(NodeId, u64)>,
}

impl MockPosRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// The identifier and vote power registered, if any.
    pub fn registered(&self) -> Option<&(NodeId, u64)> {
        self.registered.as_ref()
    }
}

impl PosRegistrar for MockPosRegistrar {
    fn register(
        &mut self,
        identifier: NodeId,
        vote_power: u64,
        _keys: &ValidatorKeys,
    ) -> Result<(), RegistryError> {
        if self.registered.is_some() {
            return Err(RegistryError::DuplicateRegistration);
        }
        self.registered = Some((identifier, vote_power));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> ValidatorKeys {
        ValidatorKeys::new(vec![0x00], vec![0x00], [vec![0x00], vec![0x00]])
    }

    #[test]
    fn vault_deposit_and_balance() {
        let mut vault = MockStakingVault::new();
        vault.deposit(Amount::from_cfx(1400)).unwrap();
        assert_eq!(vault.staking_balance(), Amount::from_cfx(1400));
    }

    #[test]
    fn vault_interest_is_rate_of_balance() {
        let mut vault = MockStakingVault::new();
        vault.deposit(Amount::from_cfx(1400)).unwrap();
        assert_eq!(vault.simulated_interest(400), Amount::from_cfx(56));
    }

    #[test]
    fn vault_withdraw_requires_pending_unlock() {
        let mut vault = MockStakingVault::new();
        vault.deposit(Amount::from_cfx(1000)).unwrap();
        assert!(matches!(
            vault.withdraw(Amount::from_cfx(500)),
            Err(RegistryError::NothingUnlocked)
        ));

        vault
            .request_unlock(Amount::from_cfx(500), BlockNumber::new(600))
            .unwrap();
        let paid = vault.withdraw(Amount::from_cfx(500)).unwrap();
        assert_eq!(paid, Amount::from_cfx(500));
        assert_eq!(vault.staking_balance(), Amount::from_cfx(500));
        assert!(vault.pending_unlocks().is_empty());
    }

    #[test]
    fn vault_unlock_exceeding_balance_rejected() {
        let mut vault = MockStakingVault::new();
        vault.deposit(Amount::from_cfx(100)).unwrap();
        assert!(matches!(
            vault.request_unlock(Amount::from_cfx(200), BlockNumber::new(10)),
            Err(RegistryError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn registrar_rejects_second_registration() {
        let mut reg = MockPosRegistrar::new();
        reg.register(NodeId::ZERO, 1, &keys()).unwrap();
        assert!(matches!(
            reg.register(NodeId::ZERO, 1, &keys()),
            Err(RegistryError::DuplicateRegistration)
        ));
        assert_eq!(reg.registered(), Some(&(NodeId::ZERO, 1)));
    }
}
