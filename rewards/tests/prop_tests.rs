use proptest::prelude::*;

use pospool_rewards::RewardEngine;
use pospool_types::{Address, Amount, BlockNumber, RATIO_BASE};

fn addr(n: usize) -> Address {
    Address::new(format!("0x{:040x}", n))
}

proptest! {
    /// The sum of all user shares of a closed section never exceeds the
    /// section's net (post-fee) reward, for any split of the pool's votes.
    #[test]
    fn floor_division_never_over_distributes(
        reward in 0u128..1_000_000_000_000_000_000_000u128,
        fee_bps in 0u32..10_000,
        splits in prop::collection::vec(1u64..1_000_000, 1..20),
    ) {
        let available: u64 = splits.iter().sum();
        let mut engine = RewardEngine::new();
        for i in 0..splits.len() {
            engine.track(&addr(i));
        }
        engine.rotate(available, BlockNumber::new(10)).unwrap();
        let fee = engine
            .record_interest(Amount::new(reward), available, fee_bps, BlockNumber::new(20))
            .unwrap();

        let mut distributed: u128 = 0;
        for (i, shot) in splits.iter().enumerate() {
            let share = engine.settle(&addr(i), *shot, fee_bps).unwrap();
            distributed += share.raw();
        }

        let net = Amount::new(reward)
            .checked_mul_bps(RATIO_BASE - fee_bps, RATIO_BASE)
            .unwrap();
        prop_assert!(distributed <= net.raw());
        // fee + user shares never exceed the gross reward
        prop_assert!(fee.raw() + distributed <= reward);
    }

    /// Settling twice with no intervening interest adds nothing.
    #[test]
    fn settlement_is_idempotent(
        reward in 1u128..1_000_000_000_000_000_000u128,
        shot in 1u64..1000,
        available in 1000u64..100_000,
    ) {
        let mut engine = RewardEngine::new();
        engine.track(&addr(0));
        engine.rotate(available, BlockNumber::new(10)).unwrap();
        engine
            .record_interest(Amount::new(reward), available, 1000, BlockNumber::new(20))
            .unwrap();

        let first = engine.settle(&addr(0), shot, 1000).unwrap();
        let second = engine.settle(&addr(0), shot, 1000).unwrap();
        prop_assert_eq!(second, Amount::ZERO);
        prop_assert_eq!(engine.claimable(&addr(0)), first);
    }

    /// A user tracked after a section closed consumes nothing from it.
    #[test]
    fn late_joiner_never_claims_past_sections(
        reward in 1u128..1_000_000_000_000_000_000u128,
        shot in 1u64..1000,
    ) {
        let mut engine = RewardEngine::new();
        engine.track(&addr(0));
        engine.rotate(1000, BlockNumber::new(10)).unwrap();
        engine
            .record_interest(Amount::new(reward), 1000, 1000, BlockNumber::new(20))
            .unwrap();

        engine.track(&addr(1));
        prop_assert_eq!(engine.settle(&addr(1), shot, 1000).unwrap(), Amount::ZERO);
    }
}
