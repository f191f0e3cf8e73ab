//! Property tests for the prize-pool distribution.

use std::collections::BTreeMap;

use proptest::prelude::*;

use tb_algo::{distribute_prize_pool, distribution_residual};
use tb_core::entities::{PriorityLevel, PrizeCategory, PrizeRegistry};
use tb_core::tokens::CategoryId;

fn priority_strategy() -> impl Strategy<Value = PriorityLevel> {
    prop_oneof![
        Just(PriorityLevel::Ultimate),
        Just(PriorityLevel::High),
        Just(PriorityLevel::Medium),
        Just(PriorityLevel::Low),
    ]
}

prop_compose! {
    fn category_strategy(index: usize)(
        enabled in any::<bool>(),
        weight_pct in 0u32..=120,
        priority in priority_strategy(),
        display_order in 0u32..=24,
    ) -> PrizeCategory {
        PrizeCategory {
            id: format!("cat-{index}").parse::<CategoryId>().unwrap(),
            name: format!("Category {index}"),
            description: String::new(),
            enabled,
            priority,
            weight_pct,
            display_order,
        }
    }
}

fn registry_strategy() -> impl Strategy<Value = PrizeRegistry> {
    (1usize..=12)
        .prop_flat_map(|n| {
            let cats: Vec<_> = (0..n).map(category_strategy).collect();
            cats
        })
        .prop_map(|cats| PrizeRegistry::new(cats).unwrap())
}

fn payout_sum(payouts: &BTreeMap<CategoryId, u64>) -> u128 {
    payouts.values().map(|&v| v as u128).sum()
}

proptest! {
    /// Step-aligned pools distribute exactly; everything is a non-negative
    /// step multiple; every configured id gets an entry; disabled and
    /// zero-weight categories get zero.
    #[test]
    fn aligned_pools_distribute_exactly(
        registry in registry_strategy(),
        pool_steps in 0u64..=120,
        step in prop_oneof![Just(1u64), Just(2), Just(5), Just(10), Just(25)],
    ) {
        let total_pool = pool_steps * step;
        let payouts = distribute_prize_pool(total_pool, step, &registry);

        prop_assert_eq!(payouts.len(), registry.len());
        for c in registry.categories() {
            let amount = payouts[&c.id];
            prop_assert_eq!(amount % step, 0);
            if !c.is_funded() {
                prop_assert_eq!(amount, 0);
            }
        }

        let any_funded = registry.categories().iter().any(|c| c.is_funded());
        if total_pool == 0 || !any_funded {
            prop_assert_eq!(payout_sum(&payouts), 0);
        } else {
            prop_assert_eq!(payout_sum(&payouts), total_pool as u128);
        }
    }

    /// Pools that are not step multiples still never fail, keep step-multiple
    /// amounts, and leave a residual strictly below one step whenever any
    /// funded category exists.
    #[test]
    fn unaligned_pools_keep_residual_below_step(
        registry in registry_strategy(),
        total_pool in 1u64..=3_000,
        step in prop_oneof![Just(2u64), Just(5), Just(10), Just(25)],
    ) {
        prop_assume!(total_pool % step != 0);
        let payouts = distribute_prize_pool(total_pool, step, &registry);

        for (_, &amount) in payouts.iter() {
            prop_assert_eq!(amount % step, 0);
        }
        if registry.categories().iter().any(|c| c.is_funded()) {
            let residual = distribution_residual(total_pool, &payouts);
            prop_assert!(residual.unsigned_abs() < step as u128, "residual {residual}");
        }
    }

    /// Same inputs, same mapping: the distribution is a pure function of
    /// its arguments.
    #[test]
    fn distribution_is_deterministic(
        registry in registry_strategy(),
        pool_steps in 0u64..=200,
    ) {
        let a = distribute_prize_pool(pool_steps * 5, 5, &registry);
        let b = distribute_prize_pool(pool_steps * 5, 5, &registry);
        prop_assert_eq!(a, b);
    }
}
