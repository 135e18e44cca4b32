#![allow(missing_docs)]

use forage::simulation::ecosystem::{Ecosystem, Headless};
use forage::simulation::geometric_utils::point_on_random_edge;
use forage::simulation::greedy::GreedyPolicy;
use forage::simulation::params::{FoodSupply, Params, SimulationConfig};
use forage::simulation::policy::{PolicyKind, SimulationPolicy};
use forage::simulation::run::run_days;
use forage::simulation::stats::DayResult;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn arb_policy() -> impl Strategy<Value = PolicyKind> {
    prop_oneof![Just(PolicyKind::Basic), Just(PolicyKind::Greedy)]
}

fn simulate(kind: PolicyKind, config: SimulationConfig, seed: u64, max_days: u32) -> Vec<DayResult> {
    let params = Params::default();
    let policy = kind.build(&params);
    let mut ecosystem = Ecosystem::new(policy, params, config, seed).expect("valid params");
    let (history, _) = run_days(&mut ecosystem, max_days, &mut Headless, |_, _| {});
    history.days().to_vec()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn test_day_results_are_consistent(
        kind in arb_policy(),
        seed in any::<u64>(),
        fixed in proptest::option::of(0i64..12),
    ) {
        let config = SimulationConfig {
            food_scaling: fixed.is_none(),
            fixed_food_count: fixed,
            ..SimulationConfig::default()
        };
        let days = simulate(kind, config, seed, 4);

        prop_assert!(!days.is_empty());
        for d in &days {
            prop_assert_eq!(d.survivors + d.died, d.start_creatures);
            prop_assert!(d.survivors <= d.food_spawned, "{:?}", d);
            if let Some(count) = fixed {
                prop_assert_eq!(d.food_spawned, count as usize);
            }
        }
    }

    #[test]
    fn test_speed_multiplier_is_invisible(
        kind in arb_policy(),
        seed in any::<u64>(),
        speed in 2u32..=128,
    ) {
        let slow = simulate(kind, SimulationConfig::default(), seed, 3);
        let fast = simulate(
            kind,
            SimulationConfig { speed_multiplier: speed, ..SimulationConfig::default() },
            seed,
            3,
        );
        prop_assert_eq!(slow, fast);
    }

    #[test]
    fn test_edge_points_stay_on_edges(
        seed in any::<u64>(),
        width in 40.0f32..2000.0,
        height in 40.0f32..2000.0,
        margin in 0.0f32..20.0,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let p = point_on_random_edge(&mut rng, width, height, margin);

        let on_edge = p.x() == margin
            || p.x() == width - margin
            || p.y() == margin
            || p.y() == height - margin;
        prop_assert!(on_edge, "{:?} not on an edge of {}x{}", p, width, height);
        prop_assert!(p.x() >= margin && p.x() <= width - margin);
        prop_assert!(p.y() >= margin && p.y() <= height - margin);
    }

    #[test]
    fn test_greedy_food_count_is_ceil_of_constant(
        seed in any::<u64>(),
        living in 0usize..500,
    ) {
        let policy = GreedyPolicy::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let expected = (1.1 * living as f64).ceil() as usize;
        prop_assert_eq!(policy.food_count(living, FoodSupply::Scaled, &mut rng), expected);
    }
}
