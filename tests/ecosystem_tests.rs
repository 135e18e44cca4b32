#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use forage::simulation::creature::Creature;
use forage::simulation::ecosystem::{DayObserver, DayPhase, Ecosystem, Frame, Headless};
use forage::simulation::food::Food;
use forage::simulation::params::{Params, SimulationConfig};
use forage::simulation::policy::{CREATURE_MAX_ENERGY, CREATURE_RADIUS, PolicyKind};
use forage::simulation::run::run_days;
use forage::simulation::stats::{DayResult, StopReason};
use geo::Point;
use std::ops::ControlFlow;

fn create_test_params() -> Params {
    Params {
        max_days: 5,
        ..Params::default()
    }
}

/// Creatures only change heading when told to.
fn straight_line_params() -> Params {
    Params {
        turn_probability: 0.0,
        bounce_turn_probability: 0.0,
        ..create_test_params()
    }
}

fn create_ecosystem(kind: PolicyKind, params: Params, config: SimulationConfig, seed: u64) -> Ecosystem {
    let policy = kind.build(&params);
    Ecosystem::new(policy, params, config, seed).expect("valid params")
}

fn fixed_food(count: i64) -> SimulationConfig {
    SimulationConfig {
        food_scaling: false,
        fixed_food_count: Some(count),
        ..SimulationConfig::default()
    }
}

fn is_on_edge(pos: Point<f32>, params: &Params) -> bool {
    let r = CREATURE_RADIUS;
    pos.x() == r
        || pos.y() == r
        || pos.x() == params.box_width - r
        || pos.y() == params.box_height - r
}

#[test]
fn test_ecosystem_creation() {
    let params = create_test_params();
    let basic = create_ecosystem(PolicyKind::Basic, params.clone(), SimulationConfig::default(), 1);
    let greedy = create_ecosystem(PolicyKind::Greedy, params.clone(), SimulationConfig::default(), 1);

    assert_eq!(basic.creatures.len(), 2);
    assert_eq!(greedy.creatures.len(), 3);
    assert_eq!(basic.day, 0);
    assert!(basic.food.is_empty());

    for creature in basic.creatures.iter().chain(&greedy.creatures) {
        assert_eq!(creature.energy, CREATURE_MAX_ENERGY);
        assert_eq!(creature.eaten, 0);
        assert!(!creature.is_survivor);
        assert!(is_on_edge(creature.pos, &params), "{:?} is not on an edge", creature.pos);
    }
}

#[test]
fn test_arena_too_small_is_rejected() {
    let params = Params {
        box_width: 20.0,
        box_height: 20.0,
        ..create_test_params()
    };
    let policy = PolicyKind::Basic.build(&params);
    assert!(Ecosystem::new(policy, params, SimulationConfig::default(), 1).is_err());
}

#[test]
fn test_begin_day_spawns_food() {
    let mut basic = create_ecosystem(PolicyKind::Basic, create_test_params(), SimulationConfig::default(), 3);
    assert_eq!(basic.begin_day(), Some(2));
    assert_eq!(basic.day, 1);
    assert_eq!(basic.food.len(), 2);
    assert_eq!(basic.food_spawned, 2);
    assert_eq!(basic.phase, DayPhase::Ticking);

    // ceil(1.1 * 3) = 4; a 0.3 share of an offset in [-3, 3] truncates to zero
    let mut greedy = create_ecosystem(PolicyKind::Greedy, create_test_params(), SimulationConfig::default(), 3);
    assert_eq!(greedy.begin_day(), Some(3));
    assert_eq!(greedy.food.len(), 4);
}

#[test]
fn test_food_stays_inside_arena() {
    let params = create_test_params();
    let mut ecosystem = create_ecosystem(PolicyKind::Basic, params.clone(), fixed_food(200), 11);
    ecosystem.begin_day();

    assert_eq!(ecosystem.food.len(), 200);
    let margin = ecosystem.policy().spawn_margin();
    for food in &ecosystem.food {
        assert!(food.pos.x() >= margin && food.pos.x() <= params.box_width - margin);
        assert!(food.pos.y() >= margin && food.pos.y() <= params.box_height - margin);
    }
}

#[test]
fn test_fixed_food_count_overrides_scaling() {
    let mut greedy = create_ecosystem(PolicyKind::Greedy, create_test_params(), fixed_food(7), 5);
    greedy.begin_day();
    assert_eq!(greedy.food.len(), 7);
}

#[test]
fn test_negative_fixed_food_count_falls_back_to_scaling() {
    let mut basic = create_ecosystem(PolicyKind::Basic, create_test_params(), fixed_food(-5), 5);
    basic.begin_day();
    assert_eq!(basic.food.len(), 2);
}

#[test]
fn test_scaling_off_without_count_uses_policy_default() {
    let config = SimulationConfig {
        food_scaling: false,
        ..SimulationConfig::default()
    };
    let mut basic = create_ecosystem(PolicyKind::Basic, create_test_params(), config.clone(), 5);
    let mut greedy = create_ecosystem(PolicyKind::Greedy, create_test_params(), config, 5);
    basic.begin_day();
    greedy.begin_day();

    assert_eq!(basic.food.len(), 2);
    assert!(greedy.food.is_empty());
}

#[test]
fn test_moving_costs_one_energy_per_step() {
    let mut ecosystem = create_ecosystem(PolicyKind::Basic, straight_line_params(), SimulationConfig::default(), 1);
    ecosystem.creatures = vec![Creature::new(
        Point::new(100.0, 100.0),
        Point::new(1.0, 0.0),
        CREATURE_MAX_ENERGY,
    )];
    ecosystem.food = vec![Food::new(Point::new(400.0, 400.0))];

    for _ in 0..10 {
        ecosystem.step();
    }

    let creature = &ecosystem.creatures[0];
    assert_eq!(creature.energy, CREATURE_MAX_ENERGY - 10);
    assert_eq!(creature.pos, Point::new(125.0, 100.0));
    assert_eq!(ecosystem.food.len(), 1);
}

#[test]
fn test_eating_last_food_starves_the_rest() {
    let mut ecosystem = create_ecosystem(PolicyKind::Basic, straight_line_params(), SimulationConfig::default(), 1);
    ecosystem.creatures = vec![
        Creature::new(Point::new(240.0, 250.0), Point::new(1.0, 0.0), CREATURE_MAX_ENERGY),
        Creature::new(Point::new(100.0, 100.0), Point::new(0.0, 1.0), CREATURE_MAX_ENERGY),
    ];
    ecosystem.food = vec![Food::new(Point::new(250.0, 250.0))];

    ecosystem.step();

    assert!(ecosystem.food.is_empty());
    let eater = &ecosystem.creatures[0];
    assert_eq!(eater.eaten, 1);
    assert_eq!(eater.energy, CREATURE_MAX_ENERGY);
    assert!(eater.is_active());

    let hungry = &ecosystem.creatures[1];
    assert_eq!(hungry.eaten, 0);
    assert!(hungry.is_dead());
    assert!(!ecosystem.is_day_done());
}

#[test]
fn test_one_food_per_step() {
    let mut ecosystem = create_ecosystem(PolicyKind::Greedy, straight_line_params(), SimulationConfig::default(), 1);
    ecosystem.creatures = vec![Creature::new(
        Point::new(240.0, 250.0),
        Point::new(1.0, 0.0),
        CREATURE_MAX_ENERGY,
    )];
    ecosystem.food = vec![
        Food::new(Point::new(250.0, 250.0)),
        Food::new(Point::new(245.0, 252.0)),
    ];

    ecosystem.step();
    assert_eq!(ecosystem.creatures[0].eaten, 1);
    assert_eq!(ecosystem.food.len(), 1);

    ecosystem.step();
    assert_eq!(ecosystem.creatures[0].eaten, 2);
    assert!(ecosystem.food.is_empty());
}

#[test]
fn test_survivor_is_frozen() {
    let mut ecosystem = create_ecosystem(PolicyKind::Basic, straight_line_params(), SimulationConfig::default(), 1);
    let mut creature = Creature::new(Point::new(16.0, 250.0), Point::new(-1.0, 0.0), CREATURE_MAX_ENERGY);
    creature.eaten = 1;
    ecosystem.creatures = vec![creature];
    ecosystem.food = vec![Food::new(Point::new(400.0, 400.0))];

    ecosystem.step();
    let after_first = ecosystem.creatures[0].clone();
    assert!(after_first.is_survivor);
    assert_eq!(after_first.pos, Point::new(CREATURE_RADIUS, 250.0));
    assert_eq!(after_first.energy, CREATURE_MAX_ENERGY - 1);
    assert!(ecosystem.is_day_done());

    for _ in 0..5 {
        ecosystem.step();
    }
    assert_eq!(ecosystem.creatures[0], after_first);
}

#[test]
fn test_simulate_day_conserves_creatures() {
    let mut ecosystem = create_ecosystem(PolicyKind::Basic, create_test_params(), SimulationConfig::default(), 7);

    let result = ecosystem.simulate_day(&mut Headless).expect("headless never quits");

    assert_eq!(result.day, 1);
    assert_eq!(result.start_creatures, 2);
    assert_eq!(result.food_spawned, 2);
    assert_eq!(result.survivors + result.died, result.start_creatures);
    assert_eq!(ecosystem.creatures.len(), result.survivors);
    assert!(ecosystem.creatures.iter().all(|c| c.is_survivor));
    assert_eq!(ecosystem.phase, DayPhase::Settled);
}

#[test]
fn test_no_food_means_extinction() {
    let mut ecosystem = create_ecosystem(PolicyKind::Basic, create_test_params(), fixed_food(0), 2);

    let result = ecosystem.simulate_day(&mut Headless).expect("headless never quits");
    assert_eq!(result.food_spawned, 0);
    assert_eq!(result.survivors, 0);
    assert_eq!(result.died, 2);
    assert!(ecosystem.creatures.is_empty());

    let next = ecosystem.simulate_day(&mut Headless).expect("headless never quits");
    assert_eq!(next, DayResult::extinct(2));
    assert!(next.is_extinct());
}

struct StopImmediately;

impl DayObserver for StopImmediately {
    fn poll_input(&mut self, config: &mut SimulationConfig) -> ControlFlow<()> {
        config.manual_stop = true;
        ControlFlow::Continue(())
    }
}

#[test]
fn test_manual_stop_ends_day_and_counts_movers_as_dead() {
    let mut ecosystem = create_ecosystem(PolicyKind::Greedy, create_test_params(), SimulationConfig::default(), 4);

    let result = ecosystem
        .simulate_day(&mut StopImmediately)
        .expect("stopping is not quitting");

    assert_eq!(result.start_creatures, 3);
    assert_eq!(result.survivors, 0);
    assert_eq!(result.died, 3);
    assert!(ecosystem.config.manual_stop);

    ecosystem.begin_day();
    assert!(!ecosystem.config.manual_stop);
}

#[test]
fn test_stop_on_first_batch_of_day_is_kept() {
    let mut ecosystem = create_ecosystem(PolicyKind::Basic, create_test_params(), SimulationConfig::default(), 4);
    assert_eq!(ecosystem.phase, DayPhase::Settled);

    let outcome = ecosystem.advance_batch(&mut StopImmediately);

    let ControlFlow::Continue(Some(result)) = outcome else {
        panic!("expected the day to settle, got {outcome:?}");
    };
    assert_eq!(result.day, 1);
    assert_eq!(result.start_creatures, 2);
    assert_eq!(result.died, 2);
    assert!(ecosystem.config.manual_stop);
    assert_eq!(ecosystem.phase, DayPhase::Settled);
}

#[test]
fn test_stale_stop_is_cleared_at_day_start() {
    let mut ecosystem = create_ecosystem(PolicyKind::Basic, create_test_params(), SimulationConfig::default(), 4);
    ecosystem.config.manual_stop = true;

    assert_eq!(ecosystem.advance_batch(&mut Headless), ControlFlow::Continue(None));
    assert!(!ecosystem.config.manual_stop);
    assert_eq!(ecosystem.phase, DayPhase::Ticking);
    assert_eq!(ecosystem.day, 1);
}

#[test]
fn test_advance_batch_matches_simulate_day() {
    let mut batched = create_ecosystem(PolicyKind::Greedy, create_test_params(), SimulationConfig::default(), 21);
    let mut whole = create_ecosystem(PolicyKind::Greedy, create_test_params(), SimulationConfig::default(), 21);

    let result = loop {
        if let ControlFlow::Continue(Some(result)) = batched.advance_batch(&mut Headless) {
            break result;
        }
    };

    assert_eq!(Some(result), whole.simulate_day(&mut Headless));
    assert_eq!(batched.creatures, whole.creatures);
}

#[test]
fn test_verbose_settle_purges_before_summary() {
    let verbose = SimulationConfig {
        verbose: true,
        ..SimulationConfig::default()
    };
    forage::init_tracing("forage=info");

    for kind in PolicyKind::ALL {
        let mut loud = create_ecosystem(kind, create_test_params(), verbose.clone(), 13);
        let mut quiet = create_ecosystem(kind, create_test_params(), SimulationConfig::default(), 13);

        let (loud_history, _) = run_days(&mut loud, 3, &mut Headless, |result, eco| {
            assert_eq!(eco.creatures.len(), result.end_creatures());
            assert!(eco.creatures.iter().all(|c| c.is_survivor));
        });
        let (quiet_history, _) = run_days(&mut quiet, 3, &mut Headless, |_, _| {});

        assert_eq!(loud_history.days(), quiet_history.days());
    }
}

struct QuitAfter(usize);

impl DayObserver for QuitAfter {
    fn poll_input(&mut self, _config: &mut SimulationConfig) -> ControlFlow<()> {
        if self.0 == 0 {
            return ControlFlow::Break(());
        }
        self.0 -= 1;
        ControlFlow::Continue(())
    }
}

#[test]
fn test_quitting_abandons_the_run() {
    let mut ecosystem = create_ecosystem(PolicyKind::Basic, create_test_params(), SimulationConfig::default(), 9);

    let (history, reason) = run_days(&mut ecosystem, 5, &mut QuitAfter(3), |_, _| {});

    assert_eq!(reason, StopReason::Aborted);
    assert!(history.is_empty());
    assert_eq!(ecosystem.day, 1);
}

/// Records every day-rule violation seen between consecutive frames.
#[derive(Default)]
struct InvariantWatch {
    day: u32,
    frames: usize,
    previous: Vec<Creature>,
    violations: Vec<String>,
}

impl DayObserver for InvariantWatch {
    fn render(&mut self, frame: &Frame<'_>) {
        self.frames += 1;
        if frame.phase == DayPhase::Spawning {
            self.violations.push(format!("day {}: rendered while spawning", frame.day));
        }
        if frame.day != self.day {
            self.day = frame.day;
            self.previous = frame.creatures.to_vec();
            return;
        }

        for (i, (before, now)) in self.previous.iter().zip(frame.creatures).enumerate() {
            if now.energy > CREATURE_MAX_ENERGY {
                self.violations.push(format!("day {}: #{i} over max energy", frame.day));
            }
            if now.eaten == before.eaten && now.energy > before.energy {
                self.violations.push(format!("day {}: #{i} gained energy without eating", frame.day));
            }
            if before.is_survivor && (now != before) {
                self.violations.push(format!("day {}: survivor #{i} changed", frame.day));
            }
            if before.is_dead() && !now.is_dead() {
                self.violations.push(format!("day {}: #{i} came back to life", frame.day));
            }
        }
        self.previous = frame.creatures.to_vec();
    }
}

#[test]
fn test_day_rules_hold_between_frames() {
    for kind in PolicyKind::ALL {
        for seed in 0..4 {
            let mut ecosystem = create_ecosystem(kind, create_test_params(), SimulationConfig::default(), seed);
            let mut watch = InvariantWatch::default();

            run_days(&mut ecosystem, 4, &mut watch, |_, _| {});

            assert!(watch.frames > 0);
            assert!(watch.violations.is_empty(), "{kind} seed {seed}: {:?}", watch.violations);
        }
    }
}

fn history_for(kind: PolicyKind, seed: u64, speed: u32) -> Vec<DayResult> {
    let config = SimulationConfig {
        speed_multiplier: speed,
        ..SimulationConfig::default()
    };
    let mut ecosystem = create_ecosystem(kind, create_test_params(), config, seed);
    let (history, _) = run_days(&mut ecosystem, 5, &mut Headless, |_, _| {});
    history.days().to_vec()
}

#[test]
fn test_same_seed_same_history() {
    for kind in PolicyKind::ALL {
        assert_eq!(history_for(kind, 42, 1), history_for(kind, 42, 1));
    }
}

#[test]
fn test_speed_does_not_change_results() {
    for kind in PolicyKind::ALL {
        let slow = history_for(kind, 17, 1);
        for speed in [2, 8, 128, 1000] {
            assert_eq!(slow, history_for(kind, 17, speed), "{kind} at x{speed}");
        }
    }
}
