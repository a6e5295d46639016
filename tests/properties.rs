//! Invariants that must hold for any seed and action sequence

use proptest::prelude::*;

use pong_rl::sim::{Action, MatchEngine, Side};
use pong_rl::{EnvConfig, PongEnv};

fn actions(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..3, 1..max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ball_speed_is_constant(seed in any::<u64>(), moves in actions(2000)) {
        let config = EnvConfig::default();
        let mut engine = MatchEngine::new(&config, seed);
        for m in moves {
            let action = Action::try_from(m).unwrap();
            engine.tick(action);
            let speed = engine.ball().vel.length();
            prop_assert!((speed - config.ball_velocity).abs() < 1e-4, "speed {}", speed);
        }
    }

    #[test]
    fn paddles_stay_in_arena(seed in any::<u64>(), moves in actions(2000)) {
        let mut env = PongEnv::new(EnvConfig::default(), seed).unwrap();
        for m in moves {
            env.step(m).unwrap();
            let engine = env.engine();
            for y in [engine.player().pos.y, engine.opponent().pos.y] {
                prop_assert!((0.0..=300.0).contains(&y), "paddle y {}", y);
            }
        }
    }

    #[test]
    fn scores_only_grow_by_one(seed in any::<u64>(), moves in actions(3000)) {
        let config = EnvConfig { repeat_actions: 1, ..Default::default() };
        let mut env = PongEnv::new(config, seed).unwrap();
        let mut prev = env.score();
        for m in moves {
            let result = env.step(m).unwrap();
            let score = result.info.score;
            prop_assert!(score.player >= prev.player && score.opponent >= prev.opponent);
            let gained = (score.player - prev.player) + (score.opponent - prev.opponent);
            prop_assert_eq!(gained, u32::from(result.info.scorer.is_some()));
            prev = score;
        }
    }

    #[test]
    fn reward_sign_matches_scorer(seed in any::<u64>(), moves in actions(3000)) {
        let config = EnvConfig { repeat_actions: 1, num_matches: 3, ..Default::default() };
        let mut env = PongEnv::new(config, seed).unwrap();
        for m in moves {
            let result = env.step(m).unwrap();
            match result.info.scorer {
                Some(Side::Player) => prop_assert!(result.reward > 0.0),
                Some(Side::Opponent) => prop_assert!(result.reward < 0.0),
                None => prop_assert_eq!(result.reward, 0.0),
            }
            let max = result.info.score.player.max(result.info.score.opponent);
            prop_assert_eq!(result.done, 2 * max > 3);
            if result.done {
                break;
            }
        }
    }

    #[test]
    fn same_seed_same_episode(seed in any::<u64>(), moves in actions(1500)) {
        let mut a = PongEnv::new(EnvConfig::default(), seed).unwrap();
        let mut b = PongEnv::new(EnvConfig::default(), 0).unwrap();
        b.reset(Some(seed));
        for m in moves {
            let ra = a.step(m).unwrap();
            let rb = b.step(m).unwrap();
            let bits = |r: &pong_rl::StepResult| {
                r.observation.as_slice().iter().map(|v| v.to_bits()).collect::<Vec<_>>()
            };
            prop_assert_eq!(bits(&ra), bits(&rb));
            prop_assert_eq!(ra.reward.to_bits(), rb.reward.to_bits());
            prop_assert_eq!(ra.done, rb.done);
        }
    }
}
