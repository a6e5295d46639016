//! End-to-end episode scenarios through the public environment API

use std::f32::consts::PI;

use pong_rl::sim::{MatchPhase, Side};
use pong_rl::{EnvConfig, EnvError, Observation, PongEnv};

fn single_tick_config() -> EnvConfig {
    EnvConfig {
        repeat_actions: 1,
        ..Default::default()
    }
}

#[test]
fn launch_angle_lies_in_mirrored_cones() {
    let mut env = PongEnv::new(single_tick_config(), 1).unwrap();
    env.reset(Some(1));

    let vel = env.engine().ball().vel;
    assert!((vel.length() - 2.0).abs() < 1e-5);
    // Elevation above the horizontal, folded into the first quadrant
    let elevation = vel.y.abs().atan2(vel.x.abs());
    assert!((PI / 8.0 - 1e-5..=PI / 3.0 + 1e-5).contains(&elevation));
}

#[test]
fn first_score_rewards_and_recenters() {
    let mut env = PongEnv::new(single_tick_config(), 1).unwrap();
    env.reset(Some(1));

    let mut scored = None;
    for _ in 0..100_000 {
        let result = env.step(0).unwrap();
        if result.reward != 0.0 {
            scored = Some(result);
            break;
        }
    }
    let result = scored.expect("a point should be scored");

    let magnitude = result.reward.abs();
    assert!(magnitude == 500.0 || magnitude == 2500.0, "reward {}", result.reward);
    match result.info.scorer {
        Some(Side::Player) => assert!(result.reward > 0.0),
        Some(Side::Opponent) => assert!(result.reward < 0.0),
        None => panic!("scoring step must name a scorer"),
    }

    let Observation::Full(values) = result.observation else {
        panic!("default config uses the full observation");
    };
    assert_eq!(&values[2..4], &[200.0, 150.0]);
    assert_eq!(result.info.phase, MatchPhase::MatchOver);
}

#[test]
fn single_match_episode_ends_with_bonus() {
    let config = EnvConfig {
        num_matches: 1,
        ..Default::default()
    };
    let mut env = PongEnv::new(config, 42).unwrap();
    env.reset(Some(42));

    let mut last = None;
    for step in 0..100_000u32 {
        let result = env.step((step % 3) as u8).unwrap();
        if result.reward != 0.0 {
            last = Some(result);
            break;
        }
        assert!(!result.done);
    }
    let result = last.expect("episode should finish");
    assert!(result.done);
    assert_eq!(result.reward.abs(), 2500.0);
    assert_eq!(result.info.score.player + result.info.score.opponent, 1);

    // Stepping past the end is harmless
    let again = env.step(1).unwrap();
    assert!(again.done);
    assert_eq!(again.reward, 0.0);
    assert_eq!(again.observation, result.observation);
}

#[test]
fn invalid_action_is_rejected_without_side_effects() {
    let mut env = PongEnv::new(EnvConfig::default(), 8).unwrap();
    env.reset(Some(8));
    for _ in 0..10 {
        env.step(2).unwrap();
    }
    let obs = env.observation();
    let frame = env.frame();

    assert!(matches!(env.step(3), Err(EnvError::InvalidAction(3))));
    assert!(matches!(env.step(255), Err(EnvError::InvalidAction(255))));

    assert_eq!(env.observation(), obs);
    assert_eq!(env.frame().tick, frame.tick);
    assert_eq!(env.frame().ball, frame.ball);
}

#[test]
fn full_episode_terminates_at_threshold() {
    let mut env = PongEnv::new(EnvConfig::default(), 2024).unwrap();
    env.reset(Some(2024));

    let mut points = 0;
    let mut steps = 0;
    while !env.is_done() {
        let result = env.step(0).unwrap();
        if result.reward != 0.0 {
            points += 1;
            let max = result.info.score.player.max(result.info.score.opponent);
            // Terminates exactly when one side passes half of seven
            assert_eq!(result.done, max >= 4);
            assert_eq!(result.reward.abs() == 2500.0, result.done);
        }
        steps += 1;
        assert!(steps < 2_000_000, "episode never ended");
    }
    let score = env.score();
    assert_eq!(score.player.max(score.opponent), 4);
    assert!(points >= 4 && points <= 7);
}

#[test]
fn reset_clears_finished_episode() {
    let config = EnvConfig {
        num_matches: 1,
        ..Default::default()
    };
    let mut env = PongEnv::new(config, 3).unwrap();
    while !env.is_done() {
        env.step(0).unwrap();
    }
    let obs = env.reset(None);
    assert!(!env.is_done());
    assert_eq!(env.score().player + env.score().opponent, 0);
    assert_eq!(obs.as_slice()[1], 150.0);
}

#[test]
fn relative_observation_tracks_offsets() {
    let mut env = PongEnv::new(EnvConfig::relative(), 5).unwrap();
    env.reset(Some(5));
    for _ in 0..20 {
        let result = env.step(1).unwrap();
        let Observation::Relative([dx, dy]) = result.observation else {
            panic!("relative config must yield relative observations");
        };
        let engine = env.engine();
        assert_eq!(dx, engine.player().pos.x - engine.ball().pos.x);
        assert_eq!(dy, engine.player().pos.y - engine.ball().pos.y);
    }
}

#[test]
fn config_file_round_trip() {
    let path = std::env::temp_dir().join(format!("pong-rl-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "width": 600, "height": 400, "repeat_actions": 2 }"#).unwrap();
    let config = EnvConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.width, 600.0);
    assert_eq!(config.repeat_actions, 2);
    let env = PongEnv::new(config, 0).unwrap();
    assert_eq!(env.observation_space().high, vec![600.0, 400.0, 600.0, 400.0]);
}
