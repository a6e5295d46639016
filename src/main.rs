//! Pong RL headless runner
//!
//! Plays episodes with a built-in agent and prints a JSON summary.

#[cfg(not(target_arch = "wasm32"))]
mod runner {
    use std::path::PathBuf;

    use clap::{Parser, ValueEnum};

    use pong_rl::sim::{Action, RandomStream};
    use pong_rl::{EnvConfig, EnvError, EpisodeRecord, ObservationKind, PongEnv, RunSummary};

    #[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
    pub enum AgentArg {
        Track,
        Random,
        Idle,
    }

    #[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
    pub enum ObservationArg {
        Full,
        Relative,
    }

    impl From<ObservationArg> for ObservationKind {
        fn from(arg: ObservationArg) -> Self {
            match arg {
                ObservationArg::Full => ObservationKind::Full,
                ObservationArg::Relative => ObservationKind::Relative,
            }
        }
    }

    #[derive(Debug, Parser)]
    #[command(
        name = "pong-rl",
        about = "Headless Pong RL runner: plays episodes and prints a JSON summary",
        version
    )]
    pub struct Args {
        /// JSON environment config; missing fields take defaults.
        #[arg(long)]
        pub config: Option<PathBuf>,

        /// Number of episodes to play.
        #[arg(long, default_value_t = 1)]
        pub episodes: u32,

        /// Seed of the first episode (episode i uses seed + i).
        /// If omitted, one is picked at random and reported.
        #[arg(long)]
        pub seed: Option<u64>,

        /// Built-in policy driving the player paddle.
        #[arg(long, value_enum, default_value_t = AgentArg::Track)]
        pub agent: AgentArg,

        /// Observation layout; overrides the config file.
        #[arg(long, value_enum)]
        pub observation: Option<ObservationArg>,

        /// Steps after which an episode is aborted.
        #[arg(long, default_value_t = 100_000)]
        pub max_steps: u64,
    }

    /// Built-in policies for driving the environment
    pub enum Agent {
        /// Move toward the ball's height
        Track,
        /// Uniform random actions from a seeded stream
        Random(RandomStream),
        /// Never move
        Idle,
    }

    impl Agent {
        fn new(arg: AgentArg, seed: u64) -> Self {
            match arg {
                AgentArg::Track => Agent::Track,
                AgentArg::Random => Agent::Random(RandomStream::new(seed ^ 0x5eed)),
                AgentArg::Idle => Agent::Idle,
            }
        }

        fn act(&mut self, env: &PongEnv) -> Action {
            match self {
                Agent::Track => {
                    let engine = env.engine();
                    let offset = engine.ball().pos.y - engine.player().pos.y;
                    let dead_zone = engine.player().velocity;
                    if offset > dead_zone {
                        Action::Down
                    } else if offset < -dead_zone {
                        Action::Up
                    } else {
                        Action::Noop
                    }
                }
                Agent::Random(rng) => rng.choose(&Action::ALL),
                Agent::Idle => Action::Noop,
            }
        }
    }

    /// Load the config file (if any) and apply the command-line overrides
    pub fn resolve_config(args: &Args) -> Result<EnvConfig, EnvError> {
        let mut config = match &args.config {
            Some(path) => EnvConfig::load(path)?,
            None => EnvConfig::default(),
        };
        if let Some(observation) = args.observation {
            config.observation = observation.into();
        }
        Ok(config)
    }

    /// Play one episode to completion (or until `max_steps`)
    fn play_episode(
        env: &mut PongEnv,
        agent: &mut Agent,
        seed: u64,
        max_steps: u64,
    ) -> Result<EpisodeRecord, EnvError> {
        env.reset(Some(seed));
        let mut steps = 0;
        let mut total_reward = 0.0;

        while !env.is_done() {
            if steps >= max_steps {
                log::warn!("Episode with seed {} hit the {} step limit", seed, max_steps);
                env.abort();
                break;
            }
            let action = agent.act(env);
            let result = env.step(action.into())?;
            total_reward += result.reward;
            steps += 1;
        }

        let score = env.score();
        Ok(EpisodeRecord {
            seed,
            steps,
            ticks: env.engine().time_ticks(),
            total_reward,
            score,
            winner: score.leader(),
        })
    }

    pub fn run(args: &Args) -> Result<RunSummary, EnvError> {
        let config = resolve_config(args)?;
        // An unseeded run picks its seed once here and reports it
        let seed = args.seed.unwrap_or_else(rand::random);
        let mut agent = Agent::new(args.agent, seed);

        log::info!("Running {} episode(s) from seed {}", args.episodes, seed);
        let mut env = PongEnv::new(config, seed)?;
        let mut summary = RunSummary::new();

        for episode in 0..args.episodes {
            let seed = seed.wrapping_add(episode as u64);
            let record = play_episode(&mut env, &mut agent, seed, args.max_steps)?;
            summary.push(record);
        }

        log::info!(
            "Win rate {:.2}, mean reward {:.1}",
            summary.win_rate(),
            summary.mean_reward()
        );
        Ok(summary)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_defaults() {
            let args = Args::try_parse_from(["pong-rl"]).unwrap();
            assert_eq!(args.episodes, 1);
            assert_eq!(args.agent, AgentArg::Track);
            assert_eq!(args.max_steps, 100_000);
            assert!(args.seed.is_none());
            assert!(args.config.is_none());
            assert_eq!(resolve_config(&args).unwrap(), EnvConfig::default());
        }

        #[test]
        fn test_parse_typed_flags() {
            let args = Args::try_parse_from([
                "pong-rl",
                "--episodes",
                "3",
                "--seed",
                "42",
                "--agent",
                "random",
                "--observation",
                "relative",
                "--max-steps",
                "500",
            ])
            .unwrap();
            assert_eq!(args.episodes, 3);
            assert_eq!(args.seed, Some(42));
            assert_eq!(args.agent, AgentArg::Random);
            assert_eq!(args.max_steps, 500);
            let config = resolve_config(&args).unwrap();
            assert_eq!(config.observation, ObservationKind::Relative);
        }

        #[test]
        fn test_parse_rejects_bad_values() {
            assert!(Args::try_parse_from(["pong-rl", "--agent", "smart"]).is_err());
            assert!(Args::try_parse_from(["pong-rl", "--observation", "pixels"]).is_err());
            assert!(Args::try_parse_from(["pong-rl", "--seed", "-1"]).is_err());
            assert!(Args::try_parse_from(["pong-rl", "--frames", "10"]).is_err());
        }

        #[test]
        fn test_run_is_reproducible() {
            let args = Args::try_parse_from([
                "pong-rl",
                "--episodes",
                "2",
                "--seed",
                "11",
                "--agent",
                "random",
                "--max-steps",
                "2000",
            ])
            .unwrap();
            let a = run(&args).unwrap();
            let b = run(&args).unwrap();
            assert_eq!(a.episodes.len(), 2);
            assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
            assert_eq!(a.episodes[1].seed, 12);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();

    let args = runner::Args::parse();
    match runner::run(&args).and_then(|summary| summary.to_json()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Run failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The environment is used as a library on wasm; there is no runner
}
