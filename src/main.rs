//! # Jetpack driver
//!
//! Runs headless episodes of the jetpack environment with one of the built-in
//! policies and reports how each episode went. The environment never ends an
//! episode on its own frame budget, so the driver truncates episodes at
//! `--max-frames` (the config's `max_frames` by default).

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use jetpack_rl::ai::{GapFollower, IdlePolicy, Policy, RandomPolicy};
use jetpack_rl::{Environment, GameConfig, JetpackGym, Observation, VelocityStats};
use serde::Serialize;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "jetpack", about = "Run jetpack episodes with a scripted policy")]
struct Args {
    /// Number of episodes to run.
    #[arg(long, default_value_t = 5)]
    episodes: u32,

    #[arg(long, value_enum, default_value_t = PolicyKind::GapFollower)]
    policy: PolicyKind,

    /// Seed for obstacle generation and the random policy.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding the default game constants.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Truncate episodes after this many frames.
    #[arg(long)]
    max_frames: Option<u64>,

    /// Thrust probability of the random policy, in percent.
    #[arg(long, default_value_t = 20)]
    thrust_chance: usize,

    /// Print one JSON summary per episode on stdout.
    #[arg(long)]
    json: bool,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyKind {
    Idle,
    Random,
    GapFollower,
}

#[derive(Debug, Serialize)]
struct EpisodeSummary {
    episode: u32,
    total_reward: f32,
    score: u64,
    frame_count: u64,
    seconds: f64,
    terminated: bool,
    truncated: bool,
    velocity: Option<VelocityStats>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading game config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    let max_frames = args.max_frames.unwrap_or(config.max_frames);
    let mut policy = build_policy(args.policy, &config, args.seed, args.thrust_chance);
    let mut gym = JetpackGym::new(config).context("creating environment")?;

    tracing::info!(episodes = args.episodes, policy = ?args.policy, max_frames, "starting run");
    let mut best_score = 0;
    for episode in 1..=args.episodes {
        let summary = run_episode(&mut gym, policy.as_mut(), episode, max_frames)?;
        best_score = best_score.max(summary.score);
        if args.json {
            println!("{}", serde_json::to_string(&summary)?);
        } else {
            tracing::info!(
                episode,
                total_reward = summary.total_reward,
                score = summary.score,
                seconds = summary.seconds,
                truncated = summary.truncated,
                "episode finished"
            );
            if let Some(velocity) = summary.velocity {
                tracing::info!(
                    min = velocity.min,
                    max = velocity.max,
                    mean = velocity.mean,
                    "player velocity"
                );
            }
        }
    }
    gym.close();
    tracing::info!(best_score, "run finished");
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn build_policy(
    kind: PolicyKind,
    config: &GameConfig,
    seed: Option<u64>,
    thrust_chance: usize,
) -> Box<dyn Policy> {
    match kind {
        PolicyKind::Idle => Box::new(IdlePolicy),
        PolicyKind::Random => Box::new(RandomPolicy::new(thrust_chance, seed)),
        PolicyKind::GapFollower => Box::new(GapFollower::new(config)),
    }
}

fn run_episode(
    gym: &mut JetpackGym,
    policy: &mut dyn Policy,
    episode: u32,
    max_frames: u64,
) -> Result<EpisodeSummary> {
    let (mut observation, _) = gym.reset(None);
    let mut total_reward = 0f32;
    loop {
        let action = policy.decide(&Observation::from(observation));
        let transition = gym.step(i64::from(action))?;
        total_reward += transition.reward;
        observation = transition.observation;

        let truncated = !transition.terminated && transition.info.frame_count >= max_frames;
        if transition.terminated || truncated {
            return Ok(EpisodeSummary {
                episode,
                total_reward,
                score: transition.info.score,
                frame_count: transition.info.frame_count,
                seconds: gym.inner().config().frames_to_seconds(transition.info.frame_count),
                terminated: transition.terminated,
                truncated,
                velocity: gym.inner().velocity_stats(),
            });
        }
    }
}
