#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a single-player Nuggets session.

mod config;
mod session;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use nuggets_core::{Command, SessionHandle};
use nuggets_rendering::TextPresenter;
use nuggets_world::{self as world, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use crate::{config::SessionConfig, session::Session};

/// Explore a Nuggets map from the terminal.
#[derive(Debug, Parser)]
#[command(name = "nuggets", version, about)]
struct Cli {
    /// Map file to load.
    #[arg(long)]
    map: PathBuf,
    /// TOML configuration holding the gold budget and an optional seed.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for gold placement and spawning; overrides the configuration.
    #[arg(long)]
    seed: Option<u64>,
    /// Glyph identifying the local player.
    #[arg(long, default_value_t = 'A')]
    player: char,
    /// Name reported for the local player.
    #[arg(long, default_value = "player")]
    name: String,
}

/// Entry point for the Nuggets command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    let seed = cli
        .seed
        .or(config.seed)
        .unwrap_or_else(|| rand::thread_rng().gen());
    tracing::info!(seed, "seeding session");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut world: World = World::load(&cli.map)?;
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::DistributeGold {
            config: config.gold,
        },
        &mut rng,
        &mut events,
    )
    .context("distributing gold")?;
    world::apply(
        &mut world,
        Command::InsertOccupant {
            glyph: cli.player,
            name: cli.name.clone(),
            handle: SessionHandle::detached(),
        },
        &mut rng,
        &mut events,
    )
    .with_context(|| format!("spawning player {}", cli.player))?;

    let mut session = Session::new(world, cli.player, rng);
    let mut presenter = TextPresenter::new(io::stdout().lock());
    session.run(io::stdin().lock(), &mut presenter)
}
