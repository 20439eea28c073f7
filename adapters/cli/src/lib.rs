#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless runner that drives the dungeon with a scripted pilot.

mod autopilot;

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use nrogue_core::{
    AssetResolver, Command, Event, GameConfig, RunStatus, SoundCue, StandardSprites,
};
use nrogue_rendering::{forward_sound_cues, AudioSink, SpriteManifest, Viewport};
use nrogue_world::{self as world, query, World};
use serde::Serialize;
use tracing::{debug, info};

use crate::autopilot::{Autopilot, Mode};

const VIEW_WIDTH: f32 = 1920.0;
const VIEW_HEIGHT: f32 = 1080.0;

/// Command-line arguments accepted by the `nrogue` binary.
#[derive(Clone, Debug, Parser)]
#[command(name = "nrogue", about = "Plays a dungeon run headlessly and reports the outcome")]
pub struct Args {
    /// Seed overriding the configured one.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Maximum number of ticks to simulate.
    #[arg(long, default_value_t = 1800)]
    pub ticks: u64,
    /// Deepest level overriding the configured one.
    #[arg(long)]
    pub depth: Option<u32>,
    /// TOML file holding a partial game configuration.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// TOML sprite manifest overriding the stock sprite dimensions.
    #[arg(long, value_name = "PATH")]
    pub sprites: Option<PathBuf>,
    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,
    /// Teleport between objectives instead of walking.
    #[arg(long)]
    pub express: bool,
}

/// Outcome of a headless run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    /// Seed the run was generated from.
    pub seed: u64,
    /// Ticks simulated.
    pub ticks: u64,
    /// Level the player finished on.
    pub level: u32,
    /// Deepest level visited.
    pub deepest_level: u32,
    /// Final run status.
    pub status: RunStatus,
    /// Final score.
    pub score: u32,
    /// Final player health.
    pub health: u32,
    /// Enemies defeated during the run.
    pub enemies_defeated: u32,
    /// Pickups collected during the run.
    pub pickups_collected: u32,
    /// Levels held in the cache at the end of the run.
    pub cached_levels: Vec<u32>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "seed {} finished {:?} after {} ticks", self.seed, self.status, self.ticks)?;
        writeln!(
            f,
            "level {} (deepest {}), health {}, score {}",
            self.level, self.deepest_level, self.health, self.score
        )?;
        write!(
            f,
            "enemies defeated {}, pickups collected {}, cached levels {:?}",
            self.enemies_defeated, self.pickups_collected, self.cached_levels
        )
    }
}

/// Parses a partial game configuration; omitted fields keep their defaults.
pub fn parse_config(contents: &str) -> Result<GameConfig> {
    toml::from_str(contents).context("failed to parse game config toml contents")
}

/// Loads a partial game configuration from disk.
pub fn load_config(path: &Path) -> Result<GameConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read game config at {}", path.display()))?;
    parse_config(&contents)
}

/// Audio collaborator that records cues in the log.
#[derive(Debug, Default)]
struct LoggedAudio;

impl AudioSink for LoggedAudio {
    fn play(&mut self, cue: SoundCue) {
        debug!(%cue, "sound cue");
    }
}

#[derive(Debug, Default)]
struct Tally {
    deepest_level: u32,
    enemies_defeated: u32,
    pickups_collected: u32,
}

impl Tally {
    fn record(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::LevelEntered { level, .. } => {
                    self.deepest_level = self.deepest_level.max(*level);
                }
                Event::EnemyDefeated { .. } => self.enemies_defeated += 1,
                Event::PickupCollected { .. } => self.pickups_collected += 1,
                _ => {}
            }
        }
    }
}

/// Plays a run according to `args` and summarises the outcome.
///
/// The run stops early once it is completed or the player is defeated.
pub fn run(args: &Args) -> Result<RunSummary> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(depth) = args.depth {
        config.depth = depth;
    }
    let seed = config.seed;

    let assets: Box<dyn AssetResolver> = match &args.sprites {
        Some(path) => Box::new(SpriteManifest::from_path(path)?),
        None => Box::new(StandardSprites),
    };
    let mut world = World::with_assets(config, assets).context("invalid game configuration")?;

    let mode = if args.express {
        Mode::Express
    } else {
        Mode::Roam
    };
    let pilot = Autopilot::new(mode);
    let mut viewport = Viewport::new(VIEW_WIDTH, VIEW_HEIGHT);
    let mut audio = LoggedAudio;
    let mut tally = Tally::default();
    let mut events = Vec::new();
    let mut ticks = 0;

    info!(seed, depth = query::depth(&world), ?mode, "starting run");
    while ticks < args.ticks && query::status(&world) == RunStatus::Active {
        viewport.follow(query::player(&world).center(), query::bounds(&world));
        let step = pilot.plan(&world, &viewport);
        viewport.set_pointer(step.input.pointer);

        events.clear();
        if let Some(center) = step.teleport {
            world::apply(&mut world, Command::TeleportPlayer { center }, &mut events);
        }
        let intents = step.input.to_intents(&viewport);
        world::apply(&mut world, Command::Tick { intents }, &mut events);

        tally.record(&events);
        let _ = forward_sound_cues(&events, &mut audio);
        ticks += 1;
    }

    let player = query::player(&world);
    let summary = RunSummary {
        seed,
        ticks,
        level: query::level_index(&world),
        deepest_level: tally.deepest_level,
        status: query::status(&world),
        score: player.score,
        health: player.health,
        enemies_defeated: tally.enemies_defeated,
        pickups_collected: tally.pickups_collected,
        cached_levels: query::cached_levels(&world)
            .iter()
            .map(|cached| cached.level)
            .collect(),
    };
    info!(status = ?summary.status, ticks, score = summary.score, "run finished");
    Ok(summary)
}
