#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs an alien invasion and prints it day by day.

mod config;
mod terminal;

use std::{
    io,
    sync::mpsc::{self, SyncSender},
    thread,
};

use alien_invasion_core::{CityLayout, TickReport};
use alien_invasion_rendering::{DisplaySink, Frame, WorldMap};
use alien_invasion_system_invasion::Invasion;
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    config::{Cli, LayoutSource, Settings},
    terminal::TerminalSink,
};

const DEFAULT_LOG_FILTER: &str = "alien_invasion=info";

/// Entry point for the alien invasion command-line interface.
fn main() -> Result<()> {
    let settings = Settings::from_cli(Cli::parse())?;
    init_tracing(settings.log_filter.as_deref())?;
    info!(seed = settings.seed, aliens = settings.aliens, days = settings.days, "starting invasion");

    let layout = load_layout(&settings.layout, settings.seed)?;
    if layout.is_empty() {
        warn!("layout contains no cities");
    }

    let invasion = Invasion::new(layout.clone(), settings.aliens, settings.days, settings.seed)
        .context("failed to set up the invasion")?;
    let mut world = WorldMap::new(layout.into_keys(), invasion.alive_aliens());

    let (sender, receiver) = mpsc::sync_channel(0);
    let producer = thread::Builder::new()
        .name("invasion".to_owned())
        .spawn(move || run(invasion, &sender))
        .context("failed to spawn the invasion thread")?;

    let mut sink = TerminalSink::new(io::stdout().lock(), settings.tick_delay);
    for report in receiver {
        world.apply(&report);
        sink.present(&Frame {
            tick: report.tick,
            battles: &report.battles,
            world: &world,
        })?;
    }
    sink.finish(&world)?;

    let summary = producer
        .join()
        .map_err(|_| anyhow!("invasion thread panicked"))?;
    info!(
        days = summary.days,
        survivors = summary.survivors,
        destroyed = world.destroyed(),
        "invasion finished"
    );
    Ok(())
}

fn init_tracing(filter: Option<&str>) -> Result<()> {
    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid log filter {directives:?}"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn load_layout(source: &LayoutSource, seed: u64) -> Result<CityLayout> {
    match source {
        LayoutSource::File(path) => {
            let layout = alien_invasion_system_layout::load(path)
                .with_context(|| format!("failed to load layout from {}", path.display()))?;
            info!(path = %path.display(), cities = layout.len(), "layout loaded");
            Ok(layout)
        }
        LayoutSource::Generated { matrix, cities } => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let text = alien_invasion_system_layout::generate(*cities, *matrix, &mut rng);
            let layout = alien_invasion_system_layout::parse(&text)
                .context("generated layout failed validation")?;
            if layout.len() < *cities {
                warn!(requested = cities, placed = layout.len(), matrix, "grid too small for requested cities");
            }
            info!(matrix, cities = layout.len(), "layout generated");
            Ok(layout)
        }
    }
}

/// Totals reported by the invasion thread once it stops.
#[derive(Debug)]
struct RunSummary {
    days: u64,
    survivors: usize,
}

/// Ticks until the day limit, extinction, or the display hanging up.
fn run(mut invasion: Invasion, sender: &SyncSender<TickReport>) -> RunSummary {
    loop {
        let (keep_going, report) = invasion.tick();
        let extinct = report.surviving_aliens() == 0;
        if sender.send(report).is_err() || !keep_going || extinct {
            break;
        }
    }
    RunSummary {
        days: invasion.tick_count(),
        survivors: invasion.alive_aliens(),
    }
}
