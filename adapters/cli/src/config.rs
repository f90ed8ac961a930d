//! Command-line flags, the optional TOML settings file, and their merge.

use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use serde::Deserialize;

const DEFAULT_ALIENS: usize = 15;
const DEFAULT_DAYS: u64 = 10_000;
const DEFAULT_MATRIX: usize = 5;
const DEFAULT_CITIES: usize = 20;
const DEFAULT_TICK_DELAY_MS: u64 = 250;

/// Command-line arguments accepted by the simulator.
///
/// Every setting is optional so that values from `--config` can fill the
/// gaps; flags given explicitly always win.
#[derive(Debug, Parser)]
#[command(name = "alien-invasion", about = "Simulates an alien invasion over a map of cities.")]
pub(crate) struct Cli {
    /// Number of aliens landing on day zero [default: 15].
    #[arg(short = 'a', long)]
    pub(crate) aliens: Option<usize>,
    /// Maximum number of days to simulate [default: 10000].
    #[arg(short = 'd', long)]
    pub(crate) days: Option<u64>,
    /// Layout file describing the cities and their roads.
    #[arg(long, value_name = "PATH", conflicts_with_all = ["matrix", "cities"])]
    pub(crate) city_config: Option<PathBuf>,
    /// Side length of the grid used when generating a layout [default: 5].
    #[arg(short = 'm', long)]
    pub(crate) matrix: Option<usize>,
    /// Number of cities placed on a generated layout [default: 20].
    #[arg(short = 'c', long)]
    pub(crate) cities: Option<usize>,
    /// Seed for layout generation and alien movement [default: system time].
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Pause after each rendered day, in milliseconds [default: 250].
    #[arg(long, value_name = "MS")]
    pub(crate) tick_delay_ms: Option<u64>,
    /// TOML file providing defaults for any of the other settings.
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,
    /// Tracing filter directives, overriding `RUST_LOG`.
    #[arg(long, value_name = "FILTER")]
    pub(crate) log_filter: Option<String>,
}

/// Settings read from a `--config` file.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub(crate) aliens: Option<usize>,
    pub(crate) days: Option<u64>,
    pub(crate) city_config: Option<PathBuf>,
    pub(crate) matrix: Option<usize>,
    pub(crate) cities: Option<usize>,
    pub(crate) seed: Option<u64>,
    pub(crate) tick_delay_ms: Option<u64>,
    pub(crate) log_filter: Option<String>,
}

impl FileConfig {
    /// Reads and parses the TOML file at `path`.
    ///
    /// A relative `city_config` is resolved against the directory holding the
    /// settings file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        let mut config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        if let (Some(layout), Some(base)) = (config.city_config.take(), path.parent()) {
            config.city_config = Some(base.join(layout));
        }
        Ok(config)
    }
}

/// Where the city layout comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum LayoutSource {
    /// Read and validate a layout file.
    File(PathBuf),
    /// Generate `cities` cities on a `matrix * matrix` grid.
    Generated {
        /// Grid side length.
        matrix: usize,
        /// Number of cities requested.
        cities: usize,
    },
}

/// Fully resolved run settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) aliens: usize,
    pub(crate) days: u64,
    pub(crate) layout: LayoutSource,
    pub(crate) seed: u64,
    pub(crate) tick_delay: Duration,
    pub(crate) log_filter: Option<String>,
}

impl Settings {
    /// Loads the config file named by `cli`, if any, and merges it under the flags.
    pub(crate) fn from_cli(cli: Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file, clock_seed)
    }

    /// Combines flags, file values, and defaults in that order of precedence.
    ///
    /// Layout flags are considered together: any of `--city-config`,
    /// `--matrix`, or `--cities` on the command line replaces the layout
    /// choice made by the file.
    pub(crate) fn merge(cli: Cli, file: FileConfig, fallback_seed: impl FnOnce() -> u64) -> Result<Self> {
        let days = cli.days.or(file.days).unwrap_or(DEFAULT_DAYS);
        ensure!(days > 0, "the day limit must be at least 1");

        let flags_pick_layout = cli.city_config.is_some() || cli.matrix.is_some() || cli.cities.is_some();
        let layout_file = if flags_pick_layout {
            cli.city_config
        } else {
            file.city_config
        };
        let layout = match layout_file {
            Some(path) => LayoutSource::File(path),
            None => LayoutSource::Generated {
                matrix: cli.matrix.or(file.matrix).unwrap_or(DEFAULT_MATRIX),
                cities: cli.cities.or(file.cities).unwrap_or(DEFAULT_CITIES),
            },
        };

        Ok(Self {
            aliens: cli.aliens.or(file.aliens).unwrap_or(DEFAULT_ALIENS),
            days,
            layout,
            seed: cli.seed.or(file.seed).unwrap_or_else(fallback_seed),
            tick_delay: Duration::from_millis(
                cli.tick_delay_ms.or(file.tick_delay_ms).unwrap_or(DEFAULT_TICK_DELAY_MS),
            ),
            log_filter: cli.log_filter.or(file.log_filter),
        })
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() ^ u64::from(elapsed.subsec_nanos()).rotate_left(32))
        .unwrap_or_default()
}
