//! # PatternKit
//!
//! Undoable state engine for a geometric pattern editor.
//!
//! ## Architecture
//!
//! PatternKit is organized as a workspace with multiple crates:
//!
//! 1. **patternkit-core** - Coordinates, affine matrices, mirror resolution
//! 2. **patternkit-designer** - Document model, actions, reducer, undo history
//! 3. **patternkit-settings** - JSON/TOML configuration
//! 4. **patternkit** - Replay binary that integrates all crates

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

pub use patternkit_core as geometry;
pub use patternkit_designer as designer;
pub use patternkit_settings as settings;

pub use patternkit_designer::{Action, Reducer, State};
pub use patternkit_settings::{Config, LoggingSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - `RUST_LOG` environment variable support, falling back to the configured level
/// - Pretty console output, or one JSON object per line
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .context("Invalid log level")?;

    let registry = tracing_subscriber::registry().with(env_filter);
    if settings.json {
        registry
            .with(fmt::layer().with_writer(std::io::stderr).json())
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true)
                    .pretty(),
            )
            .try_init()?;
    }

    Ok(())
}

/// Reads a JSON array of actions.
pub fn load_actions(path: &Path) -> anyhow::Result<Vec<Action>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid action list in {}", path.display()))
}

/// Applies `actions` in order, starting from an empty document.
pub fn replay(reducer: &Reducer, actions: Vec<Action>) -> State {
    let count = actions.len();
    let state = actions
        .into_iter()
        .fold(patternkit_designer::initial_state(), |state, action| {
            reducer.reduce(state, action)
        });
    tracing::info!(actions = count, "Replay finished");
    state
}

/// Entity counts and history position of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub entities: BTreeMap<&'static str, usize>,
    pub next_id: u64,
    pub history_depth: usize,
    pub undone: usize,
    pub branches: usize,
}

impl Summary {
    pub fn of(state: &State) -> Self {
        let entities = BTreeMap::from([
            ("guides", state.guides.len()),
            ("paths", state.paths.len()),
            ("path_groups", state.path_groups.len()),
            ("mirrors", state.mirrors.len()),
            ("clips", state.clips.len()),
            ("overlays", state.overlays.len()),
            ("tilings", state.tilings.len()),
        ]);
        Self {
            entities,
            next_id: state.next_id,
            history_depth: patternkit_designer::reachable_depth(&state.history),
            undone: state.history.undo,
            branches: state.history.branches.len(),
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (name, count) in &self.entities {
            writeln!(f, "{name:>12}: {count}")?;
        }
        writeln!(f, "{:>12}: {}", "next_id", self.next_id)?;
        write!(
            f,
            "{:>12}: {} ({} undone, {} branches)",
            "history", self.history_depth, self.undone, self.branches
        )
    }
}

/// Writes `state` as JSON.
pub fn write_state(state: &State, path: &Path, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(state)?
    } else {
        serde_json::to_string(state)?
    };
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
