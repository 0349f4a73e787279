use std::path::Path;

use serde::{Deserialize, Serialize};

/// Routing knobs, bound to a [`Pathfinder`](crate::Pathfinder) at
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Cost of one grid step. Raise it when a cell maps to a larger
    /// spatial unit so the penalty ratio keeps its meaning.
    pub step_cost: u32,
    /// Default turn penalty as a multiple of `step_cost`. Straighter
    /// routes are preferred, not mandatory.
    pub turn_penalty_ratio: f32,
    /// Explored-cell budget before a search reports
    /// [`SearchAborted`](crate::SearchAborted).
    pub max_explored: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            step_cost: 1,
            turn_penalty_ratio: 2.0,
            max_explored: 100_000,
        }
    }
}

impl RouterConfig {
    /// The default turn penalty resolved to an integer cost. Searches
    /// themselves never touch floating point.
    pub fn turn_penalty(&self) -> u32 {
        (self.turn_penalty_ratio * self.step_cost as f32).round() as u32
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouterConfigFile {
    step_cost: Option<u32>,
    turn_penalty_ratio: Option<f32>,
    max_explored: Option<usize>,
}

/// Reads a config file and applies its overrides onto the defaults.
/// Accepts strict JSON, falling back to JSON5 for hand-written files.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<RouterConfig> {
    let mut config = RouterConfig::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: RouterConfigFile = match serde_json::from_str(&contents) {
        Ok(parsed) => parsed,
        Err(_) => json5::from_str(&contents)?,
    };

    if let Some(v) = parsed.step_cost {
        config.step_cost = v;
    }
    if let Some(v) = parsed.turn_penalty_ratio {
        config.turn_penalty_ratio = v;
    }
    if let Some(v) = parsed.max_explored {
        config.max_explored = v;
    }
    Ok(config)
}
