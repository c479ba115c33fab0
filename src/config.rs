use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;

use crate::foundation::error::{WobbleError, WobbleResult};

/// How paths share timers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickMode {
    /// One shared timer ticks every path together.
    #[default]
    Synchronized,
    /// Each path owns its own timer.
    Independent,
}

/// What happens to a path's jitter state between ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JitterCarry {
    /// Counter and offset pair carry over, so the wobble drifts along the path.
    #[default]
    Persist,
    /// Counter and offset pair are re-drawn at the start of every tick.
    Reseed,
}

/// Fixed wobble parameters. Not re-read after initialization.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WobbleConfig {
    /// Offset magnitude; each offset component lies in `[-amplitude/2, amplitude/2)`.
    pub amplitude: f64,
    /// Path distance between offset changes.
    pub interval: f64,
    /// Nominal time between ticks, in milliseconds.
    pub period_ms: u64,
    /// Timer sharing strategy.
    pub mode: TickMode,
    /// Jitter state handling between ticks.
    pub carry: JitterCarry,
}

impl Default for WobbleConfig {
    fn default() -> Self {
        Self {
            amplitude: 2.0,
            interval: 40.0,
            period_ms: 240,
            mode: TickMode::Synchronized,
            carry: JitterCarry::Persist,
        }
    }
}

impl WobbleConfig {
    /// Check the numeric invariants the algorithm relies on.
    pub fn validate(&self) -> WobbleResult<()> {
        if !self.amplitude.is_finite() || self.amplitude < 0.0 {
            return Err(WobbleError::config("amplitude must be finite and >= 0"));
        }
        if !self.interval.is_finite() || self.interval <= 0.0 {
            return Err(WobbleError::config("interval must be finite and > 0"));
        }
        if self.period_ms == 0 {
            return Err(WobbleError::config("period_ms must be > 0"));
        }
        Ok(())
    }

    /// Nominal tick period.
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> WobbleResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| WobbleError::config(format!("invalid config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_path(path: &Path) -> WobbleResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
