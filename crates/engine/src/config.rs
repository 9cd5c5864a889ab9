//! Engine configuration

use std::time::Duration;

use anyhow::{anyhow, Result};

use blockfall_types::GRAVITY_TICK_MS;

/// Runtime settings for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Built-in gravity schedule. `None` disables it, leaving ticking to
    /// an external source posting through the handle.
    pub tick_interval: Option<Duration>,
    /// Seed for the default uniform piece source
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval: Some(Duration::from_millis(GRAVITY_TICK_MS)),
            seed: 1,
        }
    }
}

impl EngineConfig {
    /// Parse `--tick-ms <n>` (0 disables the built-in schedule) and
    /// `--seed <n>` from command-line style arguments
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut config = Self::default();
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "--tick-ms" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --tick-ms"))?;
                    let ms = v
                        .parse::<u64>()
                        .map_err(|_| anyhow!("invalid --tick-ms value: {}", v))?;
                    config.tick_interval = if ms == 0 {
                        None
                    } else {
                        Some(Duration::from_millis(ms))
                    };
                }
                "--seed" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --seed"))?;
                    config.seed = v
                        .parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                }
                other => {
                    return Err(anyhow!("unknown argument: {}", other));
                }
            }
            i += 1;
        }
        Ok(config)
    }
}
