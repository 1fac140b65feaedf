use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::aircraft::flight_state::Ambient;
use crate::constants::{
    EVENT_QUEUE_CAPACITY, MAX_CONSECUTIVE_TICK_FAILURES, MAX_TIME_STEP, STOP_TIMEOUT_MS,
    TICK_PERIOD_MS,
};
use crate::errors::Result;

/// Runtime settings of a simulation session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Wall-clock period of the background loop.
    #[serde(default = "SimulationConfig::default_tick_period")]
    pub tick_period_ms: u64,
    /// Largest timestep the integrator accepts; longer ticks are skipped.
    #[serde(default = "SimulationConfig::default_max_timestep")]
    pub max_timestep_s: f64,
    /// How long `stop()` waits for the loop to acknowledge.
    #[serde(default = "SimulationConfig::default_stop_timeout")]
    pub stop_timeout_ms: u64,
    /// Consecutive failed ticks after which the loop halts.
    #[serde(default = "SimulationConfig::default_max_failures")]
    pub max_consecutive_failures: u32,
    /// Ticks a new phase must persist before it is announced.
    #[serde(default = "SimulationConfig::default_phase_confirm_ticks")]
    pub phase_confirm_ticks: u32,
    /// Per-subscriber notification queue length.
    #[serde(default = "SimulationConfig::default_event_capacity")]
    pub event_capacity: usize,
    #[serde(default)]
    pub ambient: Ambient,
}

impl SimulationConfig {
    const fn default_tick_period() -> u64 {
        TICK_PERIOD_MS
    }

    const fn default_max_timestep() -> f64 {
        MAX_TIME_STEP
    }

    const fn default_stop_timeout() -> u64 {
        STOP_TIMEOUT_MS
    }

    const fn default_max_failures() -> u32 {
        MAX_CONSECUTIVE_TICK_FAILURES
    }

    const fn default_phase_confirm_ticks() -> u32 {
        1
    }

    const fn default_event_capacity() -> usize {
        EVENT_QUEUE_CAPACITY
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms.max(1))
    }

    pub fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: Self::default_tick_period(),
            max_timestep_s: Self::default_max_timestep(),
            stop_timeout_ms: Self::default_stop_timeout(),
            max_consecutive_failures: Self::default_max_failures(),
            phase_confirm_ticks: Self::default_phase_confirm_ticks(),
            event_capacity: Self::default_event_capacity(),
            ambient: Ambient::default(),
        }
    }
}
