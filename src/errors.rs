use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid aircraft profile: {0}")]
    InvalidProfile(String),

    #[error("No active flight")]
    NoActiveFlight,

    #[error("Simulation is already running")]
    AlreadyRunning,

    #[error("Physics error: non-finite value in {0}")]
    NonFiniteState(&'static str),

    #[error("Physics error: tick panicked")]
    TickPanicked,

    #[error("Simulation halted after {consecutive} consecutive tick failures: {last}")]
    TickFailures { consecutive: u32, last: String },

    #[error("Simulation loop did not stop within {0:?}")]
    StopTimedOut(Duration),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
