pub mod aircraft;
pub mod config;
pub mod constants;
pub mod errors;
pub mod flight_dynamics;
pub mod scheduler;
pub mod telemetry_system;
pub mod utils;

pub use constants::*;

pub use aircraft::airport::Airport;
pub use aircraft::catalog::Catalog;
pub use aircraft::flight_state::{Ambient, FlightPhase, FlightState};
pub use aircraft::profile::{AircraftCategory, AircraftProfile};
pub use config::SimulationConfig;
pub use errors::{Result, SimulationError};

// Re-export commonly used items from flight_dynamics
pub use flight_dynamics::flight_phase::{classify, PhaseInputs};
pub use flight_dynamics::integrator::FlightDynamics;

// Re-export commonly used items from scheduler
pub use scheduler::commands::ControlCommand;
pub use scheduler::events::FlightEvent;
pub use scheduler::session::Simulation;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::{Telemetry, TelemetryFrame};
