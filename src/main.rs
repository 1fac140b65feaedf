use std::path::PathBuf;
use std::time::{Duration, Instant};

use flight_simulation::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEMO_DURATION: Duration = Duration::from_secs(20);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => SimulationConfig::from_file(&path)?,
        None => SimulationConfig::default(),
    };

    let catalog = Catalog::builtin();
    let (aircraft, departure, destination) = match (
        catalog.aircraft("c172"),
        catalog.airport("LFPO"),
        catalog.airport("LFBO"),
    ) {
        (Some(aircraft), Some(departure), Some(destination)) => (aircraft, departure, destination),
        _ => {
            return Err(SimulationError::InvalidProfile(
                "built-in catalog is missing the demo route".to_string(),
            ))
        }
    };

    let mut simulation = Simulation::new(config);
    let events = simulation.subscribe();

    simulation.initialize_flight(aircraft, departure, Some(destination))?;
    println!("{}", aircraft.voice_description());

    simulation.start()?;
    simulation.start_engines();
    simulation.toggle_brakes();
    simulation.set_flaps(10.0);
    simulation.set_throttle(100.0);

    let mut telemetry = Telemetry::new();
    let mut gear_raised = false;
    let started = Instant::now();

    while started.elapsed() < DEMO_DURATION {
        let event = match events.recv_timeout(Duration::from_millis(200)) {
            Ok(event) => event,
            Err(_) => continue,
        };

        match &event {
            FlightEvent::StateChanged(state) => {
                telemetry.collect(TelemetryFrame::from_state(state, aircraft.fuel_capacity));
                if !gear_raised && !state.is_on_ground() {
                    simulation.toggle_gear();
                    simulation.set_flaps(0.0);
                    simulation.decrease_throttle(DEFAULT_THROTTLE_STEP);
                    gear_raised = true;
                }
            }
            FlightEvent::Fault(_) => {
                if let Some(narration) = event.narration() {
                    warn!("{}", narration);
                }
                break;
            }
            _ => {
                if let Some(narration) = event.narration() {
                    info!("{}", narration);
                }
            }
        }
    }

    if let Some(status) = simulation.announce_flight_state() {
        info!("{}", status);
    }
    simulation.stop()?;

    println!("{}", telemetry.summary());
    Ok(())
}
