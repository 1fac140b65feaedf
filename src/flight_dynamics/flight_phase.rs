use crate::aircraft::flight_state::{FlightPhase, FlightState};
use crate::constants::{
    APPROACH_ALTITUDE, CLIMB_VERTICAL_SPEED, DESCENT_VERTICAL_SPEED, INITIAL_CLIMB_ALTITUDE,
    LANDING_ALTITUDE, TAKEOFF_SPEED_RATIO, TAXI_SPEED,
};

/// The observables the phase depends on, and nothing else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseInputs {
    pub engines_running: bool,
    pub on_ground: bool,
    pub airspeed: f64,       // kt
    pub vertical_speed: f64, // ft/min
    pub altitude: f64,       // ft
}

impl From<&FlightState> for PhaseInputs {
    fn from(state: &FlightState) -> Self {
        PhaseInputs {
            engines_running: state.engines_running,
            on_ground: state.is_on_ground(),
            airspeed: state.indicated_airspeed,
            vertical_speed: state.vertical_speed,
            altitude: state.altitude,
        }
    }
}

/// Classifies the flight phase. `Landed` is never produced here.
pub fn classify(inputs: &PhaseInputs, takeoff_speed: f64) -> FlightPhase {
    if !inputs.engines_running {
        return FlightPhase::PreFlight;
    }

    if inputs.on_ground {
        return if inputs.airspeed >= takeoff_speed * TAKEOFF_SPEED_RATIO {
            FlightPhase::Takeoff
        } else if inputs.airspeed > TAXI_SPEED {
            FlightPhase::Taxi
        } else {
            FlightPhase::PreFlight
        };
    }

    let vs = inputs.vertical_speed;
    if (inputs.altitude < INITIAL_CLIMB_ALTITUDE && vs > 0.0) || vs > CLIMB_VERTICAL_SPEED {
        FlightPhase::Climb
    } else if vs < DESCENT_VERTICAL_SPEED {
        FlightPhase::Descent
    } else if inputs.altitude < APPROACH_ALTITUDE && vs < 0.0 {
        FlightPhase::Approach
    } else if inputs.altitude < LANDING_ALTITUDE {
        FlightPhase::Landing
    } else {
        FlightPhase::Cruise
    }
}
