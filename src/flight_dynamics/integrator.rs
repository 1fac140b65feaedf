use crate::aircraft::flight_state::FlightState;
use crate::aircraft::profile::AircraftProfile;
use crate::constants::{
    ATTITUDE_LAG_GAIN, MAX_PITCH, MAX_ROLL, MAX_TIME_STEP, ROLL_TURN_FACTOR, YAW_TURN_STEP,
};
use crate::errors::Result;
use crate::utils::angles::{normalize_degrees, saturate};

use super::aerodynamics::Aerodynamics;
use super::flight_phase::{classify, PhaseInputs};
use super::{kinematics, propulsion};

/// Advances one aircraft through time. Owns the flight state; the profile is
/// read-only.
#[derive(Debug, Clone)]
pub struct FlightDynamics {
    profile: AircraftProfile,
    state: FlightState,
    aerodynamics: Aerodynamics,
    max_time_step: f64,
}

impl FlightDynamics {
    pub fn new(profile: AircraftProfile, state: FlightState) -> Self {
        let aerodynamics = Aerodynamics::new(profile.wing_area);
        FlightDynamics {
            profile,
            state,
            aerodynamics,
            max_time_step: MAX_TIME_STEP,
        }
    }

    pub fn with_max_time_step(mut self, max_time_step: f64) -> Self {
        self.max_time_step = max_time_step;
        self
    }

    pub fn profile(&self) -> &AircraftProfile {
        &self.profile
    }

    pub fn state(&self) -> &FlightState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut FlightState {
        &mut self.state
    }

    pub(crate) fn restore(&mut self, state: FlightState) {
        self.state = state;
    }

    /// Runs one integration step of `delta_time` seconds.
    ///
    /// Returns `false` and leaves the state untouched when the step is not
    /// positive, not finite or longer than the configured maximum.
    pub fn update(&mut self, delta_time: f64) -> bool {
        if !delta_time.is_finite() || delta_time <= 0.0 || delta_time > self.max_time_step {
            return false;
        }

        propulsion::apply_thrust(&mut self.state, &self.profile, delta_time);
        propulsion::burn_fuel(&mut self.state, &self.profile, delta_time);
        self.aerodynamics.apply(&mut self.state, &self.profile, delta_time);
        kinematics::advance_position(&mut self.state, delta_time);

        self.state.phase = classify(&PhaseInputs::from(&self.state), self.profile.takeoff_speed);
        true
    }

    /// `update` followed by a sanity check of the resulting state.
    pub fn step(&mut self, delta_time: f64) -> Result<bool> {
        let applied = self.update(delta_time);
        self.state.check_finite()?;
        Ok(applied)
    }

    pub fn apply_pitch_input(&mut self, input: f64) {
        if let Some(input) = control_deflection(input) {
            let target = MAX_PITCH * input;
            self.state.pitch += (target - self.state.pitch) * ATTITUDE_LAG_GAIN;
        }
    }

    pub fn apply_roll_input(&mut self, input: f64) {
        if let Some(input) = control_deflection(input) {
            let target = MAX_ROLL * input;
            self.state.roll += (target - self.state.roll) * ATTITUDE_LAG_GAIN;
            self.turn(self.state.roll * ROLL_TURN_FACTOR);
        }
    }

    pub fn apply_yaw_input(&mut self, input: f64) {
        if let Some(input) = control_deflection(input) {
            self.turn(YAW_TURN_STEP * input);
        }
    }

    fn turn(&mut self, degrees: f64) {
        self.state.heading = normalize_degrees(self.state.heading + degrees);
    }
}

fn control_deflection(input: f64) -> Option<f64> {
    if input.is_nan() {
        return None;
    }
    Some(saturate(input, -1.0, 1.0))
}
