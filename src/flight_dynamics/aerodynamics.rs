use crate::aircraft::flight_state::FlightState;
use crate::aircraft::profile::AircraftProfile;
use crate::constants::{
    BASE_DRAG_COEFFICIENT, BASE_LIFT_COEFFICIENT, FLAP_DRAG_INCREMENT, FLAP_LIFT_INCREMENT,
    GEAR_DRAG_INCREMENT, GRAVITY, KNOTS_TO_FPM, KNOTS_TO_MS, MAX_PITCH, MIN_VERTICAL_SPEED,
    MS_TO_FPM, MS_TO_KNOTS,
};
use crate::utils::angles::saturate;

use super::atmosphere::air_density;
use super::propulsion::aircraft_mass;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aerodynamics {
    pub wing_area: f64, // m²
}

impl Aerodynamics {
    pub fn new(wing_area: f64) -> Self {
        Aerodynamics { wing_area }
    }

    pub fn lift_coefficient(&self, flaps: f64) -> f64 {
        BASE_LIFT_COEFFICIENT + FLAP_LIFT_INCREMENT * flaps / 100.0
    }

    pub fn drag_coefficient(&self, gear_down: bool, flaps: f64) -> f64 {
        let gear = if gear_down { GEAR_DRAG_INCREMENT } else { 0.0 };
        BASE_DRAG_COEFFICIENT + gear + FLAP_DRAG_INCREMENT * flaps / 100.0
    }

    fn dynamic_pressure(&self, air_density: f64, airspeed_kt: f64) -> f64 {
        let speed = airspeed_kt * KNOTS_TO_MS;
        0.5 * air_density * speed.powi(2)
    }

    /// Lift in newtons.
    pub fn calculate_lift(&self, state: &FlightState) -> f64 {
        let q = self.dynamic_pressure(air_density(state.altitude), state.indicated_airspeed);
        q * self.wing_area * self.lift_coefficient(state.flaps)
    }

    /// Drag in newtons.
    pub fn calculate_drag(&self, state: &FlightState) -> f64 {
        let q = self.dynamic_pressure(air_density(state.altitude), state.indicated_airspeed);
        q * self.wing_area * self.drag_coefficient(state.gear_down, state.flaps)
    }

    /// Aerodynamic stage: vertical speed from net lift, pitch from the flight
    /// path angle and the drag deceleration.
    pub fn apply(&self, state: &mut FlightState, profile: &AircraftProfile, delta_time: f64) {
        let mass = aircraft_mass(profile, state);
        let lift = self.calculate_lift(state);
        let drag = self.calculate_drag(state);
        let net_vertical_force = lift - mass * GRAVITY;
        let vertical_change = net_vertical_force / mass * delta_time * MS_TO_FPM;

        if state.is_airborne() {
            state.vertical_speed += vertical_change;
        } else if state.is_on_ground() {
            if net_vertical_force > 0.0 {
                // rotation: the wing is carrying the aircraft off the runway
                state.vertical_speed = state.vertical_speed.max(0.0) + vertical_change;
            } else {
                state.vertical_speed = 0.0;
            }
        }
        // clear of the ground with the gear still down: rate is held
        state.vertical_speed = saturate(state.vertical_speed, MIN_VERTICAL_SPEED, profile.climb_rate);

        if state.indicated_airspeed > 0.0 {
            let horizontal_fpm = state.indicated_airspeed * KNOTS_TO_FPM;
            let flight_path = state.vertical_speed.atan2(horizontal_fpm).to_degrees();
            state.pitch = flight_path.clamp(-MAX_PITCH, MAX_PITCH);
        }

        state.indicated_airspeed =
            (state.indicated_airspeed - drag / mass * delta_time * MS_TO_KNOTS).max(0.0);
    }
}

impl Default for Aerodynamics {
    fn default() -> Self {
        Aerodynamics::new(crate::constants::DEFAULT_WING_AREA)
    }
}
