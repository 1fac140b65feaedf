use tracing::info;

use crate::aircraft::flight_state::FlightState;
use crate::aircraft::profile::AircraftProfile;
use crate::constants::{MIN_AIRCRAFT_MASS, MS_TO_KNOTS, THRUST_SCALE};
use crate::utils::angles::saturate;

use super::atmosphere::thrust_factor;

/// Airframe plus fuel, one litre counted as one kilogram.
pub fn aircraft_mass(profile: &AircraftProfile, state: &FlightState) -> f64 {
    (profile.empty_weight + state.fuel_remaining).max(MIN_AIRCRAFT_MASS)
}

/// Engine stage: accelerates the aircraft along its heading.
pub fn apply_thrust(state: &mut FlightState, profile: &AircraftProfile, delta_time: f64) {
    if !state.engines_running {
        state.throttle = 0.0;
        return;
    }

    let thrust = state.throttle * thrust_factor(state.altitude);
    let acceleration = thrust * THRUST_SCALE / aircraft_mass(profile, state); // m/s²

    state.indicated_airspeed += acceleration * delta_time * MS_TO_KNOTS;
    state.indicated_airspeed = saturate(state.indicated_airspeed, 0.0, profile.max_speed);
}

/// Fuel stage: burns fuel at a rate proportional to throttle and shuts the
/// engines down once the tanks are dry.
pub fn burn_fuel(state: &mut FlightState, profile: &AircraftProfile, delta_time: f64) {
    if !state.engines_running {
        state.fuel_flow = 0.0;
        return;
    }

    state.fuel_flow = profile.fuel_burn * state.throttle / 100.0; // l/h
    state.fuel_remaining = (state.fuel_remaining - state.fuel_flow * delta_time / 3600.0).max(0.0);

    if state.fuel_remaining <= 0.0 {
        state.engines_running = false;
        state.fuel_flow = 0.0;
        info!("fuel exhausted, engines stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::airport::Airport;
    use crate::aircraft::flight_state::Ambient;
    use approx::assert_abs_diff_eq;

    fn running(fuel: f64, throttle: f64) -> (FlightState, AircraftProfile) {
        let profile = AircraftProfile::cessna_172();
        let airport = Airport::new("TEST", "Sea Level", 0.0, 0.0, 0.0);
        let mut state = FlightState::at_airport(&airport, fuel, Ambient::calm());
        state.engines_running = true;
        state.throttle = throttle;
        (state, profile)
    }

    #[test]
    fn test_mass_includes_fuel() {
        let (state, profile) = running(200.0, 0.0);
        assert_eq!(aircraft_mass(&profile, &state), 967.0);
    }

    #[test]
    fn test_mass_has_floor() {
        let (state, mut profile) = running(0.0, 0.0);
        profile.empty_weight = 0.0;
        assert_eq!(aircraft_mass(&profile, &state), MIN_AIRCRAFT_MASS);
    }

    #[test]
    fn test_thrust_at_sea_level() {
        let (mut state, profile) = running(233.0, 100.0);
        apply_thrust(&mut state, &profile, 0.1);

        // 100 * 100 / 1000 kg = 10 m/s² for 0.1 s
        assert_abs_diff_eq!(state.indicated_airspeed, 1.0 * MS_TO_KNOTS, epsilon = 1e-9);
    }

    #[test]
    fn test_thrust_capped_at_max_speed() {
        let (mut state, profile) = running(200.0, 100.0);
        state.indicated_airspeed = profile.max_speed - 0.01;
        apply_thrust(&mut state, &profile, 1.0);
        assert_eq!(state.indicated_airspeed, profile.max_speed);
    }

    #[test]
    fn test_engines_off_zero_throttle() {
        let (mut state, profile) = running(200.0, 80.0);
        state.engines_running = false;
        apply_thrust(&mut state, &profile, 0.1);
        assert_eq!(state.throttle, 0.0);
        assert_eq!(state.indicated_airspeed, 0.0);
    }

    #[test]
    fn test_fuel_burn() {
        let (mut state, profile) = running(200.0, 50.0);
        burn_fuel(&mut state, &profile, 3600.0);

        assert_eq!(state.fuel_flow, 18.0);
        assert_abs_diff_eq!(state.fuel_remaining, 182.0, epsilon = 1e-9);
        assert!(state.engines_running);
    }

    #[test]
    fn test_fuel_exhaustion_stops_engines() {
        let (mut state, profile) = running(0.001, 100.0);
        burn_fuel(&mut state, &profile, 1.0);

        assert_eq!(state.fuel_remaining, 0.0);
        assert_eq!(state.fuel_flow, 0.0);
        assert!(!state.engines_running);
    }

    #[test]
    fn test_idle_engines_with_empty_tanks_stop() {
        let (mut state, profile) = running(0.0, 0.0);
        burn_fuel(&mut state, &profile, 0.05);
        assert!(!state.engines_running);
    }
}
