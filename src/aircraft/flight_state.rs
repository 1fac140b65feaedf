use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::constants::GROUND_CONTACT_HEIGHT;
use crate::errors::{Result, SimulationError};

use super::airport::Airport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlightPhase {
    PreFlight,
    Taxi,
    Takeoff,
    Climb,
    Cruise,
    Descent,
    Approach,
    Landing,
    Landed,
}

impl FlightPhase {
    pub fn description(&self) -> &'static str {
        match self {
            FlightPhase::PreFlight => "Pre-flight",
            FlightPhase::Taxi => "Taxi",
            FlightPhase::Takeoff => "Takeoff",
            FlightPhase::Climb => "Climb",
            FlightPhase::Cruise => "Cruise",
            FlightPhase::Descent => "Descent",
            FlightPhase::Approach => "Approach",
            FlightPhase::Landing => "Landing",
            FlightPhase::Landed => "Landed",
        }
    }
}

impl fmt::Display for FlightPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Weather around the aircraft. Set at initialization; the physics only
/// reads it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Ambient {
    #[serde(default = "Ambient::default_wind_speed")]
    pub wind_speed: f64, // kt
    #[serde(default = "Ambient::default_wind_direction")]
    pub wind_direction: f64, // deg
    #[serde(default = "Ambient::default_temperature")]
    pub temperature: f64, // °C
    #[serde(default = "Ambient::default_visibility")]
    pub visibility: f64, // nm
}

impl Ambient {
    const fn default_wind_speed() -> f64 {
        5.0
    }

    const fn default_wind_direction() -> f64 {
        270.0
    }

    const fn default_temperature() -> f64 {
        15.0
    }

    const fn default_visibility() -> f64 {
        10.0
    }

    pub fn calm() -> Self {
        Ambient {
            wind_speed: 0.0,
            ..Ambient::default()
        }
    }
}

impl Default for Ambient {
    fn default() -> Self {
        Ambient {
            wind_speed: Self::default_wind_speed(),
            wind_direction: Self::default_wind_direction(),
            temperature: Self::default_temperature(),
            visibility: Self::default_visibility(),
        }
    }
}

/// Instantaneous physical and systems condition of the aircraft.
///
/// Altitudes are feet above sea level, speeds knots, vertical speed feet per
/// minute, angles degrees, fuel litres.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightState {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub ground_elevation: f64,

    pub indicated_airspeed: f64,
    pub ground_speed: f64,
    pub vertical_speed: f64,

    pub pitch: f64,
    pub roll: f64,
    pub heading: f64,
    pub track: f64,

    pub throttle: f64, // 0-100 %
    pub engines_running: bool,
    pub fuel_remaining: f64,
    pub fuel_flow: f64, // l/h

    pub flaps: f64, // 0-100 %
    pub gear_down: bool,
    pub brakes_engaged: bool,
    pub autopilot_enabled: bool,

    pub ambient: Ambient,

    pub phase: FlightPhase,

    pub flight_start_time: DateTime<Utc>,
    pub elapsed: Duration,
}

impl FlightState {
    /// Parked at `airport`: engines off, gear down, brakes set, full tanks.
    pub fn at_airport(airport: &Airport, fuel: f64, ambient: Ambient) -> Self {
        FlightState {
            latitude: airport.latitude,
            longitude: airport.longitude,
            altitude: airport.elevation,
            ground_elevation: airport.elevation,
            indicated_airspeed: 0.0,
            ground_speed: 0.0,
            vertical_speed: 0.0,
            pitch: 0.0,
            roll: 0.0,
            heading: 0.0,
            track: 0.0,
            throttle: 0.0,
            engines_running: false,
            fuel_remaining: fuel.max(0.0),
            fuel_flow: 0.0,
            flaps: 0.0,
            gear_down: true,
            brakes_engaged: true,
            autopilot_enabled: false,
            ambient,
            phase: FlightPhase::PreFlight,
            flight_start_time: Utc::now(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn height_above_ground(&self) -> f64 {
        self.altitude - self.ground_elevation
    }

    pub fn is_on_ground(&self) -> bool {
        self.height_above_ground() <= GROUND_CONTACT_HEIGHT
    }

    pub fn is_airborne(&self) -> bool {
        !self.is_on_ground() && !self.gear_down
    }

    /// Hours of fuel left at the current flow; zero when nothing is flowing.
    pub fn remaining_endurance(&self) -> f64 {
        if self.fuel_flow <= 0.0 {
            return 0.0;
        }
        self.fuel_remaining / self.fuel_flow
    }

    pub fn time_to_destination(&self, distance_nm: f64) -> Duration {
        if self.ground_speed <= 0.0 || distance_nm <= 0.0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(distance_nm / self.ground_speed * 3600.0)
    }

    pub fn fuel_fraction(&self, capacity: f64) -> f64 {
        if capacity <= 0.0 {
            return 0.0;
        }
        (self.fuel_remaining / capacity).clamp(0.0, 1.0)
    }

    pub fn voice_status(&self) -> String {
        format!(
            "Altitude: {} feet. Airspeed: {} knots. Heading: {} degrees. Vertical speed: {} feet per minute.",
            self.altitude.round() as i64,
            self.indicated_airspeed.round() as i64,
            self.heading.round() as i64,
            self.vertical_speed.round() as i64
        )
    }

    pub(crate) fn check_finite(&self) -> Result<()> {
        let fields = [
            ("latitude", self.latitude),
            ("longitude", self.longitude),
            ("altitude", self.altitude),
            ("indicated_airspeed", self.indicated_airspeed),
            ("ground_speed", self.ground_speed),
            ("vertical_speed", self.vertical_speed),
            ("pitch", self.pitch),
            ("roll", self.roll),
            ("heading", self.heading),
            ("throttle", self.throttle),
            ("fuel_remaining", self.fuel_remaining),
            ("fuel_flow", self.fuel_flow),
            ("flaps", self.flaps),
        ];

        match fields.iter().find(|(_, value)| !value.is_finite()) {
            Some((field, _)) => Err(SimulationError::NonFiniteState(*field)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parked() -> FlightState {
        let airport = Airport::new("TEST", "Test Field", 45.0, 5.0, 292.0);
        FlightState::at_airport(&airport, 200.0, Ambient::default())
    }

    #[test]
    fn test_initial_state_at_airport() {
        let state = parked();
        assert_eq!(state.altitude, 292.0);
        assert_eq!(state.ground_elevation, 292.0);
        assert_eq!(state.indicated_airspeed, 0.0);
        assert_eq!(state.ground_speed, 0.0);
        assert_eq!(state.fuel_remaining, 200.0);
        assert!(state.gear_down);
        assert!(!state.engines_running);
        assert_eq!(state.phase, FlightPhase::PreFlight);
        assert!(state.is_on_ground());
        assert!(!state.is_airborne());
    }

    #[test]
    fn test_airborne_requires_gear_up() {
        let mut state = parked();
        state.altitude += 1_000.0;
        assert!(!state.is_on_ground());
        assert!(!state.is_airborne());

        state.gear_down = false;
        assert!(state.is_airborne());
    }

    #[test]
    fn test_ground_contact_threshold() {
        let mut state = parked();
        state.altitude = state.ground_elevation + 50.0;
        assert!(state.is_on_ground());
        state.altitude = state.ground_elevation + 50.1;
        assert!(!state.is_on_ground());
    }

    #[test]
    fn test_remaining_endurance() {
        let mut state = parked();
        assert_eq!(state.remaining_endurance(), 0.0);

        state.fuel_flow = 40.0;
        assert_eq!(state.remaining_endurance(), 5.0);
    }

    #[test]
    fn test_time_to_destination() {
        let mut state = parked();
        assert_eq!(state.time_to_destination(100.0), Duration::ZERO);

        state.ground_speed = 100.0;
        assert_eq!(state.time_to_destination(50.0), Duration::from_secs(1800));
    }

    #[test]
    fn test_fuel_fraction() {
        let state = parked();
        assert_eq!(state.fuel_fraction(400.0), 0.5);
        assert_eq!(state.fuel_fraction(0.0), 0.0);
        assert_eq!(state.fuel_fraction(100.0), 1.0);
    }

    #[test]
    fn test_voice_status_rounds_values() {
        let mut state = parked();
        state.indicated_airspeed = 99.6;
        state.heading = 270.4;
        state.vertical_speed = -0.4;

        assert_eq!(
            state.voice_status(),
            "Altitude: 292 feet. Airspeed: 100 knots. Heading: 270 degrees. Vertical speed: 0 feet per minute."
        );
    }

    #[test]
    fn test_check_finite_names_field() {
        let mut state = parked();
        assert!(state.check_finite().is_ok());

        state.vertical_speed = f64::NAN;
        match state.check_finite() {
            Err(SimulationError::NonFiniteState(field)) => assert_eq!(field, "vertical_speed"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_phase_description() {
        assert_eq!(FlightPhase::PreFlight.to_string(), "Pre-flight");
        assert_eq!(FlightPhase::Approach.description(), "Approach");
    }
}
