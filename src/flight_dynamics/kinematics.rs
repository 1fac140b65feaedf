use crate::aircraft::flight_state::{Ambient, FlightState};
use crate::constants::{KNOTS_TO_MS, METERS_PER_DEGREE_LATITUDE};

/// Ground speed from airspeed plus the wind component along the heading.
pub fn ground_speed(airspeed: f64, heading: f64, ambient: &Ambient) -> f64 {
    let relative_wind = (ambient.wind_direction - heading).to_radians();
    airspeed + ambient.wind_speed * relative_wind.cos()
}

/// Position stage: flat-earth step along the heading and altitude from
/// vertical speed. Altitude never goes below the field elevation.
pub fn advance_position(state: &mut FlightState, delta_time: f64) {
    state.ground_speed = ground_speed(state.indicated_airspeed, state.heading, &state.ambient);

    let distance = state.ground_speed * KNOTS_TO_MS * delta_time; // m
    let heading = state.heading.to_radians();

    let cos_latitude = state.latitude.to_radians().cos();
    state.latitude += distance / METERS_PER_DEGREE_LATITUDE * heading.cos();
    if cos_latitude.abs() > f64::EPSILON {
        state.longitude += distance / (METERS_PER_DEGREE_LATITUDE * cos_latitude) * heading.sin();
    }

    state.altitude += state.vertical_speed * delta_time / 60.0;
    let floor = state.ground_elevation.max(0.0);
    if state.altitude <= floor {
        state.altitude = floor;
        state.vertical_speed = state.vertical_speed.max(0.0);
    }

    state.track = state.heading;
}
