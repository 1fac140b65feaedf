// Physical Constants
pub const GRAVITY: f64 = 9.81; // m/s²
pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.225; // kg/m³
pub const DENSITY_SCALE_HEIGHT: f64 = 8_500.0; // m
pub const THRUST_LAPSE_ALTITUDE: f64 = 30_000.0; // ft

// Unit Conversions
pub const FEET_TO_METERS: f64 = 0.3048;
pub const KNOTS_TO_MS: f64 = 0.514444;
pub const MS_TO_KNOTS: f64 = 1.94384;
pub const MS_TO_FPM: f64 = 196.85; // m/s -> ft/min
pub const KNOTS_TO_FPM: f64 = 101.269; // kt -> ft/min
pub const METERS_PER_DEGREE_LATITUDE: f64 = 111_320.0;
pub const EARTH_RADIUS_NM: f64 = 3_440.065;

// Airframe Model
pub const THRUST_SCALE: f64 = 100.0;
pub const DEFAULT_WING_AREA: f64 = 50.0; // m²
pub const MIN_AIRCRAFT_MASS: f64 = 1.0; // kg
pub const BASE_LIFT_COEFFICIENT: f64 = 0.5;
pub const FLAP_LIFT_INCREMENT: f64 = 0.5;
pub const BASE_DRAG_COEFFICIENT: f64 = 0.02;
pub const GEAR_DRAG_INCREMENT: f64 = 0.01;
pub const FLAP_DRAG_INCREMENT: f64 = 0.01;

// Attitude and Control Limits
pub const MAX_PITCH: f64 = 15.0; // deg
pub const MAX_ROLL: f64 = 30.0; // deg
pub const ATTITUDE_LAG_GAIN: f64 = 0.1;
pub const ROLL_TURN_FACTOR: f64 = 0.1; // deg of heading per deg of roll
pub const YAW_TURN_STEP: f64 = 2.0; // deg per full-deflection input
pub const MIN_VERTICAL_SPEED: f64 = -3_000.0; // ft/min
pub const MAX_CONTROL_POSITION: f64 = 100.0; // % for throttle and flaps
pub const DEFAULT_THROTTLE_STEP: f64 = 5.0; // %

// Flight Phase Thresholds
pub const GROUND_CONTACT_HEIGHT: f64 = 50.0; // ft above the field
pub const TAXI_SPEED: f64 = 10.0; // kt
pub const TAKEOFF_SPEED_RATIO: f64 = 0.8;
pub const INITIAL_CLIMB_ALTITUDE: f64 = 1_000.0; // ft
pub const CLIMB_VERTICAL_SPEED: f64 = 500.0; // ft/min
pub const DESCENT_VERTICAL_SPEED: f64 = -500.0; // ft/min
pub const APPROACH_ALTITUDE: f64 = 3_000.0; // ft
pub const LANDING_ALTITUDE: f64 = 500.0; // ft

// Simulation Parameters
pub const TICK_PERIOD_MS: u64 = 50; // 20 Hz
pub const MAX_TIME_STEP: f64 = 1.0; // s
pub const STOP_TIMEOUT_MS: u64 = 1_000;
pub const MAX_CONSECUTIVE_TICK_FAILURES: u32 = 3;
pub const EVENT_QUEUE_CAPACITY: usize = 256;
