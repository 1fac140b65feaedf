use serde::Deserialize;

use crate::constants::DEFAULT_WING_AREA;
use crate::errors::{Result, SimulationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AircraftCategory {
    #[default]
    LightAircraft,
    BusinessJet,
    RegionalAirliner,
    NarrowBodyAirliner,
    WideBodyAirliner,
    Cargo,
}

impl AircraftCategory {
    pub fn description(&self) -> &'static str {
        match self {
            AircraftCategory::LightAircraft => "Light aircraft",
            AircraftCategory::BusinessJet => "Business jet",
            AircraftCategory::RegionalAirliner => "Regional airliner",
            AircraftCategory::NarrowBodyAirliner => "Narrow-body airliner",
            AircraftCategory::WideBodyAirliner => "Wide-body airliner",
            AircraftCategory::Cargo => "Cargo aircraft",
        }
    }
}

/// Performance envelope of an aircraft type, as read from the catalog.
///
/// Speeds are in knots, altitudes in feet, fuel in litres (one litre is
/// treated as one kilogram of mass), weights in kilograms and vertical rates
/// in feet per minute.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AircraftProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub category: AircraftCategory,
    pub max_speed: f64,
    pub cruise_speed: f64,
    pub max_altitude: f64,
    pub range: f64,
    pub fuel_capacity: f64,
    pub fuel_burn: f64, // l/h at full throttle
    pub empty_weight: f64,
    pub max_takeoff_weight: f64,
    pub takeoff_speed: f64,
    pub landing_speed: f64,
    pub climb_rate: f64,
    pub descent_rate: f64,
    pub turn_rate: f64, // deg/s
    pub engine_count: u32,
    #[serde(default = "AircraftProfile::default_wing_area")]
    pub wing_area: f64, // m²
}

impl AircraftProfile {
    const fn default_wing_area() -> f64 {
        DEFAULT_WING_AREA
    }

    pub fn cessna_172() -> Self {
        AircraftProfile {
            id: "c172".to_string(),
            name: "172 Skyhawk".to_string(),
            manufacturer: "Cessna".to_string(),
            category: AircraftCategory::LightAircraft,
            max_speed: 163.0,
            cruise_speed: 122.0,
            max_altitude: 14_000.0,
            range: 640.0,
            fuel_capacity: 212.0,
            fuel_burn: 36.0,
            empty_weight: 767.0,
            max_takeoff_weight: 1_111.0,
            takeoff_speed: 55.0,
            landing_speed: 61.0,
            climb_rate: 730.0,
            descent_rate: 500.0,
            turn_rate: 3.0,
            engine_count: 1,
            wing_area: DEFAULT_WING_AREA,
        }
    }

    pub fn airbus_a320() -> Self {
        AircraftProfile {
            id: "a320".to_string(),
            name: "A320".to_string(),
            manufacturer: "Airbus".to_string(),
            category: AircraftCategory::NarrowBodyAirliner,
            max_speed: 470.0,
            cruise_speed: 447.0,
            max_altitude: 39_000.0,
            range: 3_300.0,
            fuel_capacity: 24_210.0,
            fuel_burn: 2_500.0,
            empty_weight: 42_600.0,
            max_takeoff_weight: 78_000.0,
            takeoff_speed: 145.0,
            landing_speed: 137.0,
            climb_rate: 2_500.0,
            descent_rate: 2_000.0,
            turn_rate: 3.0,
            engine_count: 2,
            wing_area: 122.6,
        }
    }

    /// Checks that every rate, speed and weight is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("max_speed", self.max_speed),
            ("cruise_speed", self.cruise_speed),
            ("max_altitude", self.max_altitude),
            ("range", self.range),
            ("fuel_capacity", self.fuel_capacity),
            ("fuel_burn", self.fuel_burn),
            ("empty_weight", self.empty_weight),
            ("max_takeoff_weight", self.max_takeoff_weight),
            ("takeoff_speed", self.takeoff_speed),
            ("landing_speed", self.landing_speed),
            ("climb_rate", self.climb_rate),
            ("descent_rate", self.descent_rate),
            ("turn_rate", self.turn_rate),
            ("wing_area", self.wing_area),
        ];

        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InvalidProfile(format!(
                    "{}: {} must be finite and non-negative, got {}",
                    self.id, field, value
                )));
            }
        }
        Ok(())
    }

    pub fn voice_description(&self) -> String {
        format!(
            "{} {}. {}. Cruise speed: {} knots. Maximum altitude: {} feet.",
            self.manufacturer,
            self.name,
            self.category.description(),
            self.cruise_speed.round() as i64,
            self.max_altitude.round() as i64
        )
    }
}
