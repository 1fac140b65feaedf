use std::time::Duration;

use crate::aircraft::flight_state::{FlightPhase, FlightState};

/// The slice of flight state missions and tutorials watch.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryFrame {
    pub elapsed: Duration,
    pub altitude: f64,
    pub on_ground: bool,
    pub airspeed: f64,
    pub ground_speed: f64,
    pub vertical_speed: f64,
    pub phase: FlightPhase,
    pub fuel_fraction: f64,
}

impl TelemetryFrame {
    pub fn from_state(state: &FlightState, fuel_capacity: f64) -> Self {
        TelemetryFrame {
            elapsed: state.elapsed,
            altitude: state.altitude,
            on_ground: state.is_on_ground(),
            airspeed: state.indicated_airspeed,
            ground_speed: state.ground_speed,
            vertical_speed: state.vertical_speed,
            phase: state.phase,
            fuel_fraction: state.fuel_fraction(fuel_capacity),
        }
    }
}

/// Records frames over a flight and keeps the extremes.
pub struct Telemetry {
    pub frames: Vec<TelemetryFrame>,
    max_airspeed: f64,
    max_altitude: f64,
    max_climb_rate: f64,
    min_fuel_fraction: f64,
    phase_times: Vec<(FlightPhase, Duration)>,
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry {
            frames: Vec::new(),
            max_airspeed: 0.0,
            max_altitude: f64::MIN,
            max_climb_rate: 0.0,
            min_fuel_fraction: 1.0,
            phase_times: Vec::new(),
        }
    }

    /// `12.50s`, `1m 15.00s`, `1h 2m 5.00s`; centisecond resolution.
    fn format_time(elapsed: Duration) -> String {
        let whole = elapsed.as_secs();
        let (hours, minutes) = (whole / 3_600, whole % 3_600 / 60);
        let seconds = format!("{}.{:02}s", whole % 60, elapsed.subsec_millis() / 10);

        match (hours, minutes) {
            (0, 0) => seconds,
            (0, _) => format!("{}m {}", minutes, seconds),
            _ => format!("{}h {}m {}", hours, minutes, seconds),
        }
    }

    pub fn collect(&mut self, frame: TelemetryFrame) {
        self.max_airspeed = self.max_airspeed.max(frame.airspeed);
        self.max_altitude = self.max_altitude.max(frame.altitude);
        self.max_climb_rate = self.max_climb_rate.max(frame.vertical_speed);
        self.min_fuel_fraction = self.min_fuel_fraction.min(frame.fuel_fraction);

        match self.phase_times.last() {
            Some((phase, _)) if *phase == frame.phase => {}
            _ => self.phase_times.push((frame.phase, frame.elapsed)),
        }

        self.frames.push(frame);
    }

    pub fn max_airspeed(&self) -> f64 {
        self.max_airspeed
    }

    /// `None` until a frame has been collected.
    pub fn max_altitude(&self) -> Option<f64> {
        if self.frames.is_empty() {
            None
        } else {
            Some(self.max_altitude)
        }
    }

    pub fn phase_times(&self) -> &[(FlightPhase, Duration)] {
        &self.phase_times
    }

    pub fn summary(&self) -> String {
        let mut summary = String::from("--- Flight Summary ---\n");
        summary.push_str(&format!("Frames: {}\n", self.frames.len()));
        summary.push_str(&format!("Max Airspeed: {:.1} kt\n", self.max_airspeed));
        if let Some(altitude) = self.max_altitude() {
            summary.push_str(&format!("Max Altitude: {:.0} ft\n", altitude));
        }
        summary.push_str(&format!("Max Climb Rate: {:.0} ft/min\n", self.max_climb_rate));
        summary.push_str(&format!(
            "Min Fuel: {:.1}%\n",
            self.min_fuel_fraction * 100.0
        ));

        summary.push_str("\n--- Phase Transitions ---\n");
        for (phase, time) in &self.phase_times {
            summary.push_str(&format!("{} reached at: {}\n", phase, Self::format_time(*time)));
        }
        summary
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Telemetry::new()
    }
}
