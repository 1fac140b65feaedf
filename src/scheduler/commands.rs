use crate::constants::MAX_CONTROL_POSITION;
use crate::flight_dynamics::integrator::FlightDynamics;

/// A pilot input queued by the control surface and applied at the start of
/// the next tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlCommand {
    SetThrottle(f64),
    AdjustThrottle(f64),
    SetFlaps(f64),
    ToggleGear,
    ToggleBrakes,
    StartEngines,
    StopEngines,
    Pitch(f64),
    Roll(f64),
    Yaw(f64),
}

impl ControlCommand {
    /// Applies the command and returns the status line to announce, if any.
    pub fn apply(self, dynamics: &mut FlightDynamics) -> Option<String> {
        match self {
            ControlCommand::SetThrottle(value) => {
                set_position(&mut dynamics.state_mut().throttle, value);
                None
            }
            ControlCommand::AdjustThrottle(delta) => {
                let current = dynamics.state().throttle;
                set_position(&mut dynamics.state_mut().throttle, current + delta);
                None
            }
            ControlCommand::SetFlaps(value) => {
                let state = dynamics.state_mut();
                set_position(&mut state.flaps, value);
                Some(format!("Flaps at {}%", state.flaps.round() as i64))
            }
            ControlCommand::ToggleGear => {
                let state = dynamics.state_mut();
                state.gear_down = !state.gear_down;
                Some(if state.gear_down { "Gear down" } else { "Gear up" }.to_string())
            }
            ControlCommand::ToggleBrakes => {
                let state = dynamics.state_mut();
                state.brakes_engaged = !state.brakes_engaged;
                Some(
                    if state.brakes_engaged {
                        "Brakes engaged"
                    } else {
                        "Brakes released"
                    }
                    .to_string(),
                )
            }
            ControlCommand::StartEngines => {
                dynamics.state_mut().engines_running = true;
                Some("Engines started".to_string())
            }
            ControlCommand::StopEngines => {
                let state = dynamics.state_mut();
                state.engines_running = false;
                state.throttle = 0.0;
                Some("Engines stopped".to_string())
            }
            ControlCommand::Pitch(input) => {
                dynamics.apply_pitch_input(input);
                None
            }
            ControlCommand::Roll(input) => {
                dynamics.apply_roll_input(input);
                None
            }
            ControlCommand::Yaw(input) => {
                dynamics.apply_yaw_input(input);
                None
            }
        }
    }
}

/// Throttle and flap positions live in `[0, 100]`; NaN leaves them alone.
fn set_position(position: &mut f64, value: f64) {
    if value.is_nan() {
        return;
    }
    *position = value.clamp(0.0, MAX_CONTROL_POSITION);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::airport::Airport;
    use crate::aircraft::flight_state::{Ambient, FlightState};
    use crate::aircraft::profile::AircraftProfile;

    fn dynamics() -> FlightDynamics {
        let profile = AircraftProfile::cessna_172();
        let state =
            FlightState::at_airport(&Airport::paris_orly(), profile.fuel_capacity, Ambient::default());
        FlightDynamics::new(profile, state)
    }

    #[test]
    fn test_throttle_stays_in_range() {
        let mut dynamics = dynamics();
        let commands = [
            ControlCommand::SetThrottle(150.0),
            ControlCommand::AdjustThrottle(5.0),
            ControlCommand::AdjustThrottle(-250.0),
            ControlCommand::SetThrottle(f64::NAN),
            ControlCommand::AdjustThrottle(f64::INFINITY),
            ControlCommand::SetThrottle(-3.0),
            ControlCommand::AdjustThrottle(42.0),
        ];

        for command in commands {
            assert!(command.apply(&mut dynamics).is_none());
            let throttle = dynamics.state().throttle;
            assert!((0.0..=100.0).contains(&throttle), "throttle {}", throttle);
        }
        assert_eq!(dynamics.state().throttle, 42.0);
    }

    #[test]
    fn test_flaps_report_position() {
        let mut dynamics = dynamics();
        let status = ControlCommand::SetFlaps(20.4).apply(&mut dynamics);
        assert_eq!(status.as_deref(), Some("Flaps at 20%"));

        let status = ControlCommand::SetFlaps(400.0).apply(&mut dynamics);
        assert_eq!(status.as_deref(), Some("Flaps at 100%"));
        assert_eq!(dynamics.state().flaps, 100.0);
    }

    #[test]
    fn test_toggles() {
        let mut dynamics = dynamics();

        assert_eq!(ControlCommand::ToggleGear.apply(&mut dynamics).as_deref(), Some("Gear up"));
        assert_eq!(ControlCommand::ToggleGear.apply(&mut dynamics).as_deref(), Some("Gear down"));
        assert_eq!(
            ControlCommand::ToggleBrakes.apply(&mut dynamics).as_deref(),
            Some("Brakes released")
        );
        assert!(!dynamics.state().brakes_engaged);
    }

    #[test]
    fn test_stop_engines_cuts_throttle() {
        let mut dynamics = dynamics();
        ControlCommand::StartEngines.apply(&mut dynamics);
        ControlCommand::SetThrottle(80.0).apply(&mut dynamics);
        assert!(dynamics.state().engines_running);

        let status = ControlCommand::StopEngines.apply(&mut dynamics);

        assert_eq!(status.as_deref(), Some("Engines stopped"));
        assert!(!dynamics.state().engines_running);
        assert_eq!(dynamics.state().throttle, 0.0);
    }

    #[test]
    fn test_attitude_commands_forwarded() {
        let mut dynamics = dynamics();
        ControlCommand::Yaw(1.0).apply(&mut dynamics);
        assert_eq!(dynamics.state().heading, 2.0);
    }
}
