use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::aircraft::airport::Airport;
use crate::aircraft::flight_state::FlightState;
use crate::aircraft::profile::AircraftProfile;
use crate::config::SimulationConfig;
use crate::errors::{Result, SimulationError};
use crate::flight_dynamics::integrator::FlightDynamics;
use crate::telemetry_system::telemetry::TelemetryFrame;

use super::commands::ControlCommand;
use super::events::{EventBus, FlightEvent};
use super::phase_tracker::PhaseTracker;

struct FlightCore {
    dynamics: FlightDynamics,
    tracker: PhaseTracker,
    consecutive_failures: u32,
}

/// Everything the loop thread and the session handle both reach.
struct Shared {
    config: SimulationConfig,
    core: Mutex<Option<FlightCore>>,
    published: RwLock<Option<Arc<FlightState>>>,
    events: EventBus,
    commands: Receiver<ControlCommand>,
    fault: Mutex<Option<SimulationError>>,
}

impl Shared {
    /// One tick: drain queued commands, integrate, publish.
    ///
    /// A failed integration is rolled back and counted; only reaching the
    /// configured number of consecutive failures is reported as an error.
    /// Every tick that is not abandoned ends with a state-change event,
    /// including ticks whose dt was rejected or whose result was rolled back.
    ///
    /// With a `stop` flag, the tick is abandoned without any visible change
    /// once the flag is raised. Publication happens under its read lock, so
    /// raising it also waits out a publication already under way.
    fn tick(&self, delta_time: f64, stop: Option<&RwLock<bool>>) -> Result<()> {
        let stopped = || stop.map_or(false, |flag| *flag.read());

        let mut guard = self.core.lock();
        if stopped() {
            return Ok(());
        }
        let core = guard.as_mut().ok_or(SimulationError::NoActiveFlight)?;
        let pristine = core.dynamics.state().clone();
        let tracker = core.tracker.clone();
        let failures = core.consecutive_failures;

        let mut statuses = Vec::new();
        for command in self.commands.try_iter() {
            debug!(?command, "applying control command");
            if let Some(status) = command.apply(&mut core.dynamics) {
                statuses.push(status);
            }
        }

        let before = core.dynamics.state().clone();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| core.dynamics.step(delta_time)))
            .unwrap_or_else(|_| Err(SimulationError::TickPanicked));

        let (applied, failure) = match outcome {
            Ok(applied) => {
                core.consecutive_failures = 0;
                (applied, None)
            }
            Err(err) => {
                core.dynamics.restore(before);
                core.consecutive_failures += 1;
                warn!(
                    error = %err,
                    consecutive = core.consecutive_failures,
                    "tick failed, state rolled back"
                );
                (false, Some((core.consecutive_failures, err)))
            }
        };

        if applied {
            if let Ok(step) = Duration::try_from_secs_f64(delta_time) {
                core.dynamics.state_mut().elapsed += step;
            }
        }

        let snapshot = Arc::new(core.dynamics.state().clone());
        let transition = core.tracker.observe(snapshot.phase);

        let gate = stop.map(|flag| flag.read());
        if gate.as_ref().map_or(false, |raised| **raised) {
            core.dynamics.restore(pristine);
            core.tracker = tracker;
            core.consecutive_failures = failures;
            debug!(discarded_statuses = statuses.len(), "tick abandoned after stop request");
            return Ok(());
        }
        drop(guard);

        *self.published.write() = Some(Arc::clone(&snapshot));

        for status in statuses {
            info!(status = %status, "control applied");
            self.events.publish(FlightEvent::Status(status));
        }
        if let Some((from, to)) = transition {
            info!(%from, %to, "flight phase changed");
            self.events.publish(FlightEvent::PhaseChanged { from, to });
        }
        self.events.publish(FlightEvent::StateChanged(snapshot));

        match failure {
            Some((consecutive, err)) if consecutive >= self.config.max_consecutive_failures.max(1) => {
                Err(SimulationError::TickFailures {
                    consecutive,
                    last: err.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

fn run_loop(shared: Arc<Shared>, stop: Arc<RwLock<bool>>, running: Arc<AtomicBool>, done: Sender<()>) {
    let period = shared.config.tick_period();
    let mut last_tick = Instant::now();

    while !*stop.read() {
        let started = Instant::now();
        let delta_time = started.duration_since(last_tick).as_secs_f64();
        last_tick = started;

        if let Err(err) = shared.tick(delta_time, Some(&stop)) {
            let stopped = stop.read();
            error!(error = %err, "simulation loop halted");
            if !*stopped {
                shared.events.publish(FlightEvent::Fault(err.to_string()));
                *shared.fault.lock() = Some(err);
            }
            break;
        }

        if let Some(remaining) = period.checked_sub(started.elapsed()) {
            thread::sleep(remaining);
        }
    }

    running.store(false, Ordering::Release);
    let _ = done.send(());
}

struct Worker {
    handle: JoinHandle<()>,
    done: Receiver<()>,
    stop: Arc<RwLock<bool>>,
    running: Arc<AtomicBool>,
}

impl Worker {
    fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

/// A flight session: owns the aircraft state, the background loop and the
/// control queue.
///
/// Control calls never touch the physics directly. They are queued and
/// applied at the start of the next tick, either on the loop thread after
/// [`Simulation::start`] or on the caller's thread with [`Simulation::step`].
pub struct Simulation {
    shared: Arc<Shared>,
    commands: Sender<ControlCommand>,
    worker: Option<Worker>,
    /// A loop that missed its stop deadline. It has been told to stop and
    /// publishes nothing further, but a new loop waits until it has exited.
    stale: Option<Worker>,
    aircraft: Option<AircraftProfile>,
    departure: Option<Airport>,
    destination: Option<Airport>,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        let (commands, commands_rx) = unbounded();
        let shared = Shared {
            events: EventBus::new(config.event_capacity),
            config,
            core: Mutex::new(None),
            published: RwLock::new(None),
            commands: commands_rx,
            fault: Mutex::new(None),
        };

        Simulation {
            shared: Arc::new(shared),
            commands,
            worker: None,
            stale: None,
            aircraft: None,
            departure: None,
            destination: None,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.shared.config
    }

    /// Replaces any current flight with a fresh one parked at `departure`.
    /// A running loop is stopped first; if it cannot be stopped in time the
    /// current flight is kept and `StopTimedOut` is returned.
    pub fn initialize_flight(
        &mut self,
        aircraft: &AircraftProfile,
        departure: &Airport,
        destination: Option<&Airport>,
    ) -> Result<()> {
        aircraft.validate()?;

        match self.stop() {
            Err(err @ SimulationError::StopTimedOut(_)) => return Err(err),
            Err(err) => warn!(error = %err, "previous flight ended with an error"),
            Ok(()) => {}
        }
        let discarded = self.shared.commands.try_iter().count();
        if discarded > 0 {
            debug!(discarded, "pending commands discarded");
        }

        let config = &self.shared.config;
        let state = FlightState::at_airport(departure, aircraft.fuel_capacity, config.ambient);
        let tracker = PhaseTracker::new(state.phase, config.phase_confirm_ticks);
        let dynamics =
            FlightDynamics::new(aircraft.clone(), state).with_max_time_step(config.max_timestep_s);
        let snapshot = Arc::new(dynamics.state().clone());

        *self.shared.core.lock() = Some(FlightCore {
            dynamics,
            tracker,
            consecutive_failures: 0,
        });
        *self.shared.published.write() = Some(snapshot);
        self.shared.fault.lock().take();

        self.aircraft = Some(aircraft.clone());
        self.departure = Some(departure.clone());
        self.destination = destination.cloned();

        let mut message = format!("Flight initialized. Departure: {}.", departure.name);
        if let Some(destination) = destination {
            message.push_str(&format!(
                " Destination: {}. Distance: {} nautical miles. Bearing: {} degrees.",
                destination.name,
                departure.distance_to(destination).round() as i64,
                departure.bearing_to(destination).round() as i64
            ));
        }

        info!(
            aircraft = %aircraft.id,
            departure = %departure.icao,
            destination = destination.map(|airport| airport.icao.as_str()),
            "flight initialized"
        );
        self.shared.events.publish(FlightEvent::Status(message));
        Ok(())
    }

    /// Spawns the tick loop. Does nothing without a flight or when already
    /// running.
    ///
    /// Fails with `AlreadyRunning` while a loop that missed its stop
    /// deadline is still alive.
    pub fn start(&mut self) -> Result<()> {
        if !self.has_flight() {
            debug!("start ignored, no active flight");
            return Ok(());
        }
        if let Some(stale) = self.stale.take() {
            if !stale.handle.is_finished() {
                warn!("previous simulation loop has not exited yet");
                self.stale = Some(stale);
                return Err(SimulationError::AlreadyRunning);
            }
            if stale.handle.join().is_err() {
                warn!("simulation thread panicked");
            }
        }
        if let Some(worker) = &self.worker {
            if !worker.handle.is_finished() {
                return Ok(());
            }
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.handle.join();
        }

        if let Some(err) = self.shared.fault.lock().take() {
            warn!(error = %err, "discarding fault from previous run");
        }
        if let Some(core) = self.shared.core.lock().as_mut() {
            core.consecutive_failures = 0;
        }

        let stop = Arc::new(RwLock::new(false));
        let running = Arc::new(AtomicBool::new(true));
        let (done_tx, done_rx) = bounded(1);
        let shared = Arc::clone(&self.shared);
        let stop_flag = Arc::clone(&stop);
        let running_flag = Arc::clone(&running);

        let handle = thread::Builder::new()
            .name("flight-simulation".to_string())
            .spawn(move || run_loop(shared, stop_flag, running_flag, done_tx))?;

        self.worker = Some(Worker {
            handle,
            done: done_rx,
            stop,
            running,
        });
        info!(period_ms = self.shared.config.tick_period_ms, "simulation started");
        Ok(())
    }

    /// Stops the loop and waits for it, bounded by the configured timeout.
    ///
    /// Returns the fault that halted the loop, if one did. On timeout the
    /// loop is kept aside; a later `stop` waits for it again.
    pub fn stop(&mut self) -> Result<()> {
        let worker = match self.worker.take().or_else(|| self.stale.take()) {
            Some(worker) => worker,
            None => return Ok(()),
        };

        *worker.stop.write() = true;
        let timeout = self.shared.config.stop_timeout();
        match worker.done.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if worker.handle.join().is_err() {
                    warn!("simulation thread panicked");
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!(?timeout, "simulation loop did not acknowledge stop");
                self.stale = Some(worker);
                return Err(SimulationError::StopTimedOut(timeout));
            }
        }

        info!("simulation stopped");
        self.shared
            .events
            .publish(FlightEvent::Status("Simulation stopped".to_string()));

        match self.shared.fault.lock().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Runs one tick on the calling thread. Only allowed while the loop is
    /// not running.
    pub fn step(&self, delta_time: f64) -> Result<()> {
        if self.is_running() {
            return Err(SimulationError::AlreadyRunning);
        }
        if !self.has_flight() {
            return Err(SimulationError::NoActiveFlight);
        }
        self.shared.tick(delta_time, None)
    }

    /// True while a loop thread is alive, including one that missed its
    /// stop deadline.
    pub fn is_running(&self) -> bool {
        self.worker.iter().chain(self.stale.iter()).any(Worker::is_running)
    }

    pub fn has_flight(&self) -> bool {
        self.aircraft.is_some()
    }

    pub fn aircraft(&self) -> Option<&AircraftProfile> {
        self.aircraft.as_ref()
    }

    pub fn departure(&self) -> Option<&Airport> {
        self.departure.as_ref()
    }

    pub fn destination(&self) -> Option<&Airport> {
        self.destination.as_ref()
    }

    /// Latest whole-tick state.
    pub fn snapshot(&self) -> Option<Arc<FlightState>> {
        self.shared.published.read().clone()
    }

    pub fn announce_flight_state(&self) -> Option<String> {
        self.snapshot().map(|state| state.voice_status())
    }

    pub fn telemetry_frame(&self) -> Option<TelemetryFrame> {
        let capacity = self.aircraft.as_ref()?.fuel_capacity;
        self.snapshot()
            .map(|state| TelemetryFrame::from_state(&state, capacity))
    }

    pub fn subscribe(&self) -> Receiver<FlightEvent> {
        self.shared.events.subscribe()
    }

    pub fn take_fault(&self) -> Option<SimulationError> {
        self.shared.fault.lock().take()
    }

    pub fn set_throttle(&self, value: f64) {
        self.send(ControlCommand::SetThrottle(value));
    }

    /// See [`crate::constants::DEFAULT_THROTTLE_STEP`] for the usual step.
    pub fn increase_throttle(&self, amount: f64) {
        self.send(ControlCommand::AdjustThrottle(amount));
    }

    pub fn decrease_throttle(&self, amount: f64) {
        self.send(ControlCommand::AdjustThrottle(-amount));
    }

    pub fn set_flaps(&self, value: f64) {
        self.send(ControlCommand::SetFlaps(value));
    }

    pub fn toggle_gear(&self) {
        self.send(ControlCommand::ToggleGear);
    }

    pub fn toggle_brakes(&self) {
        self.send(ControlCommand::ToggleBrakes);
    }

    pub fn start_engines(&self) {
        self.send(ControlCommand::StartEngines);
    }

    pub fn stop_engines(&self) {
        self.send(ControlCommand::StopEngines);
    }

    pub fn apply_pitch_control(&self, input: f64) {
        self.send(ControlCommand::Pitch(input));
    }

    pub fn apply_roll_control(&self, input: f64) {
        self.send(ControlCommand::Roll(input));
    }

    pub fn apply_yaw_control(&self, input: f64) {
        self.send(ControlCommand::Yaw(input));
    }

    fn send(&self, command: ControlCommand) {
        if !self.has_flight() {
            debug!(?command, "no active flight, command ignored");
            return;
        }
        if self.commands.send(command).is_err() {
            debug!(?command, "command queue closed");
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Simulation::new(SimulationConfig::default())
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            warn!(error = %err, "simulation dropped with an error");
        }
    }
}
