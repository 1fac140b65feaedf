use crate::aircraft::flight_state::FlightPhase;

/// Commits a classified phase only after it has been seen on `confirm_ticks`
/// consecutive ticks. With one tick every change is announced immediately.
#[derive(Debug, Clone)]
pub struct PhaseTracker {
    committed: FlightPhase,
    candidate: FlightPhase,
    streak: u32,
    confirm_ticks: u32,
}

impl PhaseTracker {
    pub fn new(initial: FlightPhase, confirm_ticks: u32) -> Self {
        PhaseTracker {
            committed: initial,
            candidate: initial,
            streak: 0,
            confirm_ticks: confirm_ticks.max(1),
        }
    }

    pub fn committed(&self) -> FlightPhase {
        self.committed
    }

    /// Feeds this tick's classification; returns `(from, to)` when the
    /// committed phase changes.
    pub fn observe(&mut self, phase: FlightPhase) -> Option<(FlightPhase, FlightPhase)> {
        if phase == self.committed {
            self.candidate = phase;
            self.streak = 0;
            return None;
        }

        if phase == self.candidate {
            self.streak += 1;
        } else {
            self.candidate = phase;
            self.streak = 1;
        }

        if self.streak < self.confirm_ticks {
            return None;
        }

        let from = self.committed;
        self.committed = phase;
        self.streak = 0;
        Some((from, phase))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use FlightPhase::*;

    #[test]
    fn test_immediate_commit() {
        let mut tracker = PhaseTracker::new(PreFlight, 1);
        assert_eq!(tracker.observe(PreFlight), None);
        assert_eq!(tracker.observe(Taxi), Some((PreFlight, Taxi)));
        assert_eq!(tracker.observe(Taxi), None);
        assert_eq!(tracker.observe(PreFlight), Some((Taxi, PreFlight)));
    }

    #[test]
    fn test_zero_confirm_ticks_behaves_like_one() {
        let mut tracker = PhaseTracker::new(PreFlight, 0);
        assert_eq!(tracker.observe(Taxi), Some((PreFlight, Taxi)));
    }

    #[test]
    fn test_debounce_suppresses_flapping() {
        let mut tracker = PhaseTracker::new(Cruise, 3);

        for phase in [Approach, Cruise, Approach, Approach, Cruise] {
            assert_eq!(tracker.observe(phase), None);
        }
        assert_eq!(tracker.committed(), Cruise);

        assert_eq!(tracker.observe(Descent), None);
        assert_eq!(tracker.observe(Descent), None);
        assert_eq!(tracker.observe(Descent), Some((Cruise, Descent)));
        assert_eq!(tracker.committed(), Descent);
    }
}
