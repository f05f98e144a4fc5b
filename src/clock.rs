//! Playback clock
//!
//! Maps the precision time stamps of a recorded stream onto wall-clock time so
//! that replayed telemetry looks live. A time stamp lower than the previous one
//! means the recording looped or was rewound: the mapping is re-anchored on the
//! current wall-clock time.
//!
//! All times are seconds since the POSIX epoch.

use log::debug;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Clock state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ClockState {
    /// No time stamp converted yet
    #[default]
    Uninitialized,
    /// Anchored on a reference point
    Running {
        /// Input time stamp of the anchor
        reference_input: f64,
        /// Wall-clock time of the anchor
        reference_wall_clock: f64,
        /// Last converted input
        last_input: f64,
        /// Output of the last conversion
        last_output: f64,
    },
}

/// Simulation clock for looped playback
#[derive(Debug, Clone, Default)]
pub struct SimulationClock {
    state: ClockState,
    /// Number of re-anchors caused by rewinds
    resets: u64,
}

impl SimulationClock {
    /// Create an uninitialized clock
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Number of loop/rewind re-anchors so far
    pub fn resets(&self) -> u64 {
        self.resets
    }

    /// Convert a recorded time stamp using the system clock
    pub fn convert(&mut self, timestamp: f64) -> f64 {
        self.convert_at(timestamp, wall_clock_now())
    }

    /// Convert a recorded time stamp given the current wall-clock time
    pub fn convert_at(&mut self, timestamp: f64, now: f64) -> f64 {
        match self.state {
            ClockState::Uninitialized => self.anchor(timestamp, now),
            ClockState::Running {
                reference_input,
                reference_wall_clock,
                last_input,
                last_output,
            } => {
                if timestamp == last_input {
                    return last_output;
                }
                if timestamp < last_input {
                    debug!(
                        "time stamp went back from {:.6} to {:.6}, re-anchoring playback clock",
                        last_input, timestamp
                    );
                    self.resets += 1;
                    return self.anchor(timestamp, now);
                }

                let output = reference_wall_clock + (timestamp - reference_input);
                self.state = ClockState::Running {
                    reference_input,
                    reference_wall_clock,
                    last_input: timestamp,
                    last_output: output,
                };
                output
            }
        }
    }

    /// Forget the reference point
    pub fn reset(&mut self) {
        self.state = ClockState::Uninitialized;
    }

    fn anchor(&mut self, timestamp: f64, now: f64) -> f64 {
        self.state = ClockState::Running {
            reference_input: timestamp,
            reference_wall_clock: now,
            last_input: timestamp,
            last_output: now,
        };
        now
    }
}

/// Clock shared between the telemetry and video paths
///
/// Every conversion runs inside one critical section.
#[derive(Debug, Default)]
pub struct SharedClock {
    inner: Mutex<SimulationClock>,
}

impl SharedClock {
    /// Create an uninitialized shared clock
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`SimulationClock::convert`]
    pub fn convert(&self, timestamp: f64) -> f64 {
        self.lock().convert(timestamp)
    }

    /// See [`SimulationClock::convert_at`]
    pub fn convert_at(&self, timestamp: f64, now: f64) -> f64 {
        self.lock().convert_at(timestamp, now)
    }

    /// See [`SimulationClock::reset`]
    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Snapshot of the wrapped clock
    pub fn snapshot(&self) -> SimulationClock {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SimulationClock> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Current wall-clock time in seconds since the POSIX epoch
pub fn wall_clock_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_first_conversion_anchors() {
        let mut clock = SimulationClock::new();
        assert_eq!(clock.state(), ClockState::Uninitialized);
        assert_eq!(clock.convert_at(100.0, 5000.0), 5000.0);
        assert!(matches!(clock.state(), ClockState::Running { .. }));
    }

    #[test]
    fn test_preserves_differences() {
        let mut clock = SimulationClock::new();
        let t0 = clock.convert_at(100.0, 5000.0);
        let t1 = clock.convert_at(100.5, 9999.0);
        let t2 = clock.convert_at(102.25, 1.0);

        assert!(t0 < t1 && t1 < t2);
        assert_abs_diff_eq!(t1 - t0, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(t2 - t0, 2.25, epsilon = 1e-9);
    }

    #[test]
    fn test_same_input_returns_previous_output() {
        let mut clock = SimulationClock::new();
        clock.convert_at(10.0, 500.0);
        let first = clock.convert_at(11.0, 600.0);
        assert_eq!(clock.convert_at(11.0, 700.0), first);
        assert_eq!(clock.resets(), 0);
    }

    #[test]
    fn test_rewind_reanchors() {
        let mut clock = SimulationClock::new();
        clock.convert_at(10.0, 500.0);
        clock.convert_at(20.0, 510.0);

        assert_eq!(clock.convert_at(10.0, 900.0), 900.0);
        assert_eq!(clock.resets(), 1);
        assert_abs_diff_eq!(clock.convert_at(12.0, 0.0), 902.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rewind_lands_near_wall_clock() {
        let mut clock = SimulationClock::new();
        let base = 1_553_622_777.0;
        clock.convert(base);
        clock.convert(base + 60.0);

        let out = clock.convert(base);
        assert!((out - wall_clock_now()).abs() < 5.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = SimulationClock::new();
        clock.convert_at(10.0, 500.0);
        clock.reset();
        assert_eq!(clock.state(), ClockState::Uninitialized);
        assert_eq!(clock.convert_at(50.0, 42.0), 42.0);
    }

    #[test]
    fn test_shared_clock_across_threads() {
        let clock = std::sync::Arc::new(SharedClock::new());
        clock.convert_at(0.0, 1000.0);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let clock = std::sync::Arc::clone(&clock);
                std::thread::spawn(move || clock.convert_at(10.0, 0.0))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1010.0);
        }
        assert_eq!(clock.snapshot().resets(), 0);
        assert!(matches!(clock.snapshot().state(), ClockState::Running { .. }));
    }
}
