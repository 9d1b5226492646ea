//! Live ETA countdown for in-progress tasks.
//!
//! `CountdownClock` is the pure state machine: it owns no timer and no
//! rendering concern, just a remaining-time value decremented by whole
//! seconds. `EtaTicker` is the display-side adapter that drives a clock
//! from a background thread, one tick per second, with an explicit cancel
//! contract so an unmounted display cannot leak a live timer.

use crate::timefmt::format_duration;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const NS_PER_SEC: i64 = 1_000_000_000;

/// Countdown lifecycle. Expired is terminal; there is no resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Running,
    Expired,
}

/// Pure countdown state machine over a nanosecond budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownClock {
    remaining: i64,
    state: ClockState,
}

impl CountdownClock {
    /// Create a clock with the given budget. A non-positive budget clamps
    /// to zero and starts already expired.
    pub fn new(nanoseconds_remaining: i64) -> Self {
        let remaining = nanoseconds_remaining.max(0);
        let state = if remaining == 0 {
            ClockState::Expired
        } else {
            ClockState::Running
        };
        CountdownClock { remaining, state }
    }

    /// Advance by one second. Clamps at zero and transitions to Expired;
    /// ticking an expired clock is a no-op.
    pub fn tick(&mut self) {
        if self.state == ClockState::Expired {
            return;
        }
        self.remaining -= NS_PER_SEC;
        if self.remaining <= 0 {
            self.remaining = 0;
            self.state = ClockState::Expired;
        }
    }

    /// Nanoseconds left as of the latest tick.
    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_expired(&self) -> bool {
        self.state == ClockState::Expired
    }

    /// Display string for the remaining time; an exhausted (or overdue)
    /// countdown reads "unknown" rather than a negative duration.
    pub fn eta_label(&self) -> String {
        if self.remaining <= 0 {
            "unknown".to_string()
        } else {
            format_duration(self.remaining, false, false)
        }
    }
}

/// Initial countdown budget for a started task: expected duration minus
/// time already elapsed on the server clock.
pub fn initial_eta_nanos(expected_duration: i64, start_time: i64, current_time: i64) -> i64 {
    expected_duration - (current_time - start_time)
}

/// Timer-thread adapter that ticks a [`CountdownClock`] once per second.
///
/// Each ticker is an isolated timer with no shared state; many can run
/// concurrently, one per in-progress task on screen. The thread parks
/// itself once the clock expires. `cancel()` (also run on `Drop`) stops
/// and joins the thread.
pub struct EtaTicker {
    clock: Arc<Mutex<CountdownClock>>,
    stop_flag: Arc<AtomicBool>,
    ticker_thread: Option<JoinHandle<()>>,
}

impl EtaTicker {
    pub fn new(nanoseconds_remaining: i64) -> Self {
        let clock = Arc::new(Mutex::new(CountdownClock::new(nanoseconds_remaining)));
        let stop_flag = Arc::new(AtomicBool::new(false));

        let clock_clone = Arc::clone(&clock);
        let stop_flag_clone = Arc::clone(&stop_flag);

        let ticker_thread = thread::spawn(move || {
            while !stop_flag_clone.load(Ordering::Relaxed) {
                thread::sleep(Duration::from_secs(1));

                if stop_flag_clone.load(Ordering::Relaxed) {
                    break;
                }

                let mut clock = clock_clone.lock().unwrap();
                clock.tick();
                if clock.is_expired() {
                    break;
                }
            }
        });

        Self {
            clock,
            stop_flag,
            ticker_thread: Some(ticker_thread),
        }
    }

    /// Nanoseconds left as of the latest tick.
    pub fn remaining(&self) -> i64 {
        self.clock.lock().unwrap().remaining()
    }

    pub fn is_expired(&self) -> bool {
        self.clock.lock().unwrap().is_expired()
    }

    /// Display string for the remaining time ("unknown" once exhausted).
    pub fn eta_label(&self) -> String {
        self.clock.lock().unwrap().eta_label()
    }

    /// Stop the timer thread and wait for it to exit.
    pub fn cancel(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(handle) = self.ticker_thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for EtaTicker {
    fn drop(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(handle) = self.ticker_thread.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_counts_down_to_expiry() {
        let mut clock = CountdownClock::new(3 * NS_PER_SEC);
        assert_eq!(clock.state(), ClockState::Running);

        clock.tick();
        assert_eq!(clock.remaining(), 2 * NS_PER_SEC);
        clock.tick();
        assert_eq!(clock.remaining(), NS_PER_SEC);
        clock.tick();
        assert_eq!(clock.remaining(), 0);
        assert_eq!(clock.state(), ClockState::Expired);
    }

    #[test]
    fn test_clock_tick_after_expiry_is_noop() {
        let mut clock = CountdownClock::new(3 * NS_PER_SEC);
        for _ in 0..4 {
            clock.tick();
        }
        assert_eq!(clock.remaining(), 0);
        assert_eq!(clock.state(), ClockState::Expired);
    }

    #[test]
    fn test_clock_partial_second_clamps_to_zero() {
        let mut clock = CountdownClock::new(NS_PER_SEC / 2);
        clock.tick();
        assert_eq!(clock.remaining(), 0);
        assert!(clock.is_expired());
    }

    #[test]
    fn test_clock_negative_budget_starts_expired() {
        let clock = CountdownClock::new(-5 * NS_PER_SEC);
        assert_eq!(clock.remaining(), 0);
        assert!(clock.is_expired());
        assert_eq!(clock.eta_label(), "unknown");
    }

    #[test]
    fn test_clock_eta_label_running() {
        let clock = CountdownClock::new(90 * NS_PER_SEC);
        assert_eq!(clock.eta_label(), "1m 30s");
    }

    #[test]
    fn test_clock_eta_label_expired_is_unknown() {
        let mut clock = CountdownClock::new(NS_PER_SEC);
        clock.tick();
        assert_eq!(clock.eta_label(), "unknown");
    }

    #[test]
    fn test_initial_eta_nanos() {
        // expected 10s, started 4s before the server clock → 6s remain
        let eta = initial_eta_nanos(10 * NS_PER_SEC, 100 * NS_PER_SEC, 104 * NS_PER_SEC);
        assert_eq!(eta, 6 * NS_PER_SEC);
    }

    #[test]
    fn test_initial_eta_nanos_overdue_is_negative() {
        let eta = initial_eta_nanos(10 * NS_PER_SEC, 0, 20 * NS_PER_SEC);
        assert!(eta < 0);
        assert_eq!(CountdownClock::new(eta).eta_label(), "unknown");
    }

    #[test]
    fn test_ticker_creates_with_stop_flag() {
        let mut ticker = EtaTicker::new(60 * NS_PER_SEC);
        assert!(!ticker.stop_flag.load(Ordering::Relaxed));
        assert!(ticker.ticker_thread.is_some());
        ticker.cancel();
    }

    #[test]
    fn test_ticker_cancel_sets_flag_and_joins() {
        let mut ticker = EtaTicker::new(60 * NS_PER_SEC);
        ticker.cancel();
        assert!(ticker.stop_flag.load(Ordering::Relaxed));
        assert!(ticker.ticker_thread.is_none());
    }

    #[test]
    fn test_ticker_cancel_is_idempotent() {
        let mut ticker = EtaTicker::new(60 * NS_PER_SEC);
        ticker.cancel();
        ticker.cancel();
        assert!(ticker.ticker_thread.is_none());
    }

    #[test]
    fn test_ticker_drop_sets_stop_flag() {
        let stop_flag_clone;
        {
            let ticker = EtaTicker::new(60 * NS_PER_SEC);
            stop_flag_clone = Arc::clone(&ticker.stop_flag);
            assert!(!stop_flag_clone.load(Ordering::Relaxed));
        }
        assert!(stop_flag_clone.load(Ordering::Relaxed));
    }

    #[test]
    fn test_ticker_remaining_is_queryable() {
        let mut ticker = EtaTicker::new(60 * NS_PER_SEC);
        assert_eq!(ticker.remaining(), 60 * NS_PER_SEC);
        assert_eq!(ticker.eta_label(), "1m 0s");
        assert!(!ticker.is_expired());
        ticker.cancel();
    }

    #[test]
    fn test_ticker_ticks_independently() {
        let mut ticker = EtaTicker::new(60 * NS_PER_SEC);
        thread::sleep(Duration::from_millis(1100));
        assert!(ticker.remaining() <= 59 * NS_PER_SEC);
        ticker.cancel();
    }

    #[test]
    fn test_independent_tickers_are_isolated() {
        let mut a = EtaTicker::new(60 * NS_PER_SEC);
        let mut b = EtaTicker::new(10 * NS_PER_SEC);
        assert_eq!(a.remaining(), 60 * NS_PER_SEC);
        assert_eq!(b.remaining(), 10 * NS_PER_SEC);
        a.cancel();
        // cancelling one leaves the other running
        assert!(!b.stop_flag.load(Ordering::Relaxed));
        b.cancel();
    }
}
