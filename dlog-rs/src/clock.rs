//! Time measurement for the `t*` / `et*` internal variables.
//!
//! [`Clock`] remembers when the logger was created and when it last emitted
//! a line.  Each [`Clock::tick`] yields both spans as [`TimeParts`].

use std::time::{Duration, Instant};

/// Unit a time variable is expressed in, keyed by its one-letter suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Hours,
    Minutes,
    Seconds,
    Millis,
    Micros,
    Nanos,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 6] = [
        TimeUnit::Hours,
        TimeUnit::Minutes,
        TimeUnit::Seconds,
        TimeUnit::Millis,
        TimeUnit::Micros,
        TimeUnit::Nanos,
    ];

    /// Variable-name suffix: `h m s l i n`.
    pub fn suffix(self) -> char {
        match self {
            TimeUnit::Hours => 'h',
            TimeUnit::Minutes => 'm',
            TimeUnit::Seconds => 's',
            TimeUnit::Millis => 'l',
            TimeUnit::Micros => 'i',
            TimeUnit::Nanos => 'n',
        }
    }
}

/// A span of time readable in any [`TimeUnit`], fractions included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeParts(Duration);

impl TimeParts {
    pub fn new(span: Duration) -> Self {
        Self(span)
    }

    pub fn duration(&self) -> Duration {
        self.0
    }

    pub fn in_unit(&self, unit: TimeUnit) -> f64 {
        let secs = self.0.as_secs_f64();
        match unit {
            TimeUnit::Hours => secs / 3600.0,
            TimeUnit::Minutes => secs / 60.0,
            TimeUnit::Seconds => secs,
            TimeUnit::Millis => secs * 1e3,
            TimeUnit::Micros => secs * 1e6,
            // Integer path keeps large spans from losing nanoseconds.
            TimeUnit::Nanos => self.0.as_nanos() as f64,
        }
    }
}

/// Total and since-last-message stopwatch.
#[derive(Debug, Clone)]
pub struct Clock {
    start: Instant,
    last: Instant,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self { start, last: start }
    }

    /// Advance to now; returns `(total, elapsed)`.
    pub fn tick(&mut self) -> (TimeParts, TimeParts) {
        self.tick_at(Instant::now())
    }

    /// Advance to `now`.  Instants earlier than the previous tick count as
    /// zero elapsed time.
    pub fn tick_at(&mut self, now: Instant) -> (TimeParts, TimeParts) {
        let total = now.saturating_duration_since(self.start);
        let elapsed = now.saturating_duration_since(self.last);
        self.last = self.last.max(now);
        (TimeParts(total), TimeParts(elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units() {
        let t = TimeParts::new(Duration::from_millis(90 * 60 * 1000));
        assert_eq!(t.in_unit(TimeUnit::Hours), 1.5);
        assert_eq!(t.in_unit(TimeUnit::Minutes), 90.0);
        assert_eq!(t.in_unit(TimeUnit::Seconds), 5400.0);
        assert_eq!(t.in_unit(TimeUnit::Millis), 5_400_000.0);
        assert_eq!(t.in_unit(TimeUnit::Nanos), 5.4e12);
    }

    #[test]
    fn suffixes() {
        let s: String = TimeUnit::ALL.iter().map(|u| u.suffix()).collect();
        assert_eq!(s, "hmslin");
    }

    #[test]
    fn total_and_elapsed() {
        let start = Instant::now();
        let mut clock = Clock::starting_at(start);

        let (total, elapsed) = clock.tick_at(start + Duration::from_millis(250));
        assert_eq!(total.duration(), Duration::from_millis(250));
        assert_eq!(elapsed.duration(), Duration::from_millis(250));

        let (total, elapsed) = clock.tick_at(start + Duration::from_millis(400));
        assert_eq!(total.duration(), Duration::from_millis(400));
        assert_eq!(elapsed.duration(), Duration::from_millis(150));
    }

    #[test]
    fn going_backwards_is_zero() {
        let start = Instant::now();
        let mut clock = Clock::starting_at(start + Duration::from_secs(1));
        let (total, elapsed) = clock.tick_at(start);
        assert_eq!(total.duration(), Duration::ZERO);
        assert_eq!(elapsed.duration(), Duration::ZERO);
    }
}
