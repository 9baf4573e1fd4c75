//! Time sources for animated widgets
//!
//! Widgets need two clocks: a monotonic [`Instant`] to schedule frames and a
//! wall-clock reading (Unix milliseconds) to know what to show.

use embassy_time::Instant;

pub const MILLIS_IN_MINUTE: u64 = 60 * 1000;
pub const MILLIS_IN_HOUR: u64 = 60 * MILLIS_IN_MINUTE;
pub const MILLIS_IN_12_HOURS: u64 = 12 * MILLIS_IN_HOUR;

/// Something that can tell the time
pub trait TimeSource {
    /// Monotonic instant used for scheduling
    fn now(&self) -> Instant;

    /// Wall-clock time in milliseconds since the Unix epoch
    fn wall_clock_ms(&self) -> u64;
}

/// [`TimeSource`] backed by the embassy time driver.
///
/// The wall clock is derived from the epoch time at boot, which the
/// application learns from NTP, an RTC or a companion device.
#[derive(Debug, Clone, Copy)]
pub struct EmbassyClock {
    boot_epoch_ms: u64,
}

impl EmbassyClock {
    pub fn new(boot_epoch_ms: u64) -> Self {
        Self { boot_epoch_ms }
    }

    /// Re-anchor the wall clock so that "now" reads `epoch_ms`
    pub fn sync(&mut self, epoch_ms: u64) {
        self.boot_epoch_ms = epoch_ms.saturating_sub(Instant::now().as_millis());
    }
}

impl TimeSource for EmbassyClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall_clock_ms(&self) -> u64 {
        self.boot_epoch_ms + Instant::now().as_millis()
    }
}

/// Manually driven clock, handy for tests and for replaying frames
#[derive(Debug, Clone, Copy)]
pub struct ManualClock {
    pub instant: Instant,
    pub wall_ms: u64,
}

impl ManualClock {
    pub fn new(wall_ms: u64) -> Self {
        Self {
            instant: Instant::from_millis(0),
            wall_ms,
        }
    }

    /// Move both clocks forward by `ms`
    pub fn advance_ms(&mut self, ms: u64) {
        self.instant = Instant::from_millis(self.instant.as_millis() + ms);
        self.wall_ms += ms;
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Instant {
        self.instant
    }

    fn wall_clock_ms(&self) -> u64 {
        self.wall_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_constants() {
        assert_eq!(MILLIS_IN_MINUTE, 60_000);
        assert_eq!(MILLIS_IN_HOUR, 3_600_000);
        assert_eq!(MILLIS_IN_12_HOURS, 43_200_000);
    }

    #[test]
    fn test_manual_clock_advances_both_readings() {
        let mut clock = ManualClock::new(1_000);
        clock.advance_ms(250);
        assert_eq!(clock.now().as_millis(), 250);
        assert_eq!(clock.wall_clock_ms(), 1_250);
    }
}
