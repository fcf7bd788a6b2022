//! Wall-clock stamps and elapsed-time formatting for job runs.
//!
//! Every batch of jobs is bracketed by a start and finish stamp, and each
//! job inside it by its own pair. The helpers here produce the local-time
//! stamp strings and the `H:MM:SS` elapsed text shown next to them.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

/// A running stopwatch anchored at a wall-clock moment.
#[derive(Debug, Clone)]
pub struct RunClock {
    started: Instant,
    started_wall: DateTime<Local>,
}

impl RunClock {
    /// Start a new clock anchored to now.
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            started_wall: Local::now(),
        }
    }

    /// Time elapsed since the clock started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Local-time stamp of the start moment.
    pub fn started_stamp(&self) -> String {
        format_stamp(&self.started_wall)
    }

    /// Elapsed time rendered as `H:MM:SS`.
    pub fn elapsed_text(&self) -> String {
        format_elapsed(self.elapsed())
    }
}

/// Current local time as a stamp string.
pub fn now_stamp() -> String {
    format_stamp(&Local::now())
}

fn format_stamp(at: &DateTime<Local>) -> String {
    at.format("%x %X").to_string()
}

/// Render a duration as `H:MM:SS`; hours are not padded and may exceed 24.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

/// Render whole seconds as `HH:MM:SS`, the way disc probes report durations.
pub fn format_duration_secs(secs: f64) -> String {
    let total = secs.max(0.0).round() as u64;
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_elapsed() {
        let clock = RunClock::start();
        assert!(clock.elapsed() < Duration::from_secs(1));
        assert!(!clock.started_stamp().is_empty());
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "0:00:00");
        assert_eq!(format_elapsed(Duration::from_secs(61)), "0:01:01");
        assert_eq!(format_elapsed(Duration::from_secs(3 * 3600 + 5)), "3:00:05");
        assert_eq!(format_elapsed(Duration::from_secs(26 * 3600)), "26:00:00");
    }

    #[test]
    fn test_format_duration_secs() {
        assert_eq!(format_duration_secs(3725.4), "01:02:05");
        assert_eq!(format_duration_secs(-3.0), "00:00:00");
    }
}
