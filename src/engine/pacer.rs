//! Step pacing.
//!
//! The delay between frames is the only timing mechanism of a run. Drivers
//! call [`Pacer::pause`] after publishing each frame; the pacer decides how
//! the wait is realized.

use std::time::Duration;

/// Realizes the pause a frame asks for.
pub trait Pacer {
    /// Hold the current frame for `duration`.
    fn pause(&mut self, duration: Duration);
}

/// Blocks the calling thread for each pause.
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Never waits. Makes runs instant and deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPacer;

impl Pacer for InstantPacer {
    fn pause(&mut self, _duration: Duration) {}
}

/// Records every requested pause without waiting.
#[derive(Debug, Clone, Default)]
pub struct RecordingPacer {
    pauses: Vec<Duration>,
}

impl RecordingPacer {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pauses requested so far.
    #[must_use]
    pub fn pauses(&self) -> &[Duration] {
        &self.pauses
    }

    /// Sum of every requested pause.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.pauses.iter().sum()
    }
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, duration: Duration) {
        self.pauses.push(duration);
    }
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn pause(&mut self, duration: Duration) {
        (**self).pause(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_recording_pacer() {
        let mut pacer = RecordingPacer::new();
        pacer.pause(Duration::from_millis(5));
        pacer.pause(Duration::from_millis(7));
        assert_eq!(pacer.pauses().len(), 2);
        assert_eq!(pacer.total(), Duration::from_millis(12));
    }

    #[test]
    fn test_instant_pacer_does_not_wait() {
        let start = Instant::now();
        InstantPacer.pause(Duration::from_secs(10));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_sleep_pacer_waits() {
        let start = Instant::now();
        SleepPacer.pause(Duration::from_millis(20));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_pacer_through_mut_ref() {
        fn drive(mut pacer: impl Pacer) {
            pacer.pause(Duration::from_millis(1));
        }
        let mut pacer = RecordingPacer::new();
        drive(&mut pacer);
        assert_eq!(pacer.pauses(), &[Duration::from_millis(1)]);
    }
}
