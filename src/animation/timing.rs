//! Duration/overlap knobs and wall-clock progress.

use web_time::Duration;

/// Global animation timing shared by every instance.
///
/// `overlap_sec` is the trailing part of an animation during which the
/// next queued instance may already start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTiming {
    duration_sec: f32,
    overlap_sec: f32,
}

impl AnimationTiming {
    /// Timing with `overlap_sec` clamped to `[0, duration_sec]`.
    ///
    /// Negative or non-finite durations collapse to zero (instant
    /// arrival).
    pub fn new(duration_sec: f32, overlap_sec: f32) -> Self {
        let duration_sec = if duration_sec.is_finite() {
            duration_sec.max(0.0)
        } else {
            0.0
        };
        let overlap_sec = if overlap_sec.is_finite() {
            overlap_sec.clamp(0.0, duration_sec)
        } else {
            0.0
        };
        Self {
            duration_sec,
            overlap_sec,
        }
    }

    /// Seconds one instance takes to reach the target.
    pub fn duration_sec(&self) -> f32 {
        self.duration_sec
    }

    /// Seconds of overlap between consecutive animations.
    pub fn overlap_sec(&self) -> f32 {
        self.overlap_sec
    }

    /// Progress of the most recent animation at which the next queued
    /// instance is admitted: `1 - overlap / duration`.
    pub fn overlap_start_progress(&self) -> f32 {
        if self.duration_sec == 0.0 {
            0.0
        } else {
            1.0 - self.overlap_sec / self.duration_sec
        }
    }

    /// Time between consecutive admissions in a saturated pipeline.
    ///
    /// Saturates at [`Duration::MAX`] for durations too long to represent.
    pub fn admission_interval(&self) -> Duration {
        Duration::try_from_secs_f32(self.duration_sec - self.overlap_sec)
            .unwrap_or(Duration::MAX)
    }

    /// Normalized progress (0.0 to 1.0) of an animation that started at
    /// `start_secs`, evaluated at `now_secs`.
    pub fn progress(&self, start_secs: f64, now_secs: f64) -> f32 {
        if self.duration_sec == 0.0 {
            return 1.0;
        }
        ((now_secs - start_secs) / f64::from(self.duration_sec)).clamp(0.0, 1.0)
            as f32
    }
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self::new(6.0, 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_clamps() {
        let timing = AnimationTiming::new(2.0, 0.5);
        assert_eq!(timing.progress(1.0, 0.5), 0.0);
        assert!((timing.progress(1.0, 2.0) - 0.5).abs() < 1e-6);
        assert_eq!(timing.progress(1.0, 3.0), 1.0);
        assert_eq!(timing.progress(1.0, 10.0), 1.0);
    }

    #[test]
    fn test_overlap_threshold() {
        let timing = AnimationTiming::new(6.0, 2.0);
        assert!((timing.overlap_start_progress() - 2.0 / 3.0).abs() < 1e-6);
        let serial = AnimationTiming::new(1.0, 0.0);
        assert_eq!(serial.overlap_start_progress(), 1.0);
    }

    #[test]
    fn test_overlap_clamped_to_duration() {
        let timing = AnimationTiming::new(1.0, 5.0);
        assert_eq!(timing.overlap_sec(), 1.0);
        assert_eq!(timing.overlap_start_progress(), 0.0);

        let timing = AnimationTiming::new(1.0, -3.0);
        assert_eq!(timing.overlap_sec(), 0.0);
    }

    #[test]
    fn test_zero_duration_is_instant() {
        let timing = AnimationTiming::new(-1.0, 0.5);
        assert_eq!(timing.duration_sec(), 0.0);
        assert_eq!(timing.progress(3.0, 3.0), 1.0);
        assert_eq!(timing.admission_interval(), Duration::ZERO);
    }

    #[test]
    fn test_huge_duration_saturates_interval() {
        let timing = AnimationTiming::new(1e20, 0.0);
        assert_eq!(timing.admission_interval(), Duration::MAX);
        assert!(timing.progress(0.0, 1.0) < 1e-6);
    }

    #[test]
    fn test_progress_resolves_late_in_a_long_run() {
        // A week in, f32 seconds only resolve ~0.06 s.
        let timing = AnimationTiming::new(6.0, 2.0);
        let start = 604_800.0;
        let p = timing.progress(start, start + 0.01);
        assert!((p - 0.01 / 6.0).abs() < 1e-6);
    }
}
