//! Timer-driven selection that keeps the pipeline full without input.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use web_time::{Duration, Instant};

use crate::animation::{AnimationTiming, Scheduler};
use crate::store::{InstanceId, RectangleState};

/// Shortest interval between two automatic selections.
const MIN_PERIOD: Duration = Duration::from_millis(100);

/// Periodically nominates an eligible instance and admits it to the
/// scheduler's queue.
///
/// The timer runs at the cadence the scheduler admits instances on its
/// own (`duration - overlap`, at least 100 ms), so a continuous stream of
/// instances stays in flight. Instances flagged important always win over
/// normal ones while any of them is still eligible.
#[derive(Debug)]
pub struct AutoSelector {
    rng: StdRng,
    enabled: bool,
    /// Set by [`stop`](Self::stop); a stopped selector never fires again.
    stopped: bool,
    max_queue_size: usize,
    max_selection_attempts: u32,
    /// Last firing (or re-arm). `None` until the first poll arms the timer.
    last_fire: Option<Instant>,
}

impl AutoSelector {
    /// Selector seeded from `seed`, or from the OS when `None`.
    pub fn new(
        max_queue_size: usize,
        max_selection_attempts: u32,
        seed: Option<u64>,
    ) -> Self {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            rng,
            enabled: true,
            stopped: false,
            max_queue_size,
            max_selection_attempts,
            last_fire: None,
        }
    }

    /// Timer period for the given timing.
    pub fn period(timing: &AnimationTiming) -> Duration {
        timing.admission_interval().max(MIN_PERIOD)
    }

    /// Whether the timer is running.
    pub fn is_enabled(&self) -> bool {
        self.enabled && !self.stopped
    }

    /// Pause or resume automatic selection. Resuming re-arms the timer.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled && !self.enabled {
            self.last_fire = None;
        }
        self.enabled = enabled;
    }

    /// Tear the timer down for good.
    pub fn stop(&mut self) {
        self.stopped = true;
        self.last_fire = None;
    }

    /// Update the back-pressure cap and draw budget.
    pub fn configure(&mut self, max_queue_size: usize, max_selection_attempts: u32) {
        self.max_queue_size = max_queue_size;
        self.max_selection_attempts = max_selection_attempts;
    }

    /// Replace the random source with a deterministic one.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Push the next firing a full period past `now`.
    pub fn notify_user_activity(&mut self, now: Instant) {
        if self.is_enabled() {
            self.last_fire = Some(now);
        }
    }

    /// Advance the timer; fires at most once per call.
    ///
    /// Returns the instance admitted by this firing, if any.
    pub fn poll(
        &mut self,
        scheduler: &mut Scheduler,
        now: Instant,
    ) -> Option<InstanceId> {
        if !self.is_enabled() {
            return None;
        }
        let last = *self.last_fire.get_or_insert(now);
        let period = Self::period(&scheduler.timing());
        if now.saturating_duration_since(last) < period {
            return None;
        }
        self.last_fire = Some(now);
        self.select(scheduler, now)
    }

    /// One selection round, independent of the timer.
    ///
    /// Skips when the queue is over its cap. Otherwise draws up to
    /// `max_selection_attempts` times from the important pool (or the
    /// normal pool when no important instance is eligible), re-checking
    /// each draw before handing it to the scheduler.
    pub fn select(
        &mut self,
        scheduler: &mut Scheduler,
        now: Instant,
    ) -> Option<InstanceId> {
        if scheduler.queue_len() > self.max_queue_size {
            log::debug!(
                "Auto-select skipped: queue length {} over cap {}",
                scheduler.queue_len(),
                self.max_queue_size
            );
            return None;
        }

        let (important, normal): (Vec<InstanceId>, Vec<InstanceId>) = {
            let store = scheduler.store();
            store
                .ids()
                .filter(|&id| store.state(id).is_some_and(RectangleState::is_selectable))
                .partition(|&id| store.is_important(id))
        };
        let pool = if important.is_empty() { &normal } else { &important };
        if pool.is_empty() {
            return None;
        }

        for _ in 0..self.max_selection_attempts {
            let &id = pool.choose(&mut self.rng)?;
            let eligible = scheduler
                .store()
                .state(id)
                .is_some_and(RectangleState::is_selectable);
            if eligible && scheduler.add_to_queue(id, now) {
                log::debug!(
                    "Auto-selected {id} ({})",
                    if scheduler.store().is_important(id) {
                        "important"
                    } else {
                        "normal"
                    }
                );
                return Some(id);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::store::{InstanceContent, InstanceStore};

    fn scheduler_with_important(
        important: Option<(u32, u32)>,
        cols: u32,
        duration: f32,
        overlap: f32,
    ) -> (Scheduler, Instant) {
        let content: Vec<_> = important
            .map(|(r, c)| InstanceContent::new("featured", true).at(r, c))
            .into_iter()
            .collect();
        let store = InstanceStore::new(1, cols, &content, Vec3::Z).unwrap();
        let t0 = Instant::now();
        let timing = AnimationTiming::new(duration, overlap);
        (Scheduler::with_epoch(store, timing, t0), t0)
    }

    #[test]
    fn test_important_pool_has_strict_priority() {
        for trial in 0..1000 {
            let (mut s, t0) = scheduler_with_important(Some((0, 2)), 4, 6.0, 2.0);
            let mut selector = AutoSelector::new(3, 6, Some(trial));
            assert_eq!(selector.select(&mut s, t0), Some(InstanceId(2)));
        }
    }

    #[test]
    fn test_falls_back_to_normal_pool() {
        let (mut s, t0) = scheduler_with_important(Some((0, 0)), 4, 6.0, 2.0);
        assert!(s.add_to_queue(InstanceId(0), t0));

        let mut selector = AutoSelector::new(3, 6, Some(7));
        let picked = selector.select(&mut s, t0).unwrap();
        assert_ne!(picked, InstanceId(0));
        assert_eq!(s.store().state(picked), Some(RectangleState::Queued));
    }

    #[test]
    fn test_normal_pool_is_covered() {
        let mut seen = [false; 3];
        for trial in 0..200 {
            let (mut s, t0) = scheduler_with_important(None, 3, 6.0, 2.0);
            let mut selector = AutoSelector::new(3, 6, Some(trial));
            let picked = selector.select(&mut s, t0).unwrap();
            seen[picked.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_back_pressure_skips_when_over_cap() {
        let (mut s, t0) = scheduler_with_important(None, 8, 6.0, 2.0);
        for raw in 0..5 {
            assert!(s.add_to_queue(InstanceId(raw), t0));
        }
        assert_eq!(s.queue_len(), 4);

        let mut selector = AutoSelector::new(3, 6, Some(1));
        assert_eq!(selector.select(&mut s, t0), None);
        assert_eq!(s.queue_len(), 4);

        selector.configure(4, 6);
        assert!(selector.select(&mut s, t0).is_some());
        assert_eq!(s.queue_len(), 5);
    }

    #[test]
    fn test_nothing_eligible() {
        let (mut s, t0) = scheduler_with_important(None, 1, 6.0, 2.0);
        assert!(s.add_to_queue(InstanceId(0), t0));
        let mut selector = AutoSelector::new(3, 6, Some(1));
        assert_eq!(selector.select(&mut s, t0), None);
    }

    #[test]
    fn test_poll_cadence() {
        let (mut s, t0) = scheduler_with_important(None, 8, 6.0, 2.0);
        let mut selector = AutoSelector::new(3, 6, Some(3));
        assert_eq!(AutoSelector::period(&s.timing()), Duration::from_secs(4));

        assert_eq!(selector.poll(&mut s, t0), None);
        assert_eq!(selector.poll(&mut s, t0 + Duration::from_millis(3900)), None);
        assert!(selector.poll(&mut s, t0 + Duration::from_secs(4)).is_some());
        assert_eq!(selector.poll(&mut s, t0 + Duration::from_secs(5)), None);
        assert!(selector.poll(&mut s, t0 + Duration::from_secs(8)).is_some());
    }

    #[test]
    fn test_period_floor() {
        let timing = AnimationTiming::new(1.0, 1.0);
        assert_eq!(AutoSelector::period(&timing), Duration::from_millis(100));
    }

    #[test]
    fn test_user_activity_rearms_timer() {
        let (mut s, t0) = scheduler_with_important(None, 8, 6.0, 2.0);
        let mut selector = AutoSelector::new(3, 6, Some(3));
        assert_eq!(selector.poll(&mut s, t0), None);

        selector.notify_user_activity(t0 + Duration::from_secs(3));
        assert_eq!(selector.poll(&mut s, t0 + Duration::from_secs(4)), None);
        assert!(selector.poll(&mut s, t0 + Duration::from_secs(7)).is_some());
    }

    #[test]
    fn test_stopped_and_disabled_never_fire() {
        let (mut s, t0) = scheduler_with_important(None, 8, 6.0, 2.0);
        let mut selector = AutoSelector::new(3, 6, Some(3));
        selector.set_enabled(false);
        assert_eq!(selector.poll(&mut s, t0 + Duration::from_secs(60)), None);

        selector.set_enabled(true);
        assert_eq!(selector.poll(&mut s, t0 + Duration::from_secs(60)), None);
        assert!(selector
            .poll(&mut s, t0 + Duration::from_secs(64))
            .is_some());

        selector.stop();
        selector.set_enabled(true);
        assert!(!selector.is_enabled());
        assert_eq!(selector.poll(&mut s, t0 + Duration::from_secs(600)), None);
    }
}
