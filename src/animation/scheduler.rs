//! State machine and overlap-pipelined queue scheduler.

use glam::Vec3;
use web_time::Instant;

use super::queue::PendingQueue;
use super::timing::AnimationTiming;
use crate::store::{
    DirtyFlags, GridCoord, InstanceId, InstanceStore, RectangleState,
};

/// Payload of the reached-target notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReachedTarget<'a> {
    /// Instance that arrived.
    pub id: InstanceId,
    /// Its grid cell.
    pub coord: GridCoord,
    /// Content label attached to the cell.
    pub label: &'a str,
    /// Whether the content is flagged important.
    pub important: bool,
}

/// Single subscriber invoked once per instance reaching `AtTarget`.
pub type ReachedTargetHook = Box<dyn FnMut(&ReachedTarget<'_>)>;

/// Owns instance lifecycle state, the pending queue and overlap timing.
///
/// All mutation happens synchronously inside the host's input handlers,
/// timer callbacks or per-frame [`update_animations`](Self::update_animations)
/// call. Illegal requests are ignored and reported as `false`.
///
/// Several instances may be `Animating` at once: the next queued instance
/// starts as soon as the most recently started one crosses
/// [`AnimationTiming::overlap_start_progress`].
pub struct Scheduler {
    store: InstanceStore,
    queue: PendingQueue,
    timing: AnimationTiming,
    /// Origin for the `f32` second columns.
    epoch: Instant,
    /// Authoritative start offsets from `epoch`. The store's `f32` column
    /// mirrors these for the renderer but loses precision on long runs.
    anim_start: Vec<f64>,
    /// Latest instance to enter `Animating`; re-derived by scan when stale.
    most_recent: Option<InstanceId>,
    on_reached_target: Option<ReachedTargetHook>,
}

impl Scheduler {
    /// Scheduler whose clock starts now.
    pub fn new(store: InstanceStore, timing: AnimationTiming) -> Self {
        Self::with_epoch(store, timing, Instant::now())
    }

    /// Scheduler with an explicit clock origin (simulation, tests).
    pub fn with_epoch(
        store: InstanceStore,
        timing: AnimationTiming,
        epoch: Instant,
    ) -> Self {
        Self {
            anim_start: vec![0.0; store.len()],
            store,
            queue: PendingQueue::new(),
            timing,
            epoch,
            most_recent: None,
            on_reached_target: None,
        }
    }

    /// Read-only view of the instance columns.
    pub fn store(&self) -> &InstanceStore {
        &self.store
    }

    /// Current duration/overlap.
    pub fn timing(&self) -> AnimationTiming {
        self.timing
    }

    /// Clock origin of the second columns.
    pub fn epoch(&self) -> Instant {
        self.epoch
    }

    /// Seconds since epoch, as stored in the columns.
    pub fn seconds(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.epoch).as_secs_f32()
    }

    fn precise_seconds(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.epoch).as_secs_f64()
    }

    fn start_secs(&self, id: InstanceId) -> Option<f64> {
        self.anim_start.get(id.index()).copied()
    }

    /// Columns changed since the last call; clears the set.
    pub fn take_dirty(&mut self) -> DirtyFlags {
        self.store.take_dirty()
    }

    /// Install the reached-target subscriber, replacing any previous one.
    pub fn set_on_reached_target(
        &mut self,
        hook: impl FnMut(&ReachedTarget<'_>) + 'static,
    ) {
        self.on_reached_target = Some(Box::new(hook));
    }

    /// Drop the reached-target subscriber.
    pub fn clear_on_reached_target(&mut self) {
        self.on_reached_target = None;
    }

    /// Move the subscriber out, e.g. to carry it over to a rebuilt grid.
    pub(crate) fn take_on_reached_target(
        &mut self,
    ) -> Option<ReachedTargetHook> {
        self.on_reached_target.take()
    }

    pub(crate) fn restore_on_reached_target(
        &mut self,
        hook: Option<ReachedTargetHook>,
    ) {
        self.on_reached_target = hook;
    }

    // ── Queries ──

    /// Whether hover/queue operations may touch `id`.
    pub fn can_interact(&self, id: InstanceId) -> bool {
        self.store
            .state(id)
            .is_some_and(RectangleState::is_interactable)
    }

    /// Number of instances waiting.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Waiting instances, head first.
    pub fn queued_ids(&self) -> Vec<InstanceId> {
        self.queue.iter().map(|(_, id)| id).collect()
    }

    /// Instances currently in flight.
    pub fn animating_count(&self) -> usize {
        self.count_in(RectangleState::Animating)
    }

    /// Instances that have arrived.
    pub fn at_target_count(&self) -> usize {
        self.count_in(RectangleState::AtTarget)
    }

    /// Whether anything is in flight or waiting.
    pub fn is_busy(&self) -> bool {
        !self.queue.is_empty() || self.any_animating()
    }

    /// Progress at which the next queued instance is admitted.
    pub fn overlap_start_progress(&self) -> f32 {
        self.timing.overlap_start_progress()
    }

    /// The most recently started instance still animating.
    ///
    /// Falls back to a scan for the latest `animStartTime` when the cached
    /// id is stale.
    pub fn most_recent_animating(&self) -> Option<InstanceId> {
        self.most_recent
            .filter(|&id| self.is_animating(id))
            .or_else(|| self.scan_most_recent())
    }

    fn count_in(&self, state: RectangleState) -> usize {
        self.store.states().iter().filter(|&&s| s == state).count()
    }

    fn is_animating(&self, id: InstanceId) -> bool {
        self.store.state(id) == Some(RectangleState::Animating)
    }

    fn any_animating(&self) -> bool {
        self.store.states().contains(&RectangleState::Animating)
    }

    fn scan_most_recent(&self) -> Option<InstanceId> {
        self.store
            .ids()
            .filter(|&id| self.is_animating(id))
            .max_by(|&a, &b| {
                let ta = self.start_secs(a).unwrap_or(0.0);
                let tb = self.start_secs(b).unwrap_or(0.0);
                ta.total_cmp(&tb)
            })
    }

    /// Refresh the cached most-recent pointer, logging when it had to be
    /// rebuilt from a scan.
    fn resolve_most_recent(&mut self) -> Option<InstanceId> {
        if let Some(id) = self.most_recent.filter(|&id| self.is_animating(id)) {
            return Some(id);
        }
        let recovered = self.scan_most_recent();
        if let Some(id) = recovered {
            log::warn!(
                "Most recent animation pointer stale ({:?}); recovered {id}",
                self.most_recent
            );
        }
        self.most_recent = recovered;
        recovered
    }

    // ── Hover (driven by the interaction layer) ──

    /// Set the hover flag on `id` and upgrade `Idle -> Hovered`.
    ///
    /// No-op unless `id` is interactable. Returns `true` if anything changed.
    pub fn hover_gained(&mut self, id: InstanceId, now: Instant) -> bool {
        let Some(state) = self.store.state(id) else {
            return false;
        };
        if !state.is_interactable() {
            return false;
        }
        if self.store.is_hovered(id) && state != RectangleState::Idle {
            return false;
        }

        self.store.set_hover(id, true);
        if state == RectangleState::Idle {
            self.store.set_state(id, RectangleState::Hovered);
        }
        self.store.set_timestamp(id, self.seconds(now));
        true
    }

    /// Clear the hover flag on `id`, downgrading `Hovered -> Idle`.
    ///
    /// Other states keep their state; only the flag drops. Returns `true`
    /// if anything changed.
    pub fn hover_lost(&mut self, id: InstanceId, now: Instant) -> bool {
        let Some(state) = self.store.state(id) else {
            return false;
        };
        let was_hovered = self.store.is_hovered(id);
        if !was_hovered && state != RectangleState::Hovered {
            return false;
        }

        if was_hovered {
            self.store.set_hover(id, false);
        }
        if state == RectangleState::Hovered {
            self.store.set_state(id, RectangleState::Idle);
        }
        self.store.set_timestamp(id, self.seconds(now));
        true
    }

    // ── Admission ──

    /// Admit `id` to the pipeline.
    ///
    /// Starts it immediately when nothing is animating or waiting;
    /// otherwise appends it to the queue. Returns `false` (and changes
    /// nothing) if `id` is not interactable or already queued.
    pub fn add_to_queue(&mut self, id: InstanceId, now: Instant) -> bool {
        let Some(state) = self.store.state(id) else {
            return false;
        };
        if !state.is_interactable() || state == RectangleState::Queued {
            log::debug!("Rejected queue request for {id} in {state:?}");
            return false;
        }

        if self.queue.is_empty() && !self.any_animating() {
            return self.start_instance_animation(id, now);
        }

        let position = self.queue.push_back(id);
        self.store.set_state(id, RectangleState::Queued);
        self.store.set_queue_position(id, Some(position));
        self.store.set_timestamp(id, self.seconds(now));
        log::debug!("Queued {id} at position {position}");
        true
    }

    /// Put `id` in flight right now, regardless of what else is animating.
    ///
    /// Valid from `Idle`, `Hovered` or `Queued`. A queued instance is
    /// pulled out of the queue. Returns `false` for any other state.
    pub fn start_instance_animation(
        &mut self,
        id: InstanceId,
        now: Instant,
    ) -> bool {
        let Some(state) = self.store.state(id) else {
            return false;
        };
        if !state.is_interactable() {
            return false;
        }

        if state == RectangleState::Queued && self.queue.remove(id) {
            self.renumber_queue();
        }

        let now_secs = self.seconds(now);
        self.anim_start[id.index()] = self.precise_seconds(now);
        self.store.set_state(id, RectangleState::Animating);
        self.store.set_animation_progress(id, 0.0);
        self.store.set_anim_start_time(id, now_secs);
        self.store.set_timestamp(id, now_secs);
        self.store.set_queue_position(id, None);
        self.most_recent = Some(id);
        log::debug!("Started {id} at {now_secs:.3}s");
        true
    }

    /// Rewrite every queued instance's position to its current index.
    fn renumber_queue(&mut self) {
        for (position, id) in self.queue.iter() {
            self.store.set_queue_position(id, Some(position));
        }
    }

    // ── Per-frame tick ──

    /// Advance every in-flight instance, fire the reached-target hook for
    /// arrivals, then admit from the queue.
    ///
    /// Returns `true` while anything is still animating or waiting.
    pub fn update_animations(&mut self, now: Instant) -> bool {
        let now_secs = self.seconds(now);
        let precise_now = self.precise_seconds(now);
        let mut reached = Vec::new();

        for id in self.store.ids() {
            if !self.is_animating(id) {
                continue;
            }
            let start = self.start_secs(id).unwrap_or(precise_now);
            let progress = self.timing.progress(start, precise_now);
            self.store.set_animation_progress(id, progress);

            if progress >= 1.0 {
                self.store.set_state(id, RectangleState::AtTarget);
                self.store.set_timestamp(id, now_secs);
                reached.push(id);
            }
        }

        if !reached.is_empty() {
            self.notify_reached(&reached);
        }

        let _ = self.process_queue(now);
        self.is_busy()
    }

    fn notify_reached(&mut self, reached: &[InstanceId]) {
        for &id in reached {
            log::debug!("{id} reached target");
        }
        let Some(hook) = self.on_reached_target.as_mut() else {
            return;
        };
        for &id in reached {
            let Some(coord) = self.store.coord(id) else {
                continue;
            };
            hook(&ReachedTarget {
                id,
                coord,
                label: self.store.label(id),
                important: self.store.is_important(id),
            });
        }
    }

    /// Pipelining policy: start the queue head when nothing is animating,
    /// or once the most recently started animation crosses the overlap
    /// threshold.
    ///
    /// Returns the instance started, if any.
    pub fn process_queue(&mut self, now: Instant) -> Option<InstanceId> {
        if self.queue.is_empty() {
            return None;
        }

        if let Some(head) = self.resolve_most_recent() {
            let start = self.start_secs(head)?;
            let progress =
                self.timing.progress(start, self.precise_seconds(now));
            if progress < self.timing.overlap_start_progress() {
                return None;
            }
        }

        self.start_next(now)
    }

    /// Pop the queue until one instance starts.
    fn start_next(&mut self, now: Instant) -> Option<InstanceId> {
        while let Some(id) = self.queue.pop_front() {
            self.renumber_queue();
            if self.store.state(id) == Some(RectangleState::Queued) {
                let _ = self.start_instance_animation(id, now);
                return Some(id);
            }
            log::warn!(
                "Dropping {id} from queue head in state {:?}",
                self.store.state(id)
            );
            self.store.set_queue_position(id, None);
        }
        None
    }

    // ── Live configuration ──

    /// Change duration and overlap for every current and future animation.
    ///
    /// In-flight instances keep their current progress: their start time
    /// is rebased onto the new duration.
    pub fn update_timing(
        &mut self,
        duration_sec: f32,
        overlap_sec: f32,
        now: Instant,
    ) {
        let old = self.timing;
        let new = AnimationTiming::new(duration_sec, overlap_sec);
        if old == new {
            return;
        }

        let now_secs = self.precise_seconds(now);
        for id in self.store.ids() {
            if !self.is_animating(id) {
                continue;
            }
            let start = self.start_secs(id).unwrap_or(now_secs);
            let progress = old.progress(start, now_secs);
            let rebased =
                now_secs - f64::from(progress) * f64::from(new.duration_sec());
            self.anim_start[id.index()] = rebased;
            self.store.set_anim_start_time(id, rebased as f32);
        }

        self.timing = new;
        log::info!(
            "Animation timing set to {:.2}s with {:.2}s overlap",
            new.duration_sec(),
            new.overlap_sec()
        );
    }

    /// Retarget every instance to `target`.
    pub fn set_target_position(&mut self, target: Vec3) {
        self.store.set_all_targets(target);
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("instances", &self.store.len())
            .field("queued", &self.queue.len())
            .field("timing", &self.timing)
            .field("most_recent", &self.most_recent)
            .field("has_hook", &self.on_reached_target.is_some())
            .finish_non_exhaustive()
    }
}
