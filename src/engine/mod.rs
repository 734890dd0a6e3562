//! The grid engine: one owner for the scheduler, interaction layer and
//! auto-selector.
//!
//! Hosts drive it from three places, mirroring the cooperative model the
//! scheduler assumes: [`GridEngine::tick`] once per rendered frame,
//! [`GridEngine::handle_input`] from pointer event handlers, and
//! [`GridEngine::execute`] for programmatic control. Nothing here blocks
//! or spawns threads.

mod animation;
mod command;
mod input;
mod options;

pub use command::GridCommand;
use web_time::Instant;

use crate::animation::{ReachedTarget, Scheduler};
use crate::error::TilecastError;
use crate::input::{CursorIcon, InteractionLayer};
use crate::options::Options;
use crate::selection::AutoSelector;
use crate::store::{DirtyFlags, InstanceId, InstanceStore};

/// Grid animation engine.
pub struct GridEngine {
    scheduler: Scheduler,
    interaction: InteractionLayer,
    selector: AutoSelector,
    options: Options,
}

impl GridEngine {
    /// Build a grid from `options`, clock starting now.
    pub fn new(options: Options) -> Result<Self, TilecastError> {
        Self::with_epoch(options, Instant::now())
    }

    /// Build a grid with an explicit clock origin.
    pub fn with_epoch(
        options: Options,
        epoch: Instant,
    ) -> Result<Self, TilecastError> {
        let scheduler = build_scheduler(&options, epoch)?;
        let sel = &options.selection;
        let mut selector = AutoSelector::new(
            sel.max_queue_size,
            sel.max_selection_attempts,
            sel.seed,
        );
        selector.set_enabled(sel.enabled);

        log::info!(
            "Grid engine ready: {}x{} instances, {:.1}s animations, \
             {:.1}s overlap",
            options.grid.rows,
            options.grid.cols,
            scheduler.timing().duration_sec(),
            scheduler.timing().overlap_sec(),
        );

        Ok(Self {
            scheduler,
            interaction: InteractionLayer::new(),
            selector,
            options,
        })
    }

    /// The state machine and queue.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Per-instance columns.
    pub fn store(&self) -> &InstanceStore {
        self.scheduler.store()
    }

    /// Options as last applied.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Cursor affordance for the host.
    pub fn cursor(&self) -> CursorIcon {
        self.interaction.cursor()
    }

    /// Instance under the pointer, if interactable.
    pub fn hovered(&self) -> Option<InstanceId> {
        self.interaction.hovered()
    }

    /// Whether the auto-selector timer is running.
    pub fn auto_select_enabled(&self) -> bool {
        self.selector.is_enabled()
    }

    /// Columns changed since the last call; clears the set.
    pub fn take_dirty(&mut self) -> DirtyFlags {
        self.scheduler.take_dirty()
    }

    /// Install the reached-target subscriber.
    pub fn set_on_reached_target(
        &mut self,
        hook: impl FnMut(&ReachedTarget<'_>) + 'static,
    ) {
        self.scheduler.set_on_reached_target(hook);
    }

    /// Stop the timer, drop hover and the subscriber.
    ///
    /// In-flight animations keep advancing if the host keeps ticking;
    /// nothing is cancelled.
    pub fn shutdown(&mut self, now: Instant) {
        self.selector.stop();
        self.interaction.release(&mut self.scheduler, now);
        self.scheduler.clear_on_reached_target();
        log::info!(
            "Grid engine shut down with {} of {} instances at target",
            self.scheduler.at_target_count(),
            self.scheduler.store().len()
        );
    }
}

impl std::fmt::Debug for GridEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridEngine")
            .field("scheduler", &self.scheduler)
            .field("hovered", &self.interaction.hovered())
            .field("auto_select", &self.selector.is_enabled())
            .finish_non_exhaustive()
    }
}

fn build_scheduler(
    options: &Options,
    epoch: Instant,
) -> Result<Scheduler, TilecastError> {
    let store = InstanceStore::new(
        options.grid.rows,
        options.grid.cols,
        &options.content,
        options.target.to_vec3(),
    )?;
    Ok(Scheduler::with_epoch(store, options.timing.to_timing(), epoch))
}
