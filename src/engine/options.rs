//! Options methods for GridEngine

use std::path::Path;

use web_time::Instant;

use super::{build_scheduler, GridEngine};
use crate::error::TilecastError;
use crate::input::InteractionLayer;
use crate::options::Options;

impl GridEngine {
    /// Replace options and apply all changes.
    ///
    /// Timing, target and auto-selection knobs apply live. A different
    /// grid shape or content set re-creates every instance; on error the
    /// engine keeps its current grid and options. The auto-selector is
    /// reseeded only when the seed itself changed.
    pub fn set_options(
        &mut self,
        new: Options,
        now: Instant,
    ) -> Result<(), TilecastError> {
        if self.options.requires_rebuild(&new) {
            self.rebuild(&new, now)?;
        }
        let seed_changed = self.options.selection.seed != new.selection.seed;
        self.options = new;
        self.apply_options(now);
        let seed = self.options.selection.seed;
        if let Some(seed) = seed.filter(|_| seed_changed) {
            self.selector.reseed(seed);
        }
        Ok(())
    }

    /// Push current option values to the scheduler and auto-selector.
    pub fn apply_options(&mut self, now: Instant) {
        self.apply_timing(now);
        self.scheduler
            .set_target_position(self.options.target.to_vec3());
        self.apply_selection();
    }

    /// Push timing to the scheduler, storing the clamped values back.
    pub(super) fn apply_timing(&mut self, now: Instant) {
        let timing = self.options.timing.to_timing();
        self.scheduler.update_timing(
            timing.duration_sec(),
            timing.overlap_sec(),
            now,
        );
        self.options.timing.animation_duration_sec = timing.duration_sec();
        self.options.timing.overlap_duration_sec = timing.overlap_sec();
    }

    fn apply_selection(&mut self) {
        let sel = &self.options.selection;
        self.selector
            .configure(sel.max_queue_size, sel.max_selection_attempts);
        self.selector.set_enabled(sel.enabled);
    }

    /// Swap in a fresh grid built from `options`, keeping the epoch and
    /// the reached-target subscriber.
    fn rebuild(
        &mut self,
        options: &Options,
        now: Instant,
    ) -> Result<(), TilecastError> {
        let mut scheduler = build_scheduler(options, self.scheduler.epoch())?;
        self.interaction.release(&mut self.scheduler, now);
        self.interaction = InteractionLayer::new();
        scheduler.restore_on_reached_target(
            self.scheduler.take_on_reached_target(),
        );
        self.scheduler = scheduler;
        log::info!(
            "Grid rebuilt: {}x{} instances",
            options.grid.rows,
            options.grid.cols
        );
        Ok(())
    }

    /// Load a named preset (`<dir>/<name>.toml`) and apply it.
    pub fn load_preset(
        &mut self,
        dir: &Path,
        name: &str,
        now: Instant,
    ) -> Result<(), TilecastError> {
        let path = dir.join(format!("{name}.toml"));
        let options = Options::load(&path)?;
        self.set_options(options, now)?;
        log::info!("Loaded preset '{name}'");
        Ok(())
    }

    /// Save the current options as a named preset.
    pub fn save_preset(
        &self,
        dir: &Path,
        name: &str,
    ) -> Result<(), TilecastError> {
        self.options.save(&dir.join(format!("{name}.toml")))
    }
}
