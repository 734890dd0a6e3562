//! The engine's programmatic vocabulary.
//!
//! Everything a host can ask of the grid outside pointer input (GUI
//! panels, scripted demos, remote control) is a `GridCommand`, passed to
//! [`GridEngine::execute`].

use glam::Vec3;
use web_time::Instant;

use super::GridEngine;
use crate::store::{GridCoord, InstanceId};

/// One programmatic request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridCommand {
    /// Admit an instance, as if it had been clicked.
    QueueInstance(InstanceId),
    /// Admit the instance at a grid cell.
    QueueCell(GridCoord),
    /// Retime every current and future animation.
    SetTiming {
        /// Seconds per animation.
        duration_sec: f32,
        /// Overlap seconds, clamped to `[0, duration_sec]`.
        overlap_sec: f32,
    },
    /// Move the shared target.
    SetTarget(Vec3),
    /// Pause or resume the auto-selector.
    SetAutoSelect(bool),
}

impl GridEngine {
    /// Execute a command. Returns `false` when it was rejected (e.g. the
    /// instance is no longer interactable).
    pub fn execute(&mut self, command: GridCommand, now: Instant) -> bool {
        match command {
            GridCommand::QueueInstance(id) => {
                self.scheduler.add_to_queue(id, now)
            }
            GridCommand::QueueCell(coord) => self
                .store()
                .id_at(coord)
                .is_some_and(|id| self.scheduler.add_to_queue(id, now)),
            GridCommand::SetTiming {
                duration_sec,
                overlap_sec,
            } => {
                self.options.timing.animation_duration_sec = duration_sec;
                self.options.timing.overlap_duration_sec = overlap_sec;
                self.apply_timing(now);
                true
            }
            GridCommand::SetTarget(target) => {
                self.options.target.position = target.to_array();
                self.scheduler.set_target_position(target);
                true
            }
            GridCommand::SetAutoSelect(enabled) => {
                self.options.selection.enabled = enabled;
                self.selector.set_enabled(enabled);
                true
            }
        }
    }
}
