//! Instance state machine and overlap-pipelined animation scheduling.

mod queue;
mod scheduler;
mod timing;

pub use queue::PendingQueue;
pub use scheduler::{ReachedTarget, ReachedTargetHook, Scheduler};
pub use timing::AnimationTiming;
