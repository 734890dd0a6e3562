// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Tests unwrap freely
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Interactive grid animation scheduler.
//!
//! Tilecast manages a fixed grid of independently animatable instances.
//! Each instance can be hovered, queued and sent to a shared target, and
//! consecutive animations deliberately overlap so a continuous stream of
//! instances is always in flight.
//!
//! # Key entry points
//!
//! - [`engine::GridEngine`] - composition root: per-frame tick, pointer
//!   input, commands, options
//! - [`animation::Scheduler`] - state machine, pending queue and overlap
//!   pipelining
//! - [`store::InstanceStore`] - flat per-instance columns with dirty
//!   tracking for the rendering collaborator
//! - [`selection::AutoSelector`] - keeps the pipeline fed when nobody
//!   clicks
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Everything runs on the host's single thread. Pointer handlers feed the
//! [`input::InteractionLayer`], which resolves positions through a
//! [`picking::HitTest`] and asks the scheduler for hover and queue
//! transitions. The per-frame tick recomputes progress from wall-clock
//! start times, so dropped frames or a backgrounded tab never
//! desynchronize animations from elapsed time.

pub mod animation;
pub mod engine;
pub mod error;
pub mod input;
pub mod options;
pub mod picking;
pub mod selection;
pub mod store;
