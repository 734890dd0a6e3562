//! Automatic instance selection in the absence of user input.

mod auto_selector;

pub use auto_selector::AutoSelector;
