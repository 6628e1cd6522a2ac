//! Runtime support: client construction, async side effects, terminal
//! state management.

pub mod client;
pub mod side_effects;
pub mod terminal;
