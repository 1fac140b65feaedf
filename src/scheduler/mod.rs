pub mod commands;
pub mod events;
pub mod phase_tracker;
pub mod session;
