pub mod airport;
pub mod catalog;
pub mod flight_state;
pub mod profile;
