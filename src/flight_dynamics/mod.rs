pub mod aerodynamics;
pub mod atmosphere;
pub mod flight_phase;
pub mod integrator;
pub mod kinematics;
pub mod propulsion;
