//! Elevator Simulation Library
//!
//! A discrete-event simulator for comparing group elevator dispatch strategies.

pub mod simulation;
