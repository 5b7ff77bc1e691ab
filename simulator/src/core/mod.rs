//! Core abstractions: simulation time

pub mod time;
