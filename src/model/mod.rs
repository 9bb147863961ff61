//! Per-frame weight data and the network shape derived from it.

pub mod snapshot;
