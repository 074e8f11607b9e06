//! Infrastructure - port definitions and their adapters.

pub mod clock;
pub mod memory;
pub mod ports;
pub mod settings;
