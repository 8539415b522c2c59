//! Command implementations.

pub mod catalog;
pub mod order;
pub mod report;
pub mod roll;
