//! Shared data types for order placement.

pub mod enums;
pub mod order;
