//! Control algorithms.

pub mod step_table;
