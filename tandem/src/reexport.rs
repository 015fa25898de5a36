//! Crates used by this crate's macros

pub use inventory;
