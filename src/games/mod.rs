//! Game implementations.

pub mod simon;
