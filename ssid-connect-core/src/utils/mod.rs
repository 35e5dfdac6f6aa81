//! Utility functions

pub mod id;
