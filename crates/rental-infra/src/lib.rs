//! Infrastructure layer
//!
//! Concrete implementations of the domain repository traits backed by
//! plain comma-delimited text files.

pub mod persistence;
