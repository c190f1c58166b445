//! Command line interface of the tracker binary.
pub mod cli;
