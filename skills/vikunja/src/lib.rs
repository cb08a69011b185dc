//! # skill-vikunja
//!
//! Thin Vikunja REST wrappers behind the `vikunja` binary. Every command
//! prints one line of compact JSON on stdout so the output can be piped
//! straight into other tooling; errors land on stderr as
//! `{"error": "..."}`.

pub mod client;
pub mod label;
pub mod output;
pub mod project;
pub mod task;
