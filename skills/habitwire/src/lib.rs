//! # skill-habitwire
//!
//! Thin HabitWire REST wrappers behind the `habitwire` binary: API key
//! management, a health check, and data export. Results print as one line
//! of compact JSON on stdout; errors land on stderr as `{"error": "..."}`.

pub mod client;
pub mod key;
pub mod output;
pub mod system;
