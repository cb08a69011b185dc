//! # sk-protocol
//!
//! Shared data models for skill-kit.
//!
//! This crate defines all structures used for:
//! - Manifest file parsing (`skills/*/skill.yaml`)
//! - Persisted user settings (`~/.skill-kit/config.json`)
//! - Communication between the wizard TUI and the Core
//!
//! ## Modules
//!
//! - [`manifest`]: Skill manifest structures
//! - [`settings`]: Persisted user settings
//! - [`ipc`]: Operations and Events for Core-TUI communication
//! - [`report`]: Deploy result summaries
//!
//! ## Design Principles
//!
//! - Minimal dependencies: only serde and chrono
//! - Independent compilation: no dependencies on other skill-kit crates

pub mod ipc;
pub mod manifest;
pub mod report;
pub mod settings;

// Re-export all public types for convenience
pub use ipc::*;
pub use manifest::*;
pub use report::*;
pub use settings::*;
