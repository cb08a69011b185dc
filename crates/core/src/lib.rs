//! # sk-core
//!
//! Skill discovery, build, deploy, and scaffolding for skill-kit.
//!
//! This crate provides:
//! - Manifest discovery from the `skills/` directory
//! - Persisted user settings under `~/.skill-kit/`
//! - A builder abstraction that streams `cargo build` output
//! - The deploy step that installs a skill into its target directory
//! - The session task driving the build-then-deploy pipeline
//! - Scaffolding for new skills from embedded templates
//!
//! ## Modules
//!
//! - [`skill`]: Manifest loading and discovery
//! - [`config`]: User settings persistence
//! - [`workspace`]: Project root resolution
//! - [`build`]: Builder trait and cargo implementation
//! - [`deploy`]: Deploy step
//! - [`session`]: Op/Event loop between TUI and core
//! - [`scaffold`]: New-skill generation

pub mod build;
pub mod config;
pub mod deploy;
pub mod scaffold;
pub mod session;
pub mod skill;
pub mod workspace;
