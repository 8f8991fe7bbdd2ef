//! Deterministic repository blueprint compiler.
//!
//! Turns a declarative repository configuration into a resolved set of
//! feature packs, automation and governance profiles, an ordered bootstrap
//! change plan, and target-specific publish actions. The compiler core is
//! pure: the same configuration always yields byte-identical output.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: the configuration model, file loading, preset bundles
//! - **[`packs`]**: the pack catalog and capability-ownership resolver
//! - **[`engine`]**: normalization, profiles, manifest, change plan
//! - **[`renderer`]** and **[`publisher`]**: artifacts and publish actions
//! - **[`simulation`]**: simulated log output and timed playback
//! - **[`commands`]**: top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod packs;
pub mod publisher;
pub mod renderer;
pub mod simulation;
