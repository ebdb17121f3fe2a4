//! Core types shared across snapmatch crates
//!
//! This crate provides foundational types used by the matching engine,
//! the storage stages and the logging facility:
//!
//! - **Identity**: `SnapshotIdentity`, the name/directory/group triple a
//!   test context provider hands to the engine
//! - **Schema constants**: Canonical field keys and event names
//! - **Environment**: Names of the environment toggles and default locations

pub mod env;
pub mod identity;
pub mod schema;

pub use identity::SnapshotIdentity;
