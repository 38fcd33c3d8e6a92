//! Organization tree domain primitives.
//!
//! This crate owns the in-memory organization model: account and unit
//! records, the directory-service capability trait, and the resolver's
//! path-lookup and enumeration behavior. It intentionally excludes AWS SDK
//! and runtime concerns; see `crates/org_tree_aws` for the API wiring.

pub mod directory;
pub mod tree;
