//! AWS Organizations integration for the organization tree resolver.
//!
//! This crate owns the SDK wiring: a directory adapter over
//! `aws-sdk-organizations` and the `org_accounts` CLI binary. Tree semantics
//! live in `org_tree_core`.

pub mod adapters;
