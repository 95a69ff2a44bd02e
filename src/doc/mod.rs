//! Standalone documentation pages.

pub mod crate_feature_flags;
