//! System Components.
//!
//! This module organizes the components that make up the simulated machine:
//! the backing store and the builder that assembles it with the cache.

/// System builder and top-level `System` type.
pub mod builder;

/// Backing store (flat RAM).
pub mod memory;

pub use builder::System;
