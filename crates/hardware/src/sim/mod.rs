//! Simulation utilities and input loading.
//!
//! Provides utilities for loading memory images and access traces into the simulator.

/// Image and trace loaders.
pub mod loader;
