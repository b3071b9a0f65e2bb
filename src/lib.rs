//! Beadsmith - fuse bead patterns from images
//!
//! Turns a photo or generated image into a labelled bead grid, a rendered
//! pattern PNG and a bill of materials.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
