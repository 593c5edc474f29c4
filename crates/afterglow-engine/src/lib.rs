//! Afterglow engine crate.
//!
//! This crate owns the platform + GPU runtime pieces and the post-processing
//! compositor core: the render-target ring, the effect chain scheduler, the
//! per-frame parameter feed and the wgpu draw backend.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod camera;
pub mod fx;
pub mod render;
