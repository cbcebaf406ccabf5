//! Glint engine crate.
//!
//! This crate owns the two pieces shared by the demo drivers: the
//! window + GPU session and the render resource set (shader program +
//! geometry binding) drawn with it.

pub mod core;
pub mod logging;
pub mod render;
pub mod session;
pub mod time;
pub mod window;
