//! Window + GPU session management.
//!
//! This module is responsible for:
//! - creating the platform window and the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames, presenting them, and tracking the drawable size
//! - the session's close-requested flag

mod config;
mod error;
mod gpu;
mod session;

pub use config::SessionConfig;
pub use error::SessionError;
pub use gpu::{Gpu, GpuFrame, SurfaceErrorAction};
pub use session::Session;
