//! Platform event loop ownership.

mod runtime;

pub use runtime::Runtime;
