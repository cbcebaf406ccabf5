//! Render resource set: one shader program plus one geometry binding,
//! built once and drawn many times.
//!
//! Construction is fallible and diagnostic-preserving: shader compilation and
//! program linking run under validation error scopes and surface the
//! backend's log on failure; vertex layouts are validated before any upload.

mod ctx;
mod error;
mod geometry;
mod program;
mod set;
mod stage;

pub use ctx::RenderCtx;
pub use error::{DrawError, LayoutError, RenderSetError, ShaderCompileError, ShaderLinkError};
pub use geometry::{ComponentType, GeometryBinding, VertexAttribute, VertexLayout};
pub use program::{PrimitiveKind, ShaderProgram};
pub use set::RenderSet;
pub use stage::{ShaderStage, ShaderStageKind};
