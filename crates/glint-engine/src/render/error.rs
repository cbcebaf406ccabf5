use std::fmt;

use super::geometry::ComponentType;
use super::stage::ShaderStageKind;

/// A shader stage failed to compile.
///
/// Carries the backend's diagnostic log; a stage that fails to compile never
/// yields a usable handle. Recovery means re-authoring the source and
/// compiling a fresh stage.
#[derive(Debug, Clone)]
pub struct ShaderCompileError {
    /// The stage that failed.
    pub stage: ShaderStageKind,
    /// Backend diagnostic log.
    pub log: String,
}

impl fmt::Display for ShaderCompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} shader failed to compile:\n{}", self.stage, self.log)
    }
}

impl std::error::Error for ShaderCompileError {}

/// A shader program failed to link.
///
/// Terminal for that program; the same stage pair cannot be retried — link a
/// fresh program from freshly compiled stages.
#[derive(Debug, Clone)]
pub struct ShaderLinkError {
    /// Backend diagnostic log.
    pub log: String,
}

impl fmt::Display for ShaderLinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shader program failed to link:\n{}", self.log)
    }
}

impl std::error::Error for ShaderLinkError {}

/// A vertex layout was rejected at construction.
///
/// No out-of-bounds or overlapping attribute range is ever accepted silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The per-vertex stride is zero.
    ZeroStride,

    /// The layout has no attributes.
    NoAttributes,

    /// Two attributes use the same slot index.
    DuplicateSlot { slot: u32 },

    /// The component type/count/normalize combination has no backend vertex
    /// format (e.g. three-component 8-bit attributes, normalized floats).
    UnsupportedFormat {
        slot: u32,
        component: ComponentType,
        components: u32,
        normalize: bool,
    },

    /// An attribute's byte range `[offset, end)` exceeds `[0, stride)`.
    OutOfBounds { slot: u32, end: u64, stride: u64 },

    /// Two attributes' byte ranges overlap.
    Overlap { slot_a: u32, slot_b: u32 },

    /// The vertex data length is not a positive whole multiple of the stride.
    DataLength { len: u64, stride: u64 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::ZeroStride => write!(f, "vertex layout stride is zero"),
            LayoutError::NoAttributes => write!(f, "vertex layout has no attributes"),
            LayoutError::DuplicateSlot { slot } => {
                write!(f, "attribute slot {slot} is used more than once")
            }
            LayoutError::UnsupportedFormat {
                slot,
                component,
                components,
                normalize,
            } => write!(
                f,
                "attribute slot {slot}: no vertex format for {components}x {component:?} (normalize: {normalize})"
            ),
            LayoutError::OutOfBounds { slot, end, stride } => write!(
                f,
                "attribute slot {slot} ends at byte {end}, beyond the stride of {stride}"
            ),
            LayoutError::Overlap { slot_a, slot_b } => {
                write!(f, "attribute slots {slot_a} and {slot_b} overlap")
            }
            LayoutError::DataLength { len, stride } => write!(
                f,
                "vertex data length {len} is not a positive multiple of the stride {stride}"
            ),
        }
    }
}

impl std::error::Error for LayoutError {}

/// A draw call was rejected.
#[derive(Debug, Clone)]
pub enum DrawError {
    /// The binding's layout does not match the program's vertex interface.
    LayoutMismatch,

    /// Lazily specializing a pipeline for the requested primitive kind failed.
    Link(ShaderLinkError),
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::LayoutMismatch => {
                write!(f, "geometry binding layout does not match the program")
            }
            DrawError::Link(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DrawError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DrawError::LayoutMismatch => None,
            DrawError::Link(e) => Some(e),
        }
    }
}

impl From<ShaderLinkError> for DrawError {
    fn from(e: ShaderLinkError) -> Self {
        DrawError::Link(e)
    }
}

/// Any failure while building a [`super::RenderSet`].
#[derive(Debug, Clone)]
pub enum RenderSetError {
    Compile(ShaderCompileError),
    Link(ShaderLinkError),
    Layout(LayoutError),
}

impl fmt::Display for RenderSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderSetError::Compile(e) => write!(f, "{e}"),
            RenderSetError::Link(e) => write!(f, "{e}"),
            RenderSetError::Layout(e) => write!(f, "invalid vertex layout: {e}"),
        }
    }
}

impl std::error::Error for RenderSetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderSetError::Compile(e) => Some(e),
            RenderSetError::Link(e) => Some(e),
            RenderSetError::Layout(e) => Some(e),
        }
    }
}

impl From<ShaderCompileError> for RenderSetError {
    fn from(e: ShaderCompileError) -> Self {
        RenderSetError::Compile(e)
    }
}

impl From<ShaderLinkError> for RenderSetError {
    fn from(e: ShaderLinkError) -> Self {
        RenderSetError::Link(e)
    }
}

impl From<LayoutError> for RenderSetError {
    fn from(e: LayoutError) -> Self {
        RenderSetError::Layout(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_names_stage_and_log() {
        let e = ShaderCompileError {
            stage: ShaderStageKind::Fragment,
            log: "unknown identifier `colr`".to_string(),
        };
        let text = e.to_string();
        assert!(text.contains("fragment"));
        assert!(text.contains("unknown identifier"));
    }

    #[test]
    fn link_error_carries_log() {
        let e = ShaderLinkError {
            log: "entry point not found".to_string(),
        };
        assert!(e.to_string().contains("entry point not found"));
    }

    #[test]
    fn out_of_bounds_reports_end_and_stride() {
        let e = LayoutError::OutOfBounds {
            slot: 1,
            end: 16,
            stride: 12,
        };
        let text = e.to_string();
        assert!(text.contains("16"));
        assert!(text.contains("12"));
    }
}
