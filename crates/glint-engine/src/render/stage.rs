use std::fmt;

use super::{RenderCtx, ShaderCompileError};

/// Shader stage kind.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStageKind {
    Vertex,
    Fragment,
}

impl ShaderStageKind {
    /// WGSL entry point name this stage is expected to export.
    pub fn entry_point(self) -> &'static str {
        match self {
            ShaderStageKind::Vertex => "vs_main",
            ShaderStageKind::Fragment => "fs_main",
        }
    }
}

impl fmt::Display for ShaderStageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStageKind::Vertex => write!(f, "vertex"),
            ShaderStageKind::Fragment => write!(f, "fragment"),
        }
    }
}

/// A compiled shader stage.
///
/// A stage exists only in the compiled state: [`ShaderStage::compile`] either
/// yields a usable handle or fails with the backend's diagnostic log. The
/// source cannot be recompiled through the same stage — author a new one.
pub struct ShaderStage {
    kind: ShaderStageKind,
    module: wgpu::ShaderModule,
}

impl ShaderStage {
    /// Compiles WGSL source for the given stage.
    ///
    /// Runs under a validation error scope so compilation diagnostics are
    /// captured instead of being reported through the device's global error
    /// sink. A failed compile never produces a usable handle.
    pub fn compile(
        ctx: &RenderCtx<'_>,
        kind: ShaderStageKind,
        source: &str,
    ) -> Result<Self, ShaderCompileError> {
        let error_scope = ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let module = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(match kind {
                    ShaderStageKind::Vertex => "glint vertex stage",
                    ShaderStageKind::Fragment => "glint fragment stage",
                }),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            });

        if let Some(err) = pollster::block_on(error_scope.pop()) {
            return Err(ShaderCompileError {
                stage: kind,
                log: err.to_string(),
            });
        }

        Ok(Self { kind, module })
    }

    /// Returns the stage kind.
    pub fn kind(&self) -> ShaderStageKind {
        self.kind
    }

    pub(crate) fn into_module(self) -> wgpu::ShaderModule {
        self.module
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_kinds_display_lowercase() {
        assert_eq!(ShaderStageKind::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStageKind::Fragment.to_string(), "fragment");
    }

    #[test]
    fn entry_points_follow_wgsl_convention() {
        assert_eq!(ShaderStageKind::Vertex.entry_point(), "vs_main");
        assert_eq!(ShaderStageKind::Fragment.entry_point(), "fs_main");
    }
}
