use super::{
    DrawError, GeometryBinding, PrimitiveKind, RenderCtx, RenderSetError, ShaderProgram,
    ShaderStage, ShaderStageKind, VertexLayout,
};

/// One linked shader program paired with one geometry binding.
///
/// Built once, drawn many times. The pairing mirrors how the demos use the
/// renderer: a single fixed pipeline over a single fixed vertex buffer.
/// Program and binding remain independently usable types; this wrapper only
/// adds the build-once convenience.
pub struct RenderSet {
    program: ShaderProgram,
    geometry: GeometryBinding,
}

impl RenderSet {
    /// Compiles both stages, uploads the vertex data, and links the program.
    ///
    /// Any failure (compile, layout, link) aborts the build; partially
    /// created resources are released on the way out.
    pub fn build<V: bytemuck::Pod>(
        ctx: &RenderCtx<'_>,
        vertex_source: &str,
        fragment_source: &str,
        vertices: &[V],
        layout: VertexLayout,
    ) -> Result<Self, RenderSetError> {
        let vertex = ShaderStage::compile(ctx, ShaderStageKind::Vertex, vertex_source)?;
        let fragment = ShaderStage::compile(ctx, ShaderStageKind::Fragment, fragment_source)?;

        let geometry = GeometryBinding::from_slice(ctx, vertices, layout)?;
        let program = ShaderProgram::link(ctx, vertex, fragment, geometry.layout())?;

        Ok(Self { program, geometry })
    }

    /// Draws the geometry with the set's program.
    pub fn draw(
        &mut self,
        ctx: &RenderCtx<'_>,
        pass: &mut wgpu::RenderPass<'_>,
        kind: PrimitiveKind,
    ) -> Result<(), DrawError> {
        self.program.draw(ctx, pass, &self.geometry, kind)
    }

    /// Returns the geometry binding.
    pub fn geometry(&self) -> &GeometryBinding {
        &self.geometry
    }
}
