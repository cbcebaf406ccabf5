use std::collections::HashMap;

use super::{
    DrawError, GeometryBinding, RenderCtx, ShaderLinkError, ShaderStage, ShaderStageKind,
    VertexLayout,
};

/// Primitive assembly for a draw call.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PrimitiveKind {
    Points,
    Lines,
    LineStrip,
    Triangles,
    TriangleStrip,
}

impl PrimitiveKind {
    /// Maps onto the backend topology.
    pub fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            PrimitiveKind::Points => wgpu::PrimitiveTopology::PointList,
            PrimitiveKind::Lines => wgpu::PrimitiveTopology::LineList,
            PrimitiveKind::LineStrip => wgpu::PrimitiveTopology::LineStrip,
            PrimitiveKind::Triangles => wgpu::PrimitiveTopology::TriangleList,
            PrimitiveKind::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
        }
    }
}

/// A linked shader program.
///
/// Linking consumes two compiled stages and the vertex interface they are
/// drawn with; an `Ok` program is linked and drawable, a failed link is
/// terminal for that stage pair. The backend bakes primitive topology into
/// pipeline state, so the program keeps one pipeline per primitive kind:
/// the triangle-list pipeline is built eagerly at link (cross-stage
/// interface errors surface there), others are specialized at first draw.
pub struct ShaderProgram {
    vertex: wgpu::ShaderModule,
    fragment: wgpu::ShaderModule,
    pipeline_layout: wgpu::PipelineLayout,
    layout: VertexLayout,
    attributes: Vec<wgpu::VertexAttribute>,
    format: wgpu::TextureFormat,
    pipelines: HashMap<PrimitiveKind, wgpu::RenderPipeline>,
}

impl ShaderProgram {
    /// Links a vertex and a fragment stage against a vertex layout.
    ///
    /// Both stages must already be compiled (the types guarantee it) and must
    /// be of the expected kinds. The stages are consumed: after a successful
    /// link the program holds its own pipeline state and the stage handles
    /// are released. Failure captures the backend's diagnostic log.
    pub fn link(
        ctx: &RenderCtx<'_>,
        vertex: ShaderStage,
        fragment: ShaderStage,
        layout: &VertexLayout,
    ) -> Result<Self, ShaderLinkError> {
        if vertex.kind() != ShaderStageKind::Vertex {
            return Err(ShaderLinkError {
                log: format!("first stage must be a vertex stage, got {}", vertex.kind()),
            });
        }
        if fragment.kind() != ShaderStageKind::Fragment {
            return Err(ShaderLinkError {
                log: format!(
                    "second stage must be a fragment stage, got {}",
                    fragment.kind()
                ),
            });
        }

        let attributes = layout.wgpu_attributes().map_err(|e| ShaderLinkError {
            log: format!("invalid vertex layout: {e}"),
        })?;

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("glint program layout"),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

        let mut program = Self {
            vertex: vertex.into_module(),
            fragment: fragment.into_module(),
            pipeline_layout,
            layout: layout.clone(),
            attributes,
            format: ctx.surface_format,
            pipelines: HashMap::new(),
        };

        program.build_pipeline(ctx, PrimitiveKind::Triangles)?;

        Ok(program)
    }

    /// Binds the program and issues one non-indexed draw over the binding.
    ///
    /// The pipeline bind happens here, so a draw without an active program is
    /// unrepresentable; re-binding the already-active pipeline is a no-op.
    /// The binding must carry the layout the program was linked against.
    pub fn draw(
        &mut self,
        ctx: &RenderCtx<'_>,
        pass: &mut wgpu::RenderPass<'_>,
        binding: &GeometryBinding,
        kind: PrimitiveKind,
    ) -> Result<(), DrawError> {
        if binding.layout() != &self.layout {
            return Err(DrawError::LayoutMismatch);
        }

        self.ensure_pipeline(ctx, kind)?;
        let pipeline = self.pipelines.get(&kind).ok_or_else(|| {
            DrawError::Link(ShaderLinkError {
                log: format!("no pipeline for {kind:?} after specialization"),
            })
        })?;

        pass.set_pipeline(pipeline);
        pass.set_vertex_buffer(0, binding.buffer().slice(..));
        pass.draw(0..binding.vertex_count(), 0..1);

        Ok(())
    }

    fn ensure_pipeline(
        &mut self,
        ctx: &RenderCtx<'_>,
        kind: PrimitiveKind,
    ) -> Result<(), ShaderLinkError> {
        if self.format != ctx.surface_format {
            self.pipelines.clear();
            self.format = ctx.surface_format;
        }

        if !self.pipelines.contains_key(&kind) {
            self.build_pipeline(ctx, kind)?;
        }

        Ok(())
    }

    fn build_pipeline(
        &mut self,
        ctx: &RenderCtx<'_>,
        kind: PrimitiveKind,
    ) -> Result<(), ShaderLinkError> {
        let error_scope = ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let pipeline = ctx
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("glint program pipeline"),
                layout: Some(&self.pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &self.vertex,
                    entry_point: Some(ShaderStageKind::Vertex.entry_point()),
                    compilation_options: Default::default(),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: self.layout.stride,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &self.attributes,
                    }],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &self.fragment,
                    entry_point: Some(ShaderStageKind::Fragment.entry_point()),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: kind.topology(),
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),

                multiview_mask: None,
                cache: None,
            });

        if let Some(err) = pollster::block_on(error_scope.pop()) {
            return Err(ShaderLinkError {
                log: err.to_string(),
            });
        }

        self.pipelines.insert(kind, pipeline);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_kinds_map_to_backend_topologies() {
        assert_eq!(
            PrimitiveKind::Triangles.topology(),
            wgpu::PrimitiveTopology::TriangleList
        );
        assert_eq!(
            PrimitiveKind::TriangleStrip.topology(),
            wgpu::PrimitiveTopology::TriangleStrip
        );
        assert_eq!(PrimitiveKind::Points.topology(), wgpu::PrimitiveTopology::PointList);
        assert_eq!(PrimitiveKind::Lines.topology(), wgpu::PrimitiveTopology::LineList);
        assert_eq!(
            PrimitiveKind::LineStrip.topology(),
            wgpu::PrimitiveTopology::LineStrip
        );
    }
}
