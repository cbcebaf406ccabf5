//! Opens a window and draws one orange triangle over the cleared background.

use anyhow::Context;
use bytemuck::{Pod, Zeroable};
use winit::event::WindowEvent;

use glint_engine::core::{App, AppControl, FrameCtx};
use glint_engine::logging::{LoggingConfig, init_logging};
use glint_engine::render::{
    ComponentType, PrimitiveKind, RenderSet, VertexAttribute, VertexLayout,
};
use glint_engine::session::{Session, SessionConfig};
use glint_engine::window::Runtime;

use glint_hello::{CLEAR_COLOR, escape_pressed};

const VERTEX_SHADER: &str = include_str!("../shaders/triangle.vert.wgsl");
const FRAGMENT_SHADER: &str = include_str!("../shaders/triangle.frag.wgsl");

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
}

/// The triangle in normalized device coordinates.
const VERTICES: [Vertex; 3] = [
    Vertex { position: [-0.5, -0.5, 0.0] },
    Vertex { position: [0.5, -0.5, 0.0] },
    Vertex { position: [0.0, 0.5, 0.0] },
];

fn vertex_layout() -> VertexLayout {
    VertexLayout {
        stride: std::mem::size_of::<Vertex>() as u64,
        attributes: vec![VertexAttribute {
            slot: 0,
            components: 3,
            component: ComponentType::F32,
            normalize: false,
            offset: 0,
        }],
    }
}

#[derive(Default)]
struct HelloTriangle {
    set: Option<RenderSet>,
}

impl App for HelloTriangle {
    fn on_start(&mut self, session: &Session) -> anyhow::Result<()> {
        let ctx = session.render_ctx();
        let set = RenderSet::build(
            &ctx,
            VERTEX_SHADER,
            FRAGMENT_SHADER,
            &VERTICES[..],
            vertex_layout(),
        )
        .context("failed to build the triangle render set")?;

        let size = session.drawable_size();
        log::info!(
            "triangle ready ({} vertices, {}x{} drawable)",
            set.geometry().vertex_count(),
            size.width,
            size.height
        );
        self.set = Some(set);
        Ok(())
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        if escape_pressed(event) {
            return AppControl::Exit;
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let set = self.set.as_mut();

        ctx.render(CLEAR_COLOR, |rctx, rpass| {
            if let Some(set) = set {
                if let Err(err) = set.draw(rctx, rpass, PrimitiveKind::Triangles) {
                    log::error!("draw failed: {err}");
                }
            }
        })
    }
}

fn main() {
    init_logging(LoggingConfig::default());

    let config = SessionConfig {
        title: "Hello Triangle".to_string(),
        ..SessionConfig::default()
    };

    if let Err(err) = Runtime::run(config, HelloTriangle::default()) {
        log::error!("fatal: {err:#}");
        std::process::exit(1);
    }
}
