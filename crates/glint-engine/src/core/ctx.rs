use crate::render::RenderCtx;
use crate::session::{Session, SurfaceErrorAction};
use crate::time::FrameTime;

use super::app::AppControl;

/// Per-frame context passed to [`super::App::on_frame`].
pub struct FrameCtx<'a> {
    pub session: &'a mut Session,
    pub time: FrameTime,
}

impl FrameCtx<'_> {
    /// Clears the drawable with `clear`, calls `draw` with a ready
    /// [`RenderCtx`] and the frame's render pass, then presents.
    ///
    /// The pass's viewport covers exactly the current drawable size; resize
    /// notifications reconfigure the surface before the next frame is
    /// acquired, so the two never disagree.
    pub fn render<F>(&mut self, clear: wgpu::Color, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut wgpu::RenderPass<'_>),
    {
        let mut frame = match self.session.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let action = self.session.handle_surface_error(err);
                if action == SurfaceErrorAction::Fatal {
                    log::error!("fatal surface error; exiting");
                    return AppControl::Exit;
                }
                return AppControl::Continue;
            }
        };

        let size = frame.surface_texture.texture.size();

        // Clear + draw in one pass; the pass is dropped before the encoder is
        // moved into present().
        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("glint frame pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_viewport(0.0, 0.0, size.width as f32, size.height as f32, 0.0, 1.0);

            let rctx = self.session.render_ctx();
            draw(&rctx, &mut rpass);
        }

        self.session.present(frame);
        AppControl::Continue
    }
}
