use ouroboros::self_referencing;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::render::RenderCtx;

use super::{Gpu, GpuFrame, SessionConfig, SessionError, SurfaceErrorAction};

/// The window/GPU pair backing a session.
///
/// The surface borrows the window, so the two live in a self-referencing
/// cell; dropping the cell releases the GPU context before the window.
#[self_referencing]
struct SessionCell {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// One platform window plus the GPU context rendering into it.
///
/// Exactly one live session per process is supported. The session is created
/// once at startup, used exclusively by the thread that created it, and
/// destroyed once at shutdown (all teardown is `Drop`-driven, so release is
/// guaranteed on every exit path).
pub struct Session {
    cell: SessionCell,
    close_requested: bool,
}

impl Session {
    /// Creates the window and its GPU context.
    ///
    /// The requested size must be positive. Failure is terminal: either the
    /// platform window could not be created (`SessionError::WindowCreation`)
    /// or the surface/adapter/device setup failed
    /// (`SessionError::ContextCreation`). Immediately after creation,
    /// [`Session::should_close`] returns `false`.
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &SessionConfig,
    ) -> Result<Self, SessionError> {
        if config.initial_size.width <= 0.0 || config.initial_size.height <= 0.0 {
            return Err(SessionError::WindowCreation {
                message: format!(
                    "requested size {}x{} is not positive",
                    config.initial_size.width, config.initial_size.height
                ),
            });
        }

        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| SessionError::WindowCreation {
                message: e.to_string(),
            })?;

        let cell = SessionCellTryBuilder {
            window,
            gpu_builder: |window| pollster::block_on(Gpu::new(window, config)),
        }
        .try_build()?;

        log::debug!("session created ({})", config.title);

        Ok(Self {
            cell,
            close_requested: false,
        })
    }

    /// Returns the platform window.
    pub fn window(&self) -> &Window {
        self.cell.borrow_window()
    }

    /// Returns a renderer-facing view of the GPU context, suitable for
    /// building render resources against this session.
    pub fn render_ctx(&self) -> RenderCtx<'_> {
        let gpu = self.cell.borrow_gpu();
        RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format())
    }

    /// Returns the current drawable size in physical pixels.
    pub fn drawable_size(&self) -> PhysicalSize<u32> {
        self.cell.borrow_gpu().size()
    }

    /// Non-blocking query of the close-requested flag.
    pub fn should_close(&self) -> bool {
        self.close_requested
    }

    /// Sets the close-requested flag.
    ///
    /// Typically invoked from input handling (the demos bind Escape) or the
    /// platform close event; the runtime loop terminates within one iteration.
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    /// Resize notification.
    ///
    /// Updates the drawable size and reconfigures the surface synchronously,
    /// so the next frame's viewport covers exactly the new size.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.cell.with_gpu_mut(|gpu| gpu.resize(new_size));
    }

    /// Acquires the next frame.
    pub fn begin_frame(&self) -> Result<GpuFrame, wgpu::SurfaceError> {
        self.cell.borrow_gpu().begin_frame()
    }

    /// Submits and presents a completed frame.
    ///
    /// Under FIFO present modes this is the point that may block on vertical
    /// sync — the platform's presentation policy, not ours.
    pub fn present(&self, frame: GpuFrame) {
        self.cell.borrow_window().pre_present_notify();
        self.cell.borrow_gpu().submit(frame);
    }

    /// Classifies a frame-acquisition error.
    pub fn handle_surface_error(&mut self, err: wgpu::SurfaceError) -> SurfaceErrorAction {
        self.cell.with_gpu_mut(|gpu| gpu.handle_surface_error(err))
    }
}
