//! Opens a window and clears it to a solid color each frame until closed.

use glint_engine::core::{App, AppControl, FrameCtx};
use glint_engine::logging::{LoggingConfig, init_logging};
use glint_engine::session::SessionConfig;
use glint_engine::window::Runtime;
use winit::event::WindowEvent;

use glint_hello::{CLEAR_COLOR, escape_pressed};

struct HelloWindow;

impl App for HelloWindow {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        if escape_pressed(event) {
            return AppControl::Exit;
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        ctx.render(CLEAR_COLOR, |_ctx, _pass| {})
    }
}

fn main() {
    init_logging(LoggingConfig::default());

    let config = SessionConfig {
        title: "Hello Window".to_string(),
        ..SessionConfig::default()
    };

    if let Err(err) = Runtime::run(config, HelloWindow) {
        log::error!("fatal: {err:#}");
        std::process::exit(1);
    }
}
