use winit::event::WindowEvent;

use crate::session::Session;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the drivers.
pub trait App {
    /// Called once, right after the session is created and its context is
    /// ready. Render resources are typically built here; an error aborts
    /// startup and is reported by the runtime.
    fn on_start(&mut self, session: &Session) -> anyhow::Result<()> {
        let _ = session;
        Ok(())
    }

    /// Called for window events. Returning [`AppControl::Exit`] requests
    /// close; the loop terminates within one iteration.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}
