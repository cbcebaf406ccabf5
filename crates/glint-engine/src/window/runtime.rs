use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use crate::core::{App, AppControl, FrameCtx};
use crate::session::{Session, SessionConfig};
use crate::time::FrameClock;

/// Entry point for the runtime.
///
/// The runtime owns the platform event loop: it drains events (which may
/// deliver resize notifications synchronously), drives one frame per redraw,
/// and terminates within one iteration of the session's close request.
pub struct Runtime;

impl Runtime {
    /// Runs `app` against a single session until it closes.
    ///
    /// Session creation happens once the loop is live (a platform
    /// requirement); a creation or startup failure exits the loop and is
    /// returned here, so drivers can report it and exit non-zero.
    pub fn run<A>(config: SessionConfig, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        if let Some(err) = state.fatal_error.take() {
            return Err(err);
        }

        Ok(())
    }
}

struct AppState<A>
where
    A: App + 'static,
{
    config: SessionConfig,
    app: A,

    session: Option<Session>,
    clock: FrameClock,
    fatal_error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: SessionConfig, app: A) -> Self {
        Self {
            config,
            app,
            session: None,
            clock: FrameClock::default(),
            fatal_error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal_error = Some(err);
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }

        let session = match Session::create(event_loop, &self.config) {
            Ok(session) => session,
            Err(err) => {
                self.fail(
                    event_loop,
                    anyhow::Error::new(err).context("failed to create session"),
                );
                return;
            }
        };

        if let Err(err) = self.app.on_start(&session) {
            self.fail(event_loop, err.context("application startup failed"));
            return;
        }

        session.window().request_redraw();
        self.session = Some(session);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(session) = self.session.as_ref() else {
            return;
        };

        if session.should_close() {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: the demos render every loop iteration.
        session.window().request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if window_id != session.window().id() {
            return;
        }

        // Input handling lives in the driver; it requests close through the
        // session rather than through any process-wide state.
        if self.app.on_window_event(&event) == AppControl::Exit {
            session.request_close();
        }

        match event {
            WindowEvent::CloseRequested => {
                session.request_close();
            }

            WindowEvent::Resized(new_size) => {
                session.resize(new_size);
                session.window().request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = session.window().inner_size();
                session.resize(new_size);
                session.window().request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let time = self.clock.tick();

                let control = {
                    let mut ctx = FrameCtx {
                        session: &mut *session,
                        time,
                    };
                    self.app.on_frame(&mut ctx)
                };

                if control == AppControl::Exit {
                    session.request_close();
                }
            }

            _ => {}
        }

        if session.should_close() {
            event_loop.exit();
        }
    }
}
