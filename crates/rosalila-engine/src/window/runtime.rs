use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::config::EngineConfig;
use crate::core::{App as CoreApp, AppControl, FrameCtx};
use crate::device::GpuInit;
use crate::error::EngineError;
use crate::graphics::Graphics;
use crate::logging::{LineSink, LogSink};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub engine: EngineConfig,
    pub gpu: GpuInit,
}

impl RuntimeConfig {
    pub fn new(title: impl Into<String>, engine: EngineConfig) -> Self {
        Self { title: title.into(), engine, gpu: GpuInit::default() }
    }

    fn window_attributes(&self) -> WindowAttributes {
        let size = self.engine.window_size();
        let mut attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(PhysicalSize::new(size.x, size.y));
        if self.engine.fullscreen.enabled {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        attrs
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives `app` until it exits, reporting engine
    /// messages through the `log` facade.
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<(), EngineError>
    where
        A: 'static + CoreApp,
    {
        Self::run_with_sink(config, Box::new(LogSink), app)
    }

    /// Like [`run`](Self::run) with a custom line sink.
    ///
    /// Returns the first fatal error: window or GPU creation failure, or a
    /// surface that can no longer be presented to.
    pub fn run_with_sink<A>(
        config: RuntimeConfig,
        sink: Box<dyn LineSink>,
        app: A,
    ) -> Result<(), EngineError>
    where
        A: 'static + CoreApp,
    {
        let mut state = AppState::new(config, sink, app);
        run_event_loop(&mut state).map_err(|e| EngineError::Initialization(format!("{e:#}")))?;

        match state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn run_event_loop<A>(state: &mut AppState<A>) -> Result<()>
where
    A: 'static + CoreApp,
{
    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    event_loop
        .run_app(state)
        .context("winit event loop terminated with error")?;
    Ok(())
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    graphics: Graphics<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    /// Consumed when the window is created.
    sink: Option<Box<dyn LineSink>>,
    app: A,

    window: Option<WindowEntry>,
    frame: u64,
    error: Option<EngineError>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, sink: Box<dyn LineSink>, app: A) -> Self {
        Self {
            config,
            sink: Some(sink),
            app,
            window: None,
            frame: 0,
            error: None,
            exit_requested: false,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: EngineError) {
        log::error!("{err}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<(), EngineError> {
        let window = event_loop
            .create_window(self.config.window_attributes())
            .map_err(|e| EngineError::Initialization(format!("failed to create window: {e}")))?;

        let sink = self.sink.take().unwrap_or_else(|| Box::new(LogSink));
        let engine = &self.config.engine;
        let gpu_init = self.config.gpu.clone();

        let entry = WindowEntryTryBuilder {
            window,
            graphics_builder: |w| Graphics::new(w, engine, gpu_init, sink),
        }
        .try_build()?;

        self.window = Some(entry);
        Ok(())
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            self.fail(event_loop, e);
            return;
        }

        let (app, window) = (&mut self.app, &mut self.window);
        let mut control = AppControl::Continue;
        if let Some(entry) = window.as_mut() {
            entry.with_graphics_mut(|gfx| control = app.on_start(gfx));
            entry.with_window(|w| w.request_redraw());
        }

        if control == AppControl::Exit {
            self.exit_requested = true;
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // The frame pacer limits the rate; the loop itself never waits.
        event_loop.set_control_flow(ControlFlow::Poll);

        if let Some(entry) = self.window.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.exit_requested = true;
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.window = None;
                self.exit_requested = true;
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.window.as_mut() {
                    entry.with_graphics_mut(|gfx| gfx.resize(*new_size));
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.window.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_graphics_mut(|gfx| gfx.resize(new_size));
                }
            }

            WindowEvent::RedrawRequested => {
                let (app, window, frame) = (&mut self.app, &mut self.window, self.frame);
                let Some(entry) = window.as_mut() else { return; };

                let mut control = AppControl::Continue;
                let mut presented = Ok(());
                entry.with_graphics_mut(|gfx| {
                    {
                        let mut ctx = FrameCtx { gfx: &mut *gfx, frame };
                        control = app.on_frame(&mut ctx);
                    }
                    presented = gfx.present_frame();
                });
                self.frame = self.frame.wrapping_add(1);

                if let Err(e) = presented {
                    self.fail(event_loop, e);
                    return;
                }
                if control == AppControl::Exit {
                    self.exit_requested = true;
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}
