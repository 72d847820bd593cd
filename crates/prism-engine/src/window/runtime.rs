use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::translate::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::time::FrameClock;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "prism".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until it exits or the window closes.
    ///
    /// Errors raised while the loop runs (window or GPU creation) are returned
    /// after the loop stops.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    failure: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            failure: None,
            exit_requested: false,
        }
    }

    /// Keeps the first error; later ones are only logged.
    fn record_failure(&mut self, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure.get_or_insert(err);
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.record_failure(err);
        self.exit(event_loop);
    }

    /// Folds a frame result into the loop state. Returns true when the loop
    /// should stop.
    fn settle_frame(&mut self, outcome: Result<AppControl>) -> bool {
        match outcome {
            Ok(AppControl::Continue) => false,
            Ok(AppControl::Exit) => true,
            Err(err) => {
                self.record_failure(err.context("frame failed"));
                true
            }
        }
    }

    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        // Dropping the entry drops the surface before the window.
        self.window = None;
        event_loop.exit();
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")
    }

    fn redraw(&mut self) -> Result<AppControl> {
        let (app, Some(entry)) = (&mut self.app, self.window.as_mut()) else {
            return Ok(AppControl::Continue);
        };

        let mut control = Ok(AppControl::Continue);
        entry.with_mut(|fields| {
            let time = fields.clock.tick();

            // Scope so `ctx` is dropped before the frame deltas are cleared.
            {
                let mut ctx = FrameCtx {
                    window: WindowCtx { window: fields.window },
                    gpu: fields.gpu,
                    input: fields.input_state,
                    input_frame: fields.input_frame,
                    time,
                };
                control = app.on_frame(&mut ctx);
            }

            fields.input_frame.clear();
        });

        control
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exit_requested {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.window = Some(entry);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Continuous redraw: the uniforms change every frame.
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(entry) = self.window.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            return;
        }

        let (app, Some(entry)) = (&mut self.app, self.window.as_mut()) else {
            return;
        };

        let mut app_control = AppControl::Continue;
        entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.input_state, &event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
            app_control = app.on_window_event(&event);
        });

        if app_control == AppControl::Exit {
            self.exit(event_loop);
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                self.exit(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                let minimized = entry.with_gpu(|gpu| {
                    let size = gpu.size();
                    size.width == 0 || size.height == 0
                });
                if minimized {
                    return;
                }

                let outcome = self.redraw();
                if self.settle_frame(outcome) {
                    self.exit(event_loop);
                }
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fails every frame, the way a renderer with a bad pipeline does.
    struct FailingApp;

    impl App for FailingApp {
        fn on_frame(&mut self, _ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
            anyhow::bail!("bad vertex descriptor")
        }
    }

    fn state() -> AppState<FailingApp> {
        AppState::new(RuntimeConfig::default(), GpuInit::default(), FailingApp)
    }

    #[test]
    fn frame_error_is_kept_for_run() {
        let mut state = state();
        assert!(state.settle_frame(Err(anyhow::anyhow!("bad vertex descriptor"))));

        let err = state.failure.take().unwrap();
        let chain = format!("{err:#}");
        assert!(chain.starts_with("frame failed"));
        assert!(chain.contains("bad vertex descriptor"));
    }

    #[test]
    fn first_frame_error_wins() {
        let mut state = state();
        state.settle_frame(Err(anyhow::anyhow!("first")));
        state.settle_frame(Err(anyhow::anyhow!("second")));
        assert!(format!("{:#}", state.failure.unwrap()).contains("first"));
    }

    #[test]
    fn clean_exit_is_not_a_failure() {
        let mut state = state();
        assert!(!state.settle_frame(Ok(AppControl::Continue)));
        assert!(state.settle_frame(Ok(AppControl::Exit)));
        assert!(state.failure.is_none());
    }
}
