use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{FrameLoop, FrameOutcome, LoopControl, LoopEvent, Presenter};
use crate::device::{Gpu, GpuInit};
use crate::time::{FramePacer, DEFAULT_FRAME_INTERVAL};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,

    /// Minimum spacing between redraws.
    pub frame_interval: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "Hello triangle".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
            frame_interval: DEFAULT_FRAME_INTERVAL,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, runs the frame loop until it is closed, then releases
    /// every GPU object and the window.
    ///
    /// Returns the GPU initialization or surface error that stopped the loop,
    /// if any.
    pub fn run(config: RuntimeConfig, gpu_init: GpuInit) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init);

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
    window: Window,

    #[borrows(window)]
    #[covariant]
    frames: FrameLoop<Presenter<'this>>,
}

struct AppState {
    config: RuntimeConfig,
    gpu_init: GpuInit,

    entry: Option<WindowEntry>,
    pacer: FramePacer,

    failure: Option<anyhow::Error>,
    exit_requested: bool,
}

impl AppState {
    fn new(config: RuntimeConfig, gpu_init: GpuInit) -> Self {
        let pacer = FramePacer::new(config.frame_interval, Instant::now());
        Self {
            config,
            gpu_init,
            entry: None,
            pacer,
            failure: None,
            exit_requested: false,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        // On failure the window is dropped together with the builder.
        let entry = WindowEntryTryBuilder {
            window,
            frames_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init))
                    .map(|gpu| FrameLoop::new(Presenter::new(w, gpu)))
            },
        }
        .try_build()
        .context("GPU initialization failed")?;

        let size = entry.with_frames(|f| f.target().gpu().size());
        log::info!("window ready at {}x{}", size.width, size.height);

        self.pacer = FramePacer::new(self.config.frame_interval, Instant::now());
        self.entry = Some(entry);
        Ok(())
    }

    /// Stops the loop; `Runtime::run` hands `err` to the caller, which reports it.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.failure = Some(err);
        self.shutdown(event_loop);
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.release_window();
        self.exit_requested = true;
        event_loop.exit();
    }

    /// Drops the frame loop (pipeline, device, surface) and then the window.
    fn release_window(&mut self) {
        let Some(entry) = self.entry.take() else { return };
        let stats = entry.with_frames(|f| f.stats());
        log::info!(
            "shutting down: {} frames presented, {} skipped, {} surface reconfigurations",
            stats.presented,
            stats.skipped,
            stats.reconfigured
        );
        drop(entry);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.entry.as_mut() else { return };

        let outcome = entry.with_frames_mut(|f| f.redraw());
        self.pacer.frame_done(Instant::now());

        if outcome == FrameOutcome::Fatal {
            self.fail(event_loop, anyhow!("surface became unusable"));
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.entry.as_ref() else { return };

        if self.pacer.poll(Instant::now()) {
            entry.with_window(|w| w.request_redraw());
        }

        // While a redraw is in flight the RedrawRequested event wakes the loop.
        let flow = if self.pacer.redraw_pending() {
            ControlFlow::Wait
        } else {
            ControlFlow::WaitUntil(self.pacer.deadline())
        };
        event_loop.set_control_flow(flow);
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

        let Some(entry) = self.entry.as_mut() else { return };

        let loop_event = match &event {
            WindowEvent::CloseRequested => LoopEvent::CloseRequested,
            WindowEvent::Resized(size) => LoopEvent::Resized(*size),
            WindowEvent::ScaleFactorChanged { .. } => {
                LoopEvent::Resized(entry.with_window(|w| w.inner_size()))
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                return;
            }
            _ => return,
        };

        let control = entry.with_frames_mut(|f| f.handle_event(loop_event));
        if control == LoopControl::Exit {
            self.shutdown(event_loop);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.release_window();
    }
}
