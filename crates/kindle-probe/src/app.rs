//! Probe application implementing winit ApplicationHandler

use crate::probe::{Edge, Probe};
use kindle_input::DesktopBackend;
use kindle_runtime::MonotonicClock;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Window, WindowId};

const FRAME: Duration = Duration::from_millis(16);

pub struct ProbeApp {
    probe: Probe<MonotonicClock>,
    backend: DesktopBackend,
    window: Option<Window>,
    title: String,
}

impl ProbeApp {
    pub fn new(probe: Probe<MonotonicClock>, backend: DesktopBackend, title: String) -> Self {
        Self {
            probe,
            backend,
            window: None,
            title,
        }
    }

    /// Close every gamepad and report how long the session ran
    pub fn finish(mut self) {
        let elapsed = self.probe.finish(&mut self.backend);
        log::info!("Session ended after {:.1} s", elapsed as f64 / 1000.0);
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        for event in self.backend.poll_device_events() {
            self.probe.device_event(&mut self.backend, event);
        }

        for edge in self.probe.frame(&self.backend) {
            match edge.edge {
                Edge::Pressed => log::info!("[{:>8} ms] {} pressed", edge.at_ms, edge.action),
                Edge::Released => log::info!("[{:>8} ms] {} released", edge.at_ms, edge.action),
            }
        }

        if self.probe.quit_requested() {
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for ProbeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(PhysicalSize::new(640, 360));
        match event_loop.create_window(attrs) {
            Ok(window) => self.window = Some(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        }

        if !self.backend.has_gamepad_support() {
            log::warn!("Running without gamepads");
        }
        let connected = self.probe.input().connected_gamepads().len();
        log::info!("Probe ready ({connected} gamepads open)");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.backend.process_window_event(&event);

        if let WindowEvent::CloseRequested = event {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.frame(event_loop);
        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + FRAME));
    }
}
