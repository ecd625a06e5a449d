//! Sky application implementing winit ApplicationHandler
//!
//! Owns the window, the GPU context and the simulation, and runs one
//! simulation tick per redraw.

use anyhow::Context;
use nimbus_render::{DrawBatch, FlatPipeline, RenderContext};
use nimbus_runtime::input::TOGGLE_FULLSCREEN;
use nimbus_runtime::{push_action_events, ControlSteps, EventBus, FrameClock, InputState};
use nimbus_sim::{palette, SkyConfig, SkyEvent, SkySim};
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::PhysicalKey;
use winit::window::{Fullscreen, Window, WindowId};

/// Seconds between periodic stats lines
const STATS_INTERVAL: f64 = 5.0;

pub struct SkyApp {
    sim: SkySim,
    steps: ControlSteps,

    // Shell state
    clock: FrameClock,
    input: InputState,
    events: EventBus,
    last_stats_log: f64,

    // Rendering
    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,
    pipeline: Option<FlatPipeline>,
    batch: DrawBatch,

    fullscreen: bool,
    fatal: Option<anyhow::Error>,
}

impl SkyApp {
    pub fn new(config: SkyConfig, fullscreen: bool) -> Self {
        let steps = ControlSteps {
            breeze: config.breeze_step,
            rate: config.rate_step,
        };
        Self {
            sim: SkySim::new(config),
            steps,
            clock: FrameClock::new(),
            input: InputState::new(),
            events: EventBus::new(),
            last_stats_log: 0.0,
            window: None,
            render_context: None,
            pipeline: None,
            batch: DrawBatch::new(),
            fullscreen,
            fatal: None,
        }
    }

    /// The error that stopped the event loop, if start-up failed
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.fatal.take()
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let config = self.sim.config();
        let window_attrs = Window::default_attributes()
            .with_title("Nimbus - cumulus sky")
            .with_inner_size(PhysicalSize::new(config.width, config.height));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("Failed to create window")?,
        );

        if self.fullscreen {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let render_context = pollster::block_on(RenderContext::new(window.clone()))
            .context("Failed to create render context")?;
        let pipeline = FlatPipeline::new(&render_context.device, render_context.format());

        // The window manager may not honour the requested size
        let size = window.inner_size();
        if size.width > 0 && size.height > 0 {
            self.events.push(SkyEvent::Resize {
                width: size.width,
                height: size.height,
            });
        }

        log::info!(
            "[player] Window {}x{}, surface format {:?}",
            size.width,
            size.height,
            render_context.format()
        );

        self.window = Some(window);
        self.render_context = Some(render_context);
        self.pipeline = Some(pipeline);
        Ok(())
    }

    fn toggle_fullscreen(&self) {
        if let Some(window) = &self.window {
            if window.fullscreen().is_some() {
                window.set_fullscreen(None);
            } else {
                window.set_fullscreen(Some(Fullscreen::Borderless(None)));
            }
        }
    }

    /// Feed input to the simulation and advance it one frame
    fn tick(&mut self) {
        let dt = self.clock.tick();

        if self.input.is_action_just_pressed(TOGGLE_FULLSCREEN) {
            self.toggle_fullscreen();
        }
        push_action_events(&self.input, self.steps, &mut self.events);
        self.sim.apply_events(self.events.drain());
        self.input.end_frame();

        if !self.sim.is_running() {
            return;
        }

        let commands = self.sim.tick(dt);
        self.batch.clear();
        self.batch.extend_from_commands(&commands);

        if self.clock.total_time - self.last_stats_log >= STATS_INTERVAL {
            self.last_stats_log = self.clock.total_time;
            let stats = self.sim.stats();
            log::debug!(
                "[sky] {} live, {} spawned, {} culled, breeze {:.1}, rates {:?}",
                stats.live,
                stats.spawned,
                stats.culled,
                stats.breeze,
                stats.rates
            );
        }
    }

    fn render(&mut self) {
        let Some(context) = &mut self.render_context else {
            return;
        };
        let Some(pipeline) = &self.pipeline else {
            return;
        };

        let output = match context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                context.reconfigure();
                return;
            }
            Err(e) => {
                log::warn!("[render] Surface error: {e:?}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Sky Frame Encoder"),
            });
        pipeline.render(
            &context.device,
            &context.queue,
            &mut encoder,
            &view,
            (context.config.width, context.config.height),
            &self.batch,
            palette::CLEAR,
        );
        context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if event_loop.exiting() {
            return;
        }
        let stats = self.sim.stats();
        log::info!(
            "[player] Shutting down: {} puffs spawned, {} culled, {} dropped at the cap",
            stats.spawned,
            stats.culled,
            stats.dropped
        );
        event_loop.exit();
    }
}

impl ApplicationHandler for SkyApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.initialize(event_loop) {
            log::error!("[player] {e:#}");
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.sim.handle_event(SkyEvent::Quit);
                self.shutdown(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                if new_size.width == 0 || new_size.height == 0 {
                    return;
                }
                if let Some(context) = &mut self.render_context {
                    context.resize(new_size);
                }
                self.events.push(SkyEvent::Resize {
                    width: new_size.width,
                    height: new_size.height,
                });
            }

            WindowEvent::Focused(false) => {
                self.input.reset();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => {
                            self.input.process_key_down(key_code, event.repeat);
                        }
                        ElementState::Released => {
                            self.input.process_key_up(key_code);
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                self.tick();
                if self.sim.is_running() {
                    self.render();
                } else {
                    self.shutdown(event_loop);
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
