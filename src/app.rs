// src/app.rs

use std::sync::Arc;

use thiserror::Error;
use winit::{event::WindowEvent, window::Window};

use drop_rescue::config::GameConfig;
use drop_rescue::error::GameError;
use drop_rescue::game::{GameState, GameWorld};

use crate::engine_lib::controller::{Command, InputController, InputResponse};
use crate::rendering_lib::renderer::Renderer;
use crate::rendering_lib::shader::WGSL_SHADER_SOURCE;
use crate::ui::build_ui;

const CLEAR_COLOR: wgpu::Color = wgpu::Color { r: 0.0, g: 0.0, b: 0.02, a: 1.0 };
/// Simulation steps per second; every game constant is per step.
const TICK_RATE: f32 = 60.0;
/// Longest frame gap caught up on, so a stalled window does not replay seconds of play.
const MAX_CATCH_UP: f32 = 0.25;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("No compatible graphics adapter found")]
    NoAdapter,

    #[error("Failed to open device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("Failed to build game: {0}")]
    Game(#[from] GameError),
}

pub struct GameApp {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    renderer: Renderer,
    world: GameWorld,
    input: InputController,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    started: std::time::Instant,
    accumulator: f32,
    is_focused: bool,
}

impl GameApp {
    pub async fn new(window: Arc<Window>, game_config: GameConfig) -> Result<Self, AppError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(AppError::NoAdapter)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits()),
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = Renderer::new(
            &device,
            config.format,
            WGSL_SHADER_SOURCE,
            config.width as f32,
            config.height as f32,
        );

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, config.format, None, 1);

        let input = InputController::new(game_config.controls.double_tap_ms);
        let world = GameWorld::new(game_config, config.width as f32, config.height as f32)?;

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            renderer,
            world,
            input,
            egui_ctx,
            egui_state,
            egui_renderer,
            started: std::time::Instant::now(),
            accumulator: 0.0,
            is_focused: window.has_focus(),
        })
    }

    pub fn get_size(&self) -> winit::dpi::PhysicalSize<u32> {
        self.size
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            if let Err(e) = self.world.resize(new_size.width as f32, new_size.height as f32) {
                log::error!("Could not rebuild terrain for {}x{}: {}", new_size.width, new_size.height, e);
            }
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn run_command(&mut self, command: Command) {
        match command {
            Command::TogglePause => self.world.toggle_pause(),
            Command::Reset => {
                if let Err(e) = self.world.reset() {
                    log::error!("Reset failed: {}", e);
                }
                self.accumulator = 0.0;
            }
        }
    }

    /// Runs as many fixed steps as `dt` covers.
    pub fn update(&mut self, dt: f32) {
        if !self.is_focused || self.world.state() == GameState::Paused {
            self.accumulator = 0.0;
            return;
        }
        self.accumulator = (self.accumulator + dt).min(MAX_CATCH_UP);
        let step = 1.0 / TICK_RATE;
        while self.accumulator >= step {
            self.accumulator -= step;
            let input = self.input.frame_input();
            self.world.tick(&input);
            self.world.advance_effects();
        }
    }

    pub fn render(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError> {
        let output_texture = self.surface.get_current_texture()?;
        let view = output_texture.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Main Command Encoder"),
        });

        self.renderer.render_world(
            &self.device,
            &self.queue,
            &mut encoder,
            &view,
            &self.world,
            self.config.width as f32,
            self.config.height as f32,
            CLEAR_COLOR,
        );

        let raw_input = self.egui_state.take_egui_input(window);
        let world = &self.world;
        let full_output = self.egui_ctx.run(raw_input, |ctx| build_ui(ctx, world));
        self.egui_state.handle_platform_output(window, full_output.platform_output);
        let tris = self.egui_ctx.tessellate(full_output.shapes, self.egui_ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: window.scale_factor() as f32,
        };
        self.egui_renderer
            .update_buffers(&self.device, &self.queue, &mut encoder, &tris, &screen_descriptor);
        {
            let mut gui_render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("GUI Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            self.egui_renderer.render(&mut gui_render_pass, &tris, &screen_descriptor);
        }
        for tex_id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(tex_id);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output_texture.present();
        Ok(())
    }

    /// Returns true when the event was fully handled here.
    pub fn handle_window_event(&mut self, event: &WindowEvent, window: &Window) -> bool {
        if self.egui_state.on_window_event(window, event).consumed {
            self.input.handle_consumed_event(event);
            return true;
        }
        if let WindowEvent::Focused(focused) = event {
            self.is_focused = *focused;
        }
        let now_ms = self.now_ms();
        match self.input.handle_window_event(event, self.size.width as f32, now_ms) {
            InputResponse::Ignored => false,
            InputResponse::Consumed => true,
            InputResponse::Command(command) => {
                self.run_command(command);
                true
            }
        }
    }
}
