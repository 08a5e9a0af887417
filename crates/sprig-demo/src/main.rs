//! Sprite field demo.
//!
//! Arrow keys pan, `+`/`-` zoom, `Q`/`E` rotate the camera, `Esc` quits.

use std::f32::consts::TAU;

use anyhow::Result;
use sprig_engine::coords::{Rect, Transform2D, UvRect, Vec2};
use sprig_engine::core::{App, AppControl, FrameCtx};
use sprig_engine::device::GpuInit;
use sprig_engine::logging::{init_logging, LoggingConfig};
use sprig_engine::paint::Color;
use sprig_engine::render::sprite::{
    Camera2D, DrawStats, InstanceBuffer, SamplerSettings, SpriteInstance, SpriteRenderer,
    SpriteTexture,
};
use sprig_engine::window::{Runtime, RuntimeConfig};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

const GRID: usize = 24;
const CELL: f32 = 40.0;
const ATLAS_CELL: u32 = 16;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    Runtime::run(
        RuntimeConfig {
            title: "sprig demo".to_string(),
            ..RuntimeConfig::default()
        },
        GpuInit::default(),
        Demo::default(),
    )
}

/// GPU objects created on the first frame, once a device exists.
struct Scene {
    renderer: SpriteRenderer,
    checker: SpriteTexture,
    atlas: SpriteTexture,
    /// Static frame around the grid, uploaded once.
    border: InstanceBuffer<SpriteInstance>,
}

struct Demo {
    scene: Option<Scene>,
    camera: Camera2D,
    pan: Vec2,
    zoom: f32,
    spin: f32,
    stats_timer: f32,
}

impl Default for Demo {
    fn default() -> Self {
        Self {
            scene: None,
            camera: Camera2D::default(),
            pan: Vec2::zero(),
            zoom: 1.0,
            spin: 0.0,
            stats_timer: 0.0,
        }
    }
}

impl Demo {
    fn scene(&mut self, ctx: &FrameCtx<'_, '_>) -> Result<&Scene> {
        if self.scene.is_none() {
            let device = ctx.gpu.device();
            let queue = ctx.gpu.queue();
            let renderer = SpriteRenderer::new(device, SamplerSettings::default());
            let config = renderer.texture_config();

            let checker = SpriteTexture::from_rgba8(
                device,
                queue,
                config,
                "checker",
                8,
                8,
                &checker_pixels(8),
            )?;
            let size = ATLAS_CELL * 2;
            let atlas = SpriteTexture::from_rgba8(
                device,
                queue,
                config,
                "atlas",
                size,
                size,
                &atlas_pixels(ATLAS_CELL),
            )?;

            let mut border = InstanceBuffer::new("demo border");
            border.write(device, queue, &border_tiles());

            self.camera = Camera2D {
                center: Vec2::splat(GRID as f32 * CELL * 0.5),
                ..Camera2D::default()
            };
            self.scene = Some(Scene {
                renderer,
                checker,
                atlas,
                border,
            });
        }
        self.scene
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("scene not initialized"))
    }

    fn on_key(&mut self, key: KeyCode) -> AppControl {
        let step = 32.0 / self.zoom.max(0.1);
        match key {
            KeyCode::Escape => return AppControl::Exit,
            KeyCode::ArrowLeft => self.pan.x -= step,
            KeyCode::ArrowRight => self.pan.x += step,
            KeyCode::ArrowUp => self.pan.y -= step,
            KeyCode::ArrowDown => self.pan.y += step,
            KeyCode::Equal | KeyCode::NumpadAdd => self.zoom = (self.zoom * 1.25).min(16.0),
            KeyCode::Minus | KeyCode::NumpadSubtract => self.zoom = (self.zoom / 1.25).max(0.125),
            KeyCode::KeyQ => self.spin -= 0.1,
            KeyCode::KeyE => self.spin += 0.1,
            _ => {}
        }
        AppControl::Continue
    }
}

impl App for Demo {
    fn on_window_event(&mut self, _id: WindowId, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => self.on_key(*code),
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if let Err(e) = self.scene(ctx) {
            log::error!("failed to set up demo scene: {e:#}");
            return AppControl::Exit;
        }

        let t = ctx.time.elapsed;
        let mut camera = self.camera.clone();
        camera.center = camera.center + self.pan;
        camera.scale = self.zoom;
        camera.rotation = self.spin;

        let Some(Scene {
            renderer,
            checker,
            atlas,
            border,
        }) = self.scene.as_mut()
        else {
            return AppControl::Exit;
        };
        let mut stats = DrawStats::default();

        let control = ctx.render(Color::from_srgb_u8(24, 26, 32, 255), |rctx, target| {
            stats = renderer.render(rctx, target, &camera, |batch| {
                batch.draw_buffer(checker, border);

                batch.set_texture(checker);
                for (i, pos) in grid_positions().enumerate() {
                    let phase = i as f32 * 0.37;
                    let mut uv = UvRect::full();
                    if i % 3 == 1 {
                        uv = uv.flipped_x();
                    }
                    if i % 5 == 2 {
                        uv = uv.flipped_y();
                    }
                    let tint = Color::new(
                        0.5 + 0.5 * (t + phase).sin(),
                        0.5 + 0.5 * (t * 0.7 + phase).cos(),
                        1.0,
                        1.0,
                    );
                    batch.draw_transformed(spinning_quad(pos, CELL * 0.8, t + phase), uv, tint);
                }

                batch.set_texture(atlas);
                let n = 4u32;
                for k in 0..n {
                    let cell = Rect::new(
                        (k % 2 * ATLAS_CELL) as f32,
                        (k / 2 * ATLAS_CELL) as f32,
                        ATLAS_CELL as f32,
                        ATLAS_CELL as f32,
                    );
                    let angle = t * 0.5 + k as f32 * TAU / n as f32;
                    let orbit = Vec2::new(angle.cos(), angle.sin()) * (GRID as f32 * CELL * 0.6);
                    let center = Vec2::splat(GRID as f32 * CELL * 0.5) + orbit;
                    batch.draw_rect(
                        Rect::from_center_size(center, Vec2::splat(96.0)),
                        atlas.uv_for(cell),
                        Color::WHITE.with_alpha(0.85),
                    );
                }
            });
        });

        self.stats_timer += ctx.time.dt;
        if self.stats_timer >= 1.0 {
            self.stats_timer = 0.0;
            log::info!(
                "{} sprites in {} draw calls ({:.1} fps)",
                stats.instances,
                stats.draw_calls,
                1.0 / ctx.time.dt
            );
        }

        control
    }
}

fn grid_positions() -> impl Iterator<Item = Vec2> {
    (0..GRID * GRID).map(|i| {
        let (x, y) = (i % GRID, i / GRID);
        Vec2::new((x as f32 + 0.5) * CELL, (y as f32 + 0.5) * CELL)
    })
}

/// Unit quad centered on `center`, `size` pixels wide, rotated by `angle`.
fn border_tiles() -> Vec<SpriteInstance> {
    let extent = GRID as f32 * CELL;
    let tint = Color::from_srgb_u8(90, 96, 110, 255);
    (0..=GRID)
        .flat_map(|i| {
            let along = i as f32 * CELL - CELL * 0.5;
            [
                Vec2::new(along, -CELL),
                Vec2::new(along, extent),
                Vec2::new(-CELL, along),
                Vec2::new(extent, along),
            ]
        })
        .map(|origin| {
            SpriteInstance::from_rect(
                Rect::from_origin_size(origin, Vec2::splat(CELL * 0.9)),
                UvRect::full(),
                tint,
            )
        })
        .collect()
}

fn spinning_quad(center: Vec2, size: f32, angle: f32) -> Transform2D {
    Transform2D::translation(-0.5, -0.5)
        .then_scale(size, size)
        .then_rotate(angle)
        .then_translate(center)
}

fn checker_pixels(n: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity((n * n * 4) as usize);
    for y in 0..n {
        for x in 0..n {
            let v = if (x + y) % 2 == 0 { 255 } else { 96 };
            // Mark the top-left texel so flips are visible.
            let px = if x == 0 && y == 0 { [255, 64, 64, 255] } else { [v, v, v, 255] };
            out.extend_from_slice(&px);
        }
    }
    out
}

/// 2×2 atlas of solid cells with a transparent border.
fn atlas_pixels(cell: u32) -> Vec<u8> {
    const COLORS: [[u8; 4]; 4] = [
        [230, 80, 80, 255],
        [80, 200, 120, 255],
        [90, 130, 240, 255],
        [240, 210, 90, 255],
    ];
    let size = cell * 2;
    let mut out = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let (lx, ly) = (x % cell, y % cell);
            let border = lx == 0 || ly == 0 || lx == cell - 1 || ly == cell - 1;
            let idx = (y / cell * 2 + x / cell) as usize;
            out.extend_from_slice(if border { &[0u8; 4] } else { &COLORS[idx] });
        }
    }
    out
}
