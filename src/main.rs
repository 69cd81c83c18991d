//! Square-io demo scene
//!
//! Draws every primitive the engine offers into a software canvas and shows it
//! through the presenter. P saves a screenshot, Escape quits.

use std::fs;
use macroquad::prelude::{
    get_time, is_key_pressed, is_mouse_button_pressed, mouse_position, screen_height,
    screen_width, Color as MqColor, Conf, KeyCode, MouseButton,
};
use square_io::config::{load_config, save_config, EngineConfig};
use square_io::present::{fit_rect, Presenter};
use square_io::rasterizer::{
    deg_to_rad, AddressMode, Canvas, Color, Flip, Paint, PixelBuffer, RasterError, SpriteSheet,
    Transform, Vec2, Vertex,
};
use square_io::shapes::Shape;
use square_io::ui::Button;
use square_io::VERSION;

const CONFIG_PATH: &str = "square-io.ron";
const BACKGROUND: Color = Color::new(20, 20, 28);

fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn read_config() -> EngineConfig {
    match load_config(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load {}: {}, using defaults", CONFIG_PATH, e);
            EngineConfig::default()
        }
    }
}

fn window_conf() -> Conf {
    init_logging();
    let config = read_config();
    let (width, height) = config.window.window_size();
    Conf {
        window_title: format!("{} v{}", config.window.title, VERSION),
        window_width: width,
        window_height: height,
        window_resizable: true,
        high_dpi: config.window.high_dpi,
        ..Default::default()
    }
}

/// Window mouse position in canvas pixels
fn canvas_mouse(canvas: &Canvas) -> (i32, i32) {
    let (mx, my) = mouse_position();
    let (ox, oy, w, h) = fit_rect(screen_width(), screen_height(), canvas.width(), canvas.height());
    let x = (mx - ox) * canvas.width() as f32 / w;
    let y = (my - oy) * canvas.height() as f32 / h;
    (x.floor() as i32, y.floor() as i32)
}

/// Assets built on the CPU, including one rendered through an offscreen target
struct Scene {
    checker: PixelBuffer,
    sheet: SpriteSheet,
    badge: PixelBuffer,
    button: Button,
    shapes: Vec<Shape>,
}

impl Scene {
    fn build(canvas: &mut Canvas) -> Result<Self, RasterError> {
        let checker = PixelBuffer::checkerboard(16, 16, 4, Color::WHITE, Color::new(230, 60, 90))?;
        let sheet = SpriteSheet::new(
            PixelBuffer::checkerboard(32, 16, 8, Color::YELLOW, Color::BLUE)?,
            16,
            16,
        );

        // Badge: drawn into its own target, then copied out as a sprite
        let badge_target = canvas.push_target(PixelBuffer::new(24, 24)?);
        canvas.set_target(badge_target)?;
        canvas.draw_circle(Color::GREEN, 12, 12, 11);
        canvas.draw_circle_outline(Color::WHITE, 12, 12, 11);
        canvas.draw_character(7, 7, '$', 1.0, Color::BLACK);
        let badge = canvas.target().clone();
        canvas.set_target(0)?;

        let button_image = PixelBuffer::checkerboard(40, 14, 7, Color::new(70, 90, 200), Color::new(60, 75, 170))?;
        let (w, h) = (canvas.width() as f32, canvas.height() as f32);
        let button = Button::new(button_image, Vec2::new(w * 0.5, h - 24.0));

        let shapes = vec![
            Shape::rect(Vec2::new(60.0, 150.0), 30.0, 18.0, Color::new(255, 140, 0)),
            Shape::circle(Vec2::new(110.0, 150.0), 14.0, Color::new(0, 200, 200)),
            Shape::triangle(
                Vec2::new(160.0, 150.0),
                [Vec2::new(0.0, -16.0), Vec2::new(14.0, 10.0), Vec2::new(-14.0, 10.0)],
                Color::MAGENTA,
            ),
        ];

        Ok(Self { checker, sheet, badge, button, shapes })
    }

    fn update(&mut self, dt: f32) {
        for shape in &mut self.shapes {
            shape.rotate(dt);
        }
    }

    fn draw(&self, canvas: &mut Canvas, time: f32, mouse: (i32, i32)) -> Result<(), RasterError> {
        canvas.clear(BACKGROUND);
        let (w, h) = (canvas.width() as i32, canvas.height() as i32);

        // Scrolling floor: camera offset plus wrapped writes
        let floor = Paint::default()
            .with_address(AddressMode::Wrap)
            .with_camera(Some(Vec2::new(time * 20.0, 0.0)));
        canvas.with_paint(floor, |c| {
            for x in (0..w).step_by(16) {
                c.draw_line(Color::new(40, 40, 60), x, h - 50, x + 8, h - 42);
            }
        });

        canvas.draw_text(8, 8, "SQUARE-IO", 2.0, Color::WHITE);
        canvas.draw_rect_outline(Color::new(90, 90, 110), 4, 4, w - 5, h - 5);

        for shape in &self.shapes {
            shape.draw(canvas);
        }
        canvas.draw_rotated_rect_outline(Color::WHITE, 200, 20, 240, 40, deg_to_rad(6.0));
        canvas.draw_triangle_outline(Color::GREEN, 20, 50, 60, 100, 10, 90);

        // Rotating checker sprite about its own centre
        let mut transform = Transform::new();
        transform.translate(240.0, 150.0).rotate(time).scale(2.0, 2.0).translate(-8.0, -8.0);
        canvas.with_paint(Paint::default().masked(), |c| {
            c.draw_sprite_transformed(&self.checker, &mut transform, Flip::NONE)
        })?;

        // Tiled texture with vertex colors
        let tiled = Paint::default().with_sample(AddressMode::Wrap);
        canvas.with_paint(tiled, |c| {
            c.draw_textured_triangle(
                &self.checker,
                Vertex::with_color(Vec2::new(80.0, 40.0), Vec2::new(0.0, 0.0), Color::RED),
                Vertex::with_color(Vec2::new(150.0, 60.0), Vec2::new(3.0, 0.0), Color::GREEN),
                Vertex::with_color(Vec2::new(100.0, 110.0), Vec2::new(0.0, 3.0), Color::BLUE),
            );
        });

        self.sheet.draw(canvas, 200, 90, 1.5, 0, 0, Flip::NONE);
        self.sheet.draw(canvas, 230, 90, 1.5, 1, 0, Flip::HORIZONTAL);
        canvas.with_paint(Paint::default().masked(), |c| {
            c.draw_sprite(280, 90, &self.badge, 1.0, Flip::VERTICAL);
        });

        self.button.render(canvas);
        if self.button.hover(mouse.0, mouse.1) {
            let b = &self.button;
            let (bw, bh) = (b.image.width() as i32 / 2, b.image.height() as i32 / 2);
            let (bx, by) = (b.position.x as i32, b.position.y as i32);
            canvas.draw_rect_outline(Color::WHITE, bx - bw - 1, by - bh - 1, bx + bw, by + bh);
        }
        canvas.draw_text(
            self.button.position.x as i32 - 18,
            self.button.position.y as i32 - 4,
            "SHOT",
            1.0,
            Color::WHITE,
        );
        Ok(())
    }
}

fn take_screenshot(canvas: &Canvas, config: &mut EngineConfig) {
    if let Err(e) = fs::create_dir_all(&config.captures.directory) {
        log::error!("Cannot create {}: {}", config.captures.directory.display(), e);
        return;
    }
    let path = config.captures.current_path();
    if let Err(e) = canvas.save_screenshot(&path) {
        log::error!("Screenshot failed: {}", e);
        return;
    }
    config.captures.advance();
    if let Err(e) = save_config(config, CONFIG_PATH) {
        log::warn!("Could not persist capture count: {}", e);
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut config = read_config();
    log::info!("=== Square-io v{} ===", VERSION);

    let mut canvas = match Canvas::new(config.window.width, config.window.height) {
        Ok(canvas) => canvas,
        Err(e) => {
            log::error!("Cannot create canvas: {}", e);
            return;
        }
    };
    let mut scene = match Scene::build(&mut canvas) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Cannot build scene: {}", e);
            return;
        }
    };
    let mut presenter = Presenter::new().with_border(MqColor::from_rgba(10, 10, 14, 255));
    let mut last_time = get_time();

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        let now = get_time();
        let dt = (now - last_time) as f32;
        last_time = now;
        scene.update(dt);

        let mouse = canvas_mouse(&canvas);
        if let Err(e) = scene.draw(&mut canvas, now as f32, mouse) {
            log::warn!("Frame skipped part of the scene: {}", e);
        }

        let clicked = scene.button.clicked(mouse.0, mouse.1, is_mouse_button_pressed(MouseButton::Left));
        if is_key_pressed(KeyCode::P) || clicked {
            take_screenshot(&canvas, &mut config);
        }

        presenter.present(&canvas).await;
    }
}
