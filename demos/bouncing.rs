//! Bouncing: Balls moving over a static backdrop in the terminal.
//!
//! Each frame only the area around the moving balls is cleared,
//! recomposited and written to the terminal. Press `q` to quit.
//!
//! `cargo run --example bouncing -- --log 2> trace.log`

use scenebox::terminal::quit_requested;
use scenebox::{
    ObjectId, PaintProps, PixelBuffer, Presenter, Rect, Rgba, Scene, SoftwareBackend,
    TerminalConfig, Ticker, Update,
};
use std::time::Duration;

/// Visual attributes of demo objects.
#[derive(Debug, Clone, Copy)]
enum Shape {
    Panel(Rgba),
    Ball(Rgba),
}

struct Ball {
    id: ObjectId,
    x: f32,
    y: f32,
    dx: f32,
    dy: f32,
    size: f32,
}

fn paint(props: &PaintProps<'_, Shape>, cache: &mut PixelBuffer) {
    match *props.attrs {
        Shape::Panel(color) => cache.fill(color),
        Shape::Ball(color) => {
            let radius = props.bounds.width / 2.0;
            for y in 0..cache.height() {
                for x in 0..cache.width() {
                    let dx = x as f32 + 0.5 - radius;
                    let dy = y as f32 + 0.5 - radius;
                    if dx * dx + dy * dy <= radius * radius {
                        cache.set(i64::from(x), i64::from(y), color);
                    }
                }
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::args().any(|arg| arg == "--log") {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(std::io::stderr)
            .init();
    }

    let (width, height) = Presenter::surface_size()?;
    let mut scene: Scene<SoftwareBackend, Shape> = Scene::new(SoftwareBackend::new(width, height));

    let (w, h) = (width as f32, height as f32);
    scene.add(
        Rect::new(w * 0.25, h * 0.25, w * 0.5, h * 0.5),
        Shape::Panel(Rgba::from_u32(0x2A_2F3A)),
        paint,
    )?;

    let palette = [0xE0_6C75, 0x98_C379, 0x61_AFEF, 0xE5_C07B, 0xC6_78DD];
    let mut balls = Vec::with_capacity(palette.len());
    for (i, hex) in palette.into_iter().enumerate() {
        let size = 6.0 + i as f32 * 2.0;
        let (x, y) = (i as f32 * 9.0 + 1.0, i as f32 * 5.0 + 1.0);
        let id = scene.add(
            Rect::new(x, y, size, size),
            Shape::Ball(Rgba::from_u32(hex)),
            paint,
        )?;
        balls.push(Ball {
            id,
            x,
            y,
            dx: 0.6 + i as f32 * 0.15,
            dy: 0.4 + i as f32 * 0.1,
            size,
        });
    }

    let mut presenter = Presenter::new(TerminalConfig::default())?;
    scene.draw();
    presenter.present_all(scene.backend().surface())?;

    let ticker = Ticker::with_fps(30)?;
    loop {
        if quit_requested(Duration::ZERO)? {
            break;
        }
        if ticker
            .receiver()
            .recv_timeout(Duration::from_millis(100))
            .is_err()
        {
            continue;
        }

        for ball in &mut balls {
            ball.x += ball.dx;
            ball.y += ball.dy;
            if ball.x <= 0.0 || ball.x + ball.size >= w {
                ball.dx = -ball.dx;
                ball.x = ball.x.clamp(0.0, (w - ball.size).max(0.0));
            }
            if ball.y <= 0.0 || ball.y + ball.size >= h {
                ball.dy = -ball.dy;
                ball.y = ball.y.clamp(0.0, (h - ball.size).max(0.0));
            }
            scene.update(ball.id, Update::new().position(ball.x, ball.y))?;
        }

        if let Some(report) = scene.draw() {
            presenter.present(scene.backend().surface(), report.cleared)?;
        }
    }

    ticker.join();
    drop(presenter);
    println!("average draw: {:?}", scene.timer().average());
    Ok(())
}
