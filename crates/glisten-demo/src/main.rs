//! Headless glisten demo.
//!
//! Runs the full component lifecycle against a compositor that renders the
//! sweep as an ASCII strip on stdout — handy for eyeballing the timing
//! behavior without a GPU or a window.

use std::time::Instant;

use glisten_core::coords::Rect;
use glisten_core::logging::{LoggingConfig, init_logging};
use glisten_core::paint::{Color, LinearGradient};
use glisten_view::{AlphaMask, Compositor, GlistenConfig, GlisteningImage};
use image::{Rgba, RgbaImage};

const VIEW: Rect = Rect::new(0.0, 0.0, 64.0, 64.0);
const COLUMNS: usize = 48;

/// Renders each masked-gradient call as a one-line strip: `#` where the band
/// crosses, `.` where the image is visible but unlit.
struct AsciiCompositor;

impl Compositor for AsciiCompositor {
    fn draw_image(&mut self, _rect: Rect, _image: &RgbaImage) {}

    fn draw_masked_gradient(&mut self, rect: Rect, gradient: &LinearGradient, _mask: &AlphaMask) {
        let mut strip = String::with_capacity(COLUMNS);
        let band_min = gradient.start.x.min(gradient.end.x);
        let band_max = gradient.start.x.max(gradient.end.x);
        for col in 0..COLUMNS {
            let x = rect.origin.x + rect.size.x * (col as f32 + 0.5) / COLUMNS as f32;
            strip.push(if x >= band_min && x <= band_max { '#' } else { '.' });
        }
        println!("  [{strip}]");
    }
}

/// A coin-ish disc with transparent corners, so the mask is non-trivial.
fn coin(size: u32) -> RgbaImage {
    let mut img = RgbaImage::new(size, size);
    let r = size as f32 / 2.0;
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - r;
            let dy = y as f32 + 0.5 - r;
            let inside = dx * dx + dy * dy <= r * r;
            let px = if inside { Rgba([230, 190, 60, 255]) } else { Rgba([0, 0, 0, 0]) };
            img.put_pixel(x, y, px);
        }
    }
    img
}

fn main() {
    init_logging(LoggingConfig::default());

    let mut view = GlisteningImage::with_config(
        GlistenConfig::new()
            .with_initial_delay(0.25)
            .with_duration(0.6)
            .with_interval(1.0)
            .with_repeat_count(3)
            .with_color(Color::from_srgb_u8(255, 246, 214, 230))
            .with_angle_degrees(0.0), // horizontal, so the ASCII strip tells the story
    );
    view.set_image(coin(64));
    view.set_completion(|_| println!("  -- repetition complete --"));

    log::info!("attaching view; three sweeps ahead");
    let t0 = Instant::now();
    view.on_attached(t0);

    let mut compositor = AsciiCompositor;
    while view.is_highlighting() {
        let now = Instant::now();
        view.tick(now);
        view.paint(&mut compositor, VIEW, now);

        // Frame pacing: sleep toward the next deadline, capped at ~30 fps so
        // the sweep itself animates.
        let frame = std::time::Duration::from_millis(33);
        let sleep = match view.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(frame),
            None => frame,
        };
        std::thread::sleep(sleep);
    }

    view.on_detached();
    log::info!("cycle finished after {:.2?}", t0.elapsed());
}
