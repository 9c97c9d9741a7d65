// Trail renderer - maps a movement trail onto decaying circles
use super::movement::Trail;

pub const FRAME_WIDTH: u32 = 640;
pub const FRAME_HEIGHT: u32 = 480;

pub const MIN_RADIUS: f64 = 20.0;
pub const RADIUS_SPAN: f64 = 40.0;
pub const MARKER_RADIUS: f64 = 2.0;

/// Marker color drawn at every sample center (#ff4500)
pub const ACCENT: Rgb = Rgb::new(0xff, 0x45, 0x00);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleStyle {
    pub radius: f64,
    pub opacity: f64,
    pub color: Rgb,
}

/// A 2D drawing target sized to the video frame
pub trait Surface {
    fn size(&self) -> (u32, u32);

    fn clear(&mut self);

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb, opacity: f64);
}

/// Normalized position of a sample within the trail, 0 = oldest, 1 = newest
pub fn ratio(index: usize, len: usize) -> f64 {
    if len <= 1 {
        return 0.0;
    }
    index as f64 / (len - 1) as f64
}

/// Radius and color grow toward the newest sample, opacity shrinks toward it.
pub fn style_for(ratio: f64) -> CircleStyle {
    let ratio = ratio.clamp(0.0, 1.0);
    CircleStyle {
        radius: MIN_RADIUS + RADIUS_SPAN * ratio,
        // NOTE: oldest samples end up the most opaque, matching the deployed dashboard
        opacity: 1.0 - 0.5 * ratio,
        color: Rgb::new(channel(1.0 - ratio), channel(ratio), 0),
    }
}

fn channel(fraction: f64) -> u8 {
    (255.0 * fraction).round() as u8
}

/// Full clear-and-redraw of the trail overlay.
///
/// Samples are drawn in trail order so newer circles cover older ones.
pub fn render_trail<S: Surface + ?Sized>(surface: &mut S, trail: &Trail) {
    surface.clear();

    let len = trail.len();
    for (index, sample) in trail.samples().iter().enumerate() {
        // unplottable samples still hold their place in the gradient
        if !(sample.x.is_finite() && sample.y.is_finite()) {
            continue;
        }
        let style = style_for(ratio(index, len));
        surface.fill_circle(sample.x, sample.y, style.radius, style.color, style.opacity);
        surface.fill_circle(sample.x, sample.y, MARKER_RADIUS, ACCENT, 1.0);
    }
}
