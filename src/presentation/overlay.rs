// SVG surface for the trail overlay
use crate::domain::movement::Trail;
use crate::domain::trail::{FRAME_HEIGHT, FRAME_WIDTH, Rgb, Surface, render_trail};
use std::fmt::Write;

/// Transparent SVG canvas stacked over the video stream
pub struct SvgSurface {
    width: u32,
    height: u32,
    body: String,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    pub fn into_svg(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">{body}</svg>",
            w = self.width,
            h = self.height,
            body = self.body,
        )
    }
}

impl Surface for SvgSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.body.clear();
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb, opacity: f64) {
        // writing into a String cannot fail
        let _ = write!(
            self.body,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"rgb({},{},{})\" fill-opacity=\"{}\"/>",
            cx, cy, radius, color.r, color.g, color.b, opacity
        );
    }
}

pub fn render_overlay_svg(trail: &Trail) -> String {
    let mut surface = SvgSurface::new(FRAME_WIDTH, FRAME_HEIGHT);
    render_trail(&mut surface, trail);
    surface.into_svg()
}
