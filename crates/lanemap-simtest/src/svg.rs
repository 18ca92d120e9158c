//! SVG output for rendered maps.

use lanemap_logic::geometry::{Point, Rect};
use lanemap_logic::render::{Color, Renderer};

/// Collects draw calls as SVG elements.
pub struct SvgRenderer {
    width: f32,
    height: f32,
    stroke_width: f32,
    body: String,
}

impl SvgRenderer {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            stroke_width: (width.min(height) / 250.0).max(1.0),
            body: String::new(),
        }
    }

    /// The complete document.
    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

impl Renderer for SvgRenderer {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.body.push_str(&format!(
            "  <rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>\n",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            color.to_hex()
        ));
    }

    fn draw_polyline(&mut self, points: &[Point], color: Color) {
        let coords: Vec<String> = points
            .iter()
            .map(|p| format!("{:.2},{:.2}", p.x, p.y))
            .collect();
        self.body.push_str(&format!(
            "  <polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\"/>\n",
            coords.join(" "),
            color.to_hex(),
            self.stroke_width
        ));
    }
}
