//! [`DrawContext`] over a browser 2D canvas.

use ambient_fx_core::draw::{DrawContext, Paint, Path, PathSegment};
use ambient_fx_core::DVec2;
use std::f64::consts::TAU;
use tracing::debug;
use wasm_bindgen::JsValue;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

pub struct Canvas2d {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

enum Style {
    Color(String),
    Gradient(CanvasGradient),
}

impl Canvas2d {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    fn style(&self, paint: &Paint) -> Option<Style> {
        let gradient = match paint {
            Paint::Solid(c) => return Some(Style::Color(c.to_css())),
            Paint::Linear { from, to, stops } => {
                let g = self.ctx.create_linear_gradient(from.x, from.y, to.x, to.y);
                (g, stops)
            }
            Paint::Radial {
                center,
                inner_radius,
                outer_radius,
                stops,
            } => {
                let g = self
                    .ctx
                    .create_radial_gradient(center.x, center.y, *inner_radius, center.x, center.y, *outer_radius)
                    .map_err(log_js)
                    .ok()?;
                (g, stops)
            }
        };
        let (g, stops) = gradient;
        for stop in stops {
            g.add_color_stop(stop.offset.clamp(0.0, 1.0) as f32, &stop.color.to_css())
                .map_err(log_js)
                .ok()?;
        }
        Some(Style::Gradient(g))
    }

    fn set_fill(&self, paint: &Paint) -> bool {
        match self.style(paint) {
            Some(Style::Color(css)) => self.ctx.set_fill_style_str(&css),
            Some(Style::Gradient(g)) => self.ctx.set_fill_style_canvas_gradient(&g),
            None => return false,
        }
        true
    }

    fn trace(&self, path: &Path) {
        self.ctx.begin_path();
        for seg in path.segments() {
            match *seg {
                PathSegment::MoveTo(p) => self.ctx.move_to(p.x, p.y),
                PathSegment::LineTo(p) => self.ctx.line_to(p.x, p.y),
                PathSegment::CubicTo(c1, c2, end) => self.ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y),
                PathSegment::Close => self.ctx.close_path(),
            }
        }
    }
}

fn log_js(e: JsValue) {
    debug!(error = ?e, "2d context call failed");
}

impl DrawContext for Canvas2d {
    fn resize(&mut self, px_width: u32, px_height: u32, scale: f64) {
        self.canvas.set_width(px_width);
        self.canvas.set_height(px_height);
        let _ = self
            .ctx
            .set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0)
            .map_err(log_js);
    }

    fn clear(&mut self) {
        self.ctx.save();
        let _ = self.ctx.reset_transform().map_err(log_js);
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
        self.ctx.restore();
    }

    fn stroke_path(&mut self, path: &Path, paint: &Paint, width: f64) {
        if path.is_empty() || paint.is_invisible() || width <= 0.0 {
            return;
        }
        match self.style(paint) {
            Some(Style::Color(css)) => self.ctx.set_stroke_style_str(&css),
            Some(Style::Gradient(g)) => self.ctx.set_stroke_style_canvas_gradient(&g),
            None => return,
        }
        self.ctx.set_line_width(width);
        self.trace(path);
        self.ctx.stroke();
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        if path.is_empty() || paint.is_invisible() || !self.set_fill(paint) {
            return;
        }
        self.trace(path);
        self.ctx.fill();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: &Paint) {
        if paint.is_invisible() || !self.set_fill(paint) {
            return;
        }
        self.ctx.fill_rect(x, y, width, height);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint) {
        if !(radius.is_finite() && radius > 0.0) || paint.is_invisible() || !self.set_fill(paint) {
            return;
        }
        self.ctx.begin_path();
        if self.ctx.arc(center.x, center.y, radius, 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
    }
}
