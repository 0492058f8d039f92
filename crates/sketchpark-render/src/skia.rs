//! CPU raster backend built on tiny-skia.

use crate::fonts;
use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use crate::smooth::smooth_polyline;
use kurbo::{BezPath, PathEl, Point};
use rusttype::Scale;
use sketchpark_core::camera::Camera;
use sketchpark_core::shapes::{SerializableColor, Shape, ShapeStyle, ShapeTrait, Text};
use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform,
};

/// Extents smaller than this render as a dot instead of an outline.
const DEGENERATE_EXTENT: f64 = 1e-9;

/// CPU renderer drawing into a DPR-sized pixmap.
///
/// The backing surface holds `logical size × scale factor` device pixels so
/// strokes stay crisp on high-density displays; the frame transform
/// compounds the device pixel ratio with the camera's zoom and offset.
pub struct SkiaRenderer {
    pixmap: Option<Pixmap>,
    scale_factor: f64,
    smoothing: bool,
}

impl SkiaRenderer {
    /// Create a renderer with a surface of the given logical size.
    pub fn new(logical_width: f64, logical_height: f64, scale_factor: f64) -> Self {
        let mut renderer = Self {
            pixmap: None,
            scale_factor: 1.0,
            smoothing: true,
        };
        renderer.resize(logical_width, logical_height, scale_factor);
        renderer
    }

    /// Enable or disable render-time stroke smoothing.
    pub fn set_smoothing(&mut self, smoothing: bool) {
        self.smoothing = smoothing;
    }

    /// The backing pixmap, if a surface exists.
    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Surface width in device pixels (0 without a surface).
    pub fn device_width(&self) -> u32 {
        self.pixmap.as_ref().map_or(0, Pixmap::width)
    }

    /// Surface height in device pixels (0 without a surface).
    pub fn device_height(&self) -> u32 {
        self.pixmap.as_ref().map_or(0, Pixmap::height)
    }

    /// Encode the current surface contents as a PNG.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        let pixmap = self
            .pixmap
            .as_ref()
            .ok_or(RendererError::SurfaceUnavailable)?;

        let mut rgba = Vec::with_capacity(pixmap.data().len());
        for pixel in pixmap.pixels() {
            let c = pixel.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }

        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, pixmap.width(), pixmap.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder
                .write_header()
                .map_err(|e| RendererError::Encode(e.to_string()))?;
            writer
                .write_image_data(&rgba)
                .map_err(|e| RendererError::Encode(e.to_string()))?;
        }
        Ok(out)
    }
}

impl Renderer for SkiaRenderer {
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        // A missing surface only happens in teardown/resize races; drawing
        // is a silent no-op then, not an error.
        let Some(pixmap) = self.pixmap.as_mut() else {
            return Ok(());
        };

        pixmap.fill(to_color(ctx.background));

        let dpr = self.scale_factor;
        let camera = ctx.camera;
        let device_scale = (dpr * camera.zoom) as f32;
        let transform = Transform::from_scale(device_scale, device_scale).post_translate(
            (camera.offset.x * dpr) as f32,
            (camera.offset.y * dpr) as f32,
        );

        for shape in ctx.scene.iter() {
            draw_shape(pixmap, shape, transform, camera, dpr, self.smoothing);
        }
        if let Some(preview) = ctx.preview {
            draw_shape(pixmap, preview, transform, camera, dpr, self.smoothing);
        }

        Ok(())
    }

    fn resize(&mut self, logical_width: f64, logical_height: f64, scale_factor: f64) {
        let target_w = ((logical_width * scale_factor).floor() as u32).max(1);
        let target_h = ((logical_height * scale_factor).floor() as u32).max(1);

        let unchanged = self
            .pixmap
            .as_ref()
            .is_some_and(|p| p.width() == target_w && p.height() == target_h)
            && (self.scale_factor - scale_factor).abs() < f64::EPSILON;
        if unchanged {
            return;
        }

        self.scale_factor = scale_factor;
        self.pixmap = Pixmap::new(target_w, target_h);
        if self.pixmap.is_none() {
            log::warn!("failed to allocate {target_w}x{target_h} surface");
        }
    }
}

fn to_color(color: SerializableColor) -> Color {
    Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn stroke_for(style: &ShapeStyle) -> Stroke {
    Stroke {
        width: style.thickness as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    }
}

fn paint_for(style: &ShapeStyle) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_color(style.stroke_color));
    paint.anti_alias = true;
    paint
}

/// Convert a kurbo path into a tiny-skia path.
fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

fn stroke_outline(pixmap: &mut Pixmap, path: &BezPath, style: &ShapeStyle, transform: Transform) {
    if let Some(skia_path) = to_skia_path(path) {
        pixmap.stroke_path(
            &skia_path,
            &paint_for(style),
            &stroke_for(style),
            transform,
            None,
        );
    }
}

fn draw_shape(
    pixmap: &mut Pixmap,
    shape: &Shape,
    transform: Transform,
    camera: &Camera,
    dpr: f64,
    smoothing: bool,
) {
    match shape {
        Shape::Path(path) => {
            if path.points.len() < 2 {
                return;
            }
            let outline = if smoothing {
                let mut bez = BezPath::new();
                let points = smooth_polyline(&path.points);
                bez.move_to(points[0]);
                for p in points.iter().skip(1) {
                    bez.line_to(*p);
                }
                bez
            } else {
                path.to_path()
            };
            stroke_outline(pixmap, &outline, &path.style, transform);
        }
        Shape::Rectangle(rect) => {
            let norm = rect.normalized();
            if norm.width() < DEGENERATE_EXTENT && norm.height() < DEGENERATE_EXTENT {
                draw_dot(pixmap, rect.origin, &rect.style, transform);
                return;
            }
            stroke_outline(pixmap, &rect.to_path(), &rect.style, transform);
        }
        Shape::Circle(circle) => {
            if circle.radius < DEGENERATE_EXTENT {
                draw_dot(pixmap, circle.center, &circle.style, transform);
                return;
            }
            stroke_outline(pixmap, &circle.to_path(), &circle.style, transform);
        }
        Shape::Text(text) => draw_text(pixmap, text, camera, dpr),
    }
}

/// Zero-extent shapes still leave a visible dot-sized mark.
fn draw_dot(pixmap: &mut Pixmap, center: Point, style: &ShapeStyle, transform: Transform) {
    let radius = (style.thickness / 2.0).max(0.5) as f32;
    if let Some(skia_path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius) {
        pixmap.fill_path(
            &skia_path,
            &paint_for(style),
            FillRule::Winding,
            transform,
            None,
        );
    }
}

/// Draw a text label, left-aligned from its top-left anchor.
///
/// Glyphs are laid out and blended in device-pixel space; tiny-skia has no
/// text API, so coverage from rusttype is composited per pixel.
fn draw_text(pixmap: &mut Pixmap, text: &Text, camera: &Camera, dpr: f64) {
    let Some(font) = fonts::sans_serif() else {
        return;
    };

    let px_size = (text.font_size() * camera.zoom * dpr) as f32;
    if px_size < 1.0 || text.content.is_empty() {
        return;
    }

    let anchor = camera.world_to_screen(text.anchor);
    let scale = Scale::uniform(px_size);
    let v_metrics = font.v_metrics(scale);
    // The anchor is the top-left of the text box; the baseline sits one
    // ascent below it.
    let start = rusttype::point(
        (anchor.x * dpr) as f32,
        (anchor.y * dpr) as f32 + v_metrics.ascent,
    );

    let width = pixmap.width() as i32;
    let height = pixmap.height() as i32;
    let color = text.style.stroke_color;

    for glyph in font.layout(&text.content, scale, start) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            let data = pixmap.data_mut();
            glyph.draw(|gx, gy, coverage| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || py < 0 || px >= width || py >= height {
                    return;
                }
                let idx = ((py * width + px) * 4) as usize;
                blend_pixel(&mut data[idx..idx + 4], color, coverage);
            });
        }
    }
}

/// Source-over blend of a premultiplied RGBA pixel.
fn blend_pixel(pixel: &mut [u8], color: SerializableColor, coverage: f32) {
    let alpha = (f32::from(color.a) * coverage.clamp(0.0, 1.0)).round() as u16;
    if alpha == 0 {
        return;
    }
    let inv = 255 - alpha;
    let blend = |src: u8, dst: u8| -> u8 {
        ((u16::from(src) * alpha + u16::from(dst) * inv) / 255) as u8
    };
    pixel[0] = blend(color.r, pixel[0]);
    pixel[1] = blend(color.g, pixel[1]);
    pixel[2] = blend(color.b, pixel[2]);
    pixel[3] = (alpha + u16::from(pixel[3]) * inv / 255) as u8;
}
