//! CPU rasterization of visual trees via `vello_cpu`.
//!
//! The rasterizer walks a [`VisualTree`] depth first, resolving each region's
//! relative bounds against its parent's pixel rectangle, and paints fills,
//! paths, images, and Parley-shaped text into a premultiplied RGBA pixmap.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::assets::image::ImageRef;
use crate::foundation::core::{Affine, BezPath, Point, Rect};
use crate::foundation::error::{DesignError, DesignResult};
use crate::layout::tree::{
    Decoration, FontRole, HAlign, ImageContent, ImageFit, ImageRegion, Paint, Region,
    RegionKind, RegionShape, TextRegion, TextStyle, VAlign, VisualTree,
};

/// One rasterized frame in premultiplied RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA bytes.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied by alpha.
    pub premultiplied: bool,
}

/// File names the font library loads from its directory.
pub const QUOTE_FONT_FILE: &str = "NotoSerifBengali.ttf";
/// See [`QUOTE_FONT_FILE`].
pub const DATE_FONT_FILE: &str = "TiroBangla.ttf";

/// The two font faces the templates draw with.
///
/// Bytes are held unvalidated; shaping and glyph loading surface bad font
/// data as raster errors.
pub struct FontLibrary {
    quote: vello_cpu::peniko::FontData,
    quote_bytes: Vec<u8>,
    date: vello_cpu::peniko::FontData,
    date_bytes: Vec<u8>,
}

impl FontLibrary {
    /// Wrap raw TTF/OTF bytes for the quote and date faces.
    pub fn from_bytes(quote: Vec<u8>, date: Vec<u8>) -> Self {
        let quote_font =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(quote.clone()), 0);
        let date_font =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(date.clone()), 0);
        Self {
            quote: quote_font,
            quote_bytes: quote,
            date: date_font,
            date_bytes: date,
        }
    }

    /// Load both faces from a directory containing [`QUOTE_FONT_FILE`] and
    /// [`DATE_FONT_FILE`].
    pub fn load(dir: impl AsRef<Path>) -> DesignResult<Self> {
        let dir = dir.as_ref();
        let quote = std::fs::read(dir.join(QUOTE_FONT_FILE))
            .with_context(|| format!("read {QUOTE_FONT_FILE} from {}", dir.display()))?;
        let date = std::fs::read(dir.join(DATE_FONT_FILE))
            .with_context(|| format!("read {DATE_FONT_FILE} from {}", dir.display()))?;
        Ok(Self::from_bytes(quote, date))
    }

    fn font_data(&self, role: FontRole) -> &vello_cpu::peniko::FontData {
        match role {
            FontRole::Quote => &self.quote,
            FontRole::Date => &self.date,
        }
    }

    fn bytes(&self, role: FontRole) -> &[u8] {
        match role {
            FontRole::Quote => &self.quote_bytes,
            FontRole::Date => &self.date_bytes,
        }
    }
}

/// RGBA8 brush color carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrush {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

#[derive(Clone)]
struct ImagePaint {
    paint: vello_cpu::Image,
    w: u32,
    h: u32,
}

/// Stateful CPU rasterizer. Reusable across frames; decoded images are
/// cached by content.
pub struct Rasterizer {
    fonts: FontLibrary,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    image_cache: HashMap<u64, ImagePaint>,
}

impl Rasterizer {
    /// Build a rasterizer over the given fonts.
    pub fn new(fonts: FontLibrary) -> Self {
        Self {
            fonts,
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            image_cache: HashMap::new(),
        }
    }

    /// Rasterize a tree at the given pixel ratio.
    ///
    /// The output canvas is the tree's nominal canvas scaled by
    /// `pixel_ratio`; all geometry and font sizes scale with it.
    #[tracing::instrument(skip(self, tree), fields(template = %tree.template))]
    pub fn rasterize(&mut self, tree: &VisualTree, pixel_ratio: u32) -> DesignResult<FrameRGBA> {
        if pixel_ratio == 0 {
            return Err(DesignError::validation("pixel ratio must be at least 1"));
        }
        let canvas = tree.aspect.nominal_canvas();
        let width = canvas.width * pixel_ratio;
        let height = canvas.height * pixel_ratio;
        let w16: u16 = width
            .try_into()
            .map_err(|_| DesignError::validation("raster width exceeds u16"))?;
        let h16: u16 = height
            .try_into()
            .map_err(|_| DesignError::validation("raster height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(w16, h16);
        ctx.reset();

        // Opaque white base so JPEG export never sees uncovered pixels.
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            width as f64,
            height as f64,
        ));

        let full = Rect::new(0.0, 0.0, width as f64, height as f64);
        let scale = pixel_ratio as f64;
        self.draw_region(&mut ctx, &tree.root, full, scale)?;

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width,
            height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn draw_region(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        region: &Region,
        parent: Rect,
        scale: f64,
    ) -> DesignResult<()> {
        let rect = region.bounds.resolve(parent);
        match &region.kind {
            RegionKind::Container { children } => {
                for child in children {
                    self.draw_region(ctx, child, rect, scale)?;
                }
                Ok(())
            }
            RegionKind::Decoration(deco) => {
                draw_decoration(ctx, deco, rect);
                Ok(())
            }
            RegionKind::Image(image) => self.draw_image(ctx, image, rect, scale),
            RegionKind::Text(text) => {
                self.draw_text(ctx, text, rect, region_transform(rect, 0.0), scale)
            }
        }
    }

    fn draw_image(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        image: &ImageRegion,
        rect: Rect,
        scale: f64,
    ) -> DesignResult<()> {
        let local = Rect::new(0.0, 0.0, rect.width(), rect.height());
        let shape_path = shape_path(&image.shape, local);

        let transform = region_transform(rect, image.rotation_deg);
        ctx.set_transform(affine_to_cpu(transform));

        match &image.content {
            ImageContent::Placeholder { label } => {
                ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0xe2, 0xe8, 0xf0, 0xff));
                ctx.fill_path(&bezpath_to_cpu(&shape_path));
                let label_region = TextRegion::plain(
                    label.clone(),
                    crate::foundation::core::Rgba8::rgb(0x64, 0x74, 0x8b),
                    TextStyle {
                        font: FontRole::Date,
                        size: 28.0,
                        align: HAlign::Center,
                        valign: VAlign::Center,
                    },
                );
                // The label inherits the slot's rotation.
                self.draw_text(ctx, &label_region, rect, transform, scale)
            }
            ImageContent::Bitmap(image_ref) => {
                let paint = self.image_paint(image_ref, image.grayscale)?;
                let (iw, ih) = (paint.w as f64, paint.h as f64);
                if iw == 0.0 || ih == 0.0 {
                    return Err(DesignError::validation("image has zero dimension"));
                }
                let (s, dx, dy, draw_rect) = match image.fit {
                    ImageFit::Cover => {
                        let s = (rect.width() / iw).max(rect.height() / ih);
                        let dx = (rect.width() - iw * s) / 2.0;
                        let dy = (rect.height() - ih * s) / 2.0;
                        (s, dx, dy, local)
                    }
                    ImageFit::Contain => {
                        let s = (rect.width() / iw).min(rect.height() / ih);
                        let dx = match image.align_x {
                            HAlign::Start => 0.0,
                            HAlign::Center => (rect.width() - iw * s) / 2.0,
                            HAlign::End => rect.width() - iw * s,
                        };
                        let dy = match image.align_y {
                            VAlign::Top => 0.0,
                            VAlign::Center => (rect.height() - ih * s) / 2.0,
                            VAlign::Bottom => rect.height() - ih * s,
                        };
                        let drawn = Rect::new(dx, dy, dx + iw * s, dy + ih * s);
                        (s, dx, dy, drawn)
                    }
                };
                ctx.set_paint(paint.paint.clone());
                ctx.set_paint_transform(affine_to_cpu(
                    Affine::translate((dx, dy)) * Affine::scale(s),
                ));
                match image.fit {
                    ImageFit::Cover => ctx.fill_path(&bezpath_to_cpu(&shape_path)),
                    ImageFit::Contain => ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                        draw_rect.x0,
                        draw_rect.y0,
                        draw_rect.x1,
                        draw_rect.y1,
                    )),
                }
                ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
                Ok(())
            }
        }
    }

    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &TextRegion,
        rect: Rect,
        transform: Affine,
        scale: f64,
    ) -> DesignResult<()> {
        let full_text = text.full_text();
        if full_text.trim().is_empty() {
            return Ok(());
        }
        let size_px = (text.style.size * scale) as f32;
        let layout = self.layout_text(text, &full_text, size_px, rect.width() as f32)?;

        let dy = match text.style.valign {
            VAlign::Top => 0.0,
            VAlign::Center => ((rect.height() as f32 - layout.height()) / 2.0).max(0.0),
            VAlign::Bottom => (rect.height() as f32 - layout.height()).max(0.0),
        };
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let font = self.fonts.font_data(text.style.font).clone();
        let region_w = rect.width() as f32;
        for line in layout.lines() {
            // Lines are laid out flush left; alignment is applied per line.
            let mut line_width = 0.0f32;
            for item in line.items() {
                if let parley::layout::PositionedLayoutItem::GlyphRun(run) = item {
                    line_width = line_width.max(run.offset() + run.advance());
                }
            }
            let dx = match text.style.align {
                HAlign::Start => 0.0,
                HAlign::Center => ((region_w - line_width) / 2.0).max(0.0),
                HAlign::End => (region_w - line_width).max(0.0),
            };
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x + dx,
                    y: g.y + dy,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }

    fn layout_text(
        &mut self,
        text: &TextRegion,
        full_text: &str,
        size_px: f32,
        max_width_px: f32,
    ) -> DesignResult<parley::Layout<TextBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(DesignError::validation("text size must be finite and > 0"));
        }
        let font_bytes = self.fonts.bytes(text.style.font).to_vec();
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| DesignError::validation("no font families in font bytes"))?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| DesignError::validation("font family has no name"))?
            .to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, full_text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrush::default()));
        let mut offset = 0usize;
        for span in &text.spans {
            let end = offset + span.text.len();
            builder.push(
                parley::style::StyleProperty::Brush(TextBrush {
                    r: span.color.r,
                    g: span.color.g,
                    b: span.color.b,
                    a: span.color.a,
                }),
                offset..end,
            );
            offset = end;
        }

        let mut layout: parley::Layout<TextBrush> = builder.build(full_text);
        layout.break_all_lines(Some(max_width_px));
        layout.align(
            Some(max_width_px),
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }

    fn image_paint(&mut self, image_ref: &ImageRef, grayscale: bool) -> DesignResult<ImagePaint> {
        let mut hasher = std::hash::DefaultHasher::new();
        image_ref.as_uri().hash(&mut hasher);
        grayscale.hash(&mut hasher);
        let key = hasher.finish();
        if let Some(cached) = self.image_cache.get(&key) {
            return Ok(cached.clone());
        }

        let decoded = image_ref.decode()?;
        let mut bytes = decoded.rgba8_premul.as_ref().clone();
        if grayscale {
            desaturate_premul_in_place(&mut bytes);
        }
        let pixmap = pixmap_from_premul_bytes(&bytes, decoded.width, decoded.height)?;
        let paint = ImagePaint {
            paint: vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            },
            w: decoded.width,
            h: decoded.height,
        };
        self.image_cache.insert(key, paint.clone());
        Ok(paint)
    }
}

fn draw_decoration(ctx: &mut vello_cpu::RenderContext, deco: &Decoration, rect: Rect) {
    ctx.set_transform(affine_to_cpu(Affine::translate((rect.x0, rect.y0))));
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    let local = Rect::new(0.0, 0.0, rect.width(), rect.height());
    match deco {
        Decoration::Fill {
            paint,
            corner_radius_frac,
        } => {
            set_paint(ctx, *paint, local);
            if *corner_radius_frac > 0.0 {
                let radius = corner_radius_frac * rect.width().min(rect.height());
                let rounded = kurbo::RoundedRect::from_rect(local, radius);
                ctx.fill_path(&bezpath_to_cpu(&kurbo::Shape::to_path(&rounded, 0.1)));
            } else {
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    local.x0, local.y0, local.x1, local.y1,
                ));
            }
        }
        Decoration::Path { d, view_box, paint } => {
            set_paint(ctx, *paint, local);
            let Ok(path) = BezPath::from_svg(d) else {
                // Path data is template-authored; a parse failure is a bug in
                // the template, not the composition. Skip drawing.
                tracing::warn!("invalid decoration path data");
                return;
            };
            let sx = rect.width() / view_box.0;
            let sy = rect.height() / view_box.1;
            let scaled = Affine::scale_non_uniform(sx, sy) * path;
            ctx.fill_path(&bezpath_to_cpu(&scaled));
        }
    }
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
}

fn set_paint(ctx: &mut vello_cpu::RenderContext, paint: Paint, local: Rect) {
    match paint {
        Paint::Solid(c) => {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
        }
        Paint::LinearGradient { start, end } => {
            let w = local.width().max(1.0) as u32;
            let h = local.height().max(1.0) as u32;
            match gradient_image(start, end, w, h) {
                Ok(img) => ctx.set_paint(img),
                Err(_) => {
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        start.r, start.g, start.b, start.a,
                    ));
                }
            }
        }
    }
}

// Diagonal top-left to bottom-right gradient as an image paint.
fn gradient_image(
    start: crate::foundation::core::Rgba8,
    end: crate::foundation::core::Rgba8,
    w: u32,
    h: u32,
) -> DesignResult<vello_cpu::Image> {
    let mut bytes = Vec::with_capacity((w as usize) * (h as usize) * 4);
    for y in 0..h {
        let ty = y as f64 / (h.max(2) - 1) as f64;
        for x in 0..w {
            let tx = x as f64 / (w.max(2) - 1) as f64;
            let t = (tx + ty) / 2.0;
            let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
            bytes.extend_from_slice(&[
                lerp(start.r, end.r),
                lerp(start.g, end.g),
                lerp(start.b, end.b),
                255,
            ]);
        }
    }
    let pixmap = pixmap_from_premul_bytes(&bytes, w, h)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn shape_path(shape: &RegionShape, local: Rect) -> BezPath {
    match shape {
        RegionShape::Rect => kurbo::Shape::to_path(&local, 0.1),
        RegionShape::RoundedRect { radius_frac } => {
            let radius = radius_frac * local.width().min(local.height());
            kurbo::Shape::to_path(&kurbo::RoundedRect::from_rect(local, radius), 0.1)
        }
        RegionShape::Circle => {
            let radius = local.width().min(local.height()) / 2.0;
            let circle = kurbo::Circle::new(local.center(), radius);
            kurbo::Shape::to_path(&circle, 0.1)
        }
        RegionShape::Polygon { points } => {
            let mut path = BezPath::new();
            let mut iter = points.iter();
            if let Some(&(x, y)) = iter.next() {
                path.move_to(Point::new(x * local.width(), y * local.height()));
                for &(x, y) in iter {
                    path.line_to(Point::new(x * local.width(), y * local.height()));
                }
                path.close_path();
            }
            path
        }
    }
}

// Luma of premultiplied channels equals premultiplied luma, so grayscale can
// be applied directly to premultiplied bytes.
fn desaturate_premul_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let luma = (px[0] as u32 * 299 + px[1] as u32 * 587 + px[2] as u32 * 114) / 1000;
        let luma = luma.min(255) as u8;
        px[0] = luma;
        px[1] = luma;
        px[2] = luma;
    }
}

/// Region-local drawing transform: translate to the region origin, rotating
/// about the region center when the slot is tilted. Both the slot content
/// and any placeholder label draw through the same transform.
fn region_transform(rect: Rect, rotation_deg: f64) -> Affine {
    let mut transform = Affine::translate((rect.x0, rect.y0));
    if rotation_deg != 0.0 {
        let center = Point::new(rect.width() / 2.0, rect.height() / 2.0);
        transform = transform * Affine::rotate_about(rotation_deg.to_radians(), center);
    }
    transform
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> DesignResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| DesignError::validation("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| DesignError::validation("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(DesignError::validation("pixmap byte length mismatch"));
    }
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
