//! Resolved visual tree produced by template layout.
//!
//! A [`VisualTree`] is a pure description of what to draw: nested regions
//! with relative geometry, image slots, styled text, and decorative shapes.
//! It carries no pixels and no font data, which keeps layout deterministic
//! and cheap to rebuild on every state change.

use crate::assets::image::ImageRef;
use crate::foundation::core::{AspectRatio, RelRect, Rgba8};
use crate::template::registry::TemplateId;

/// Well-known region names used by template layouts.
pub mod slots {
    /// Candidate portrait slot.
    pub const CANDIDATE: &str = "candidate";
    /// Organization logo slot.
    pub const LOGO: &str = "logo";
    /// Main quote text block.
    pub const QUOTE: &str = "quote";
    /// Display date text block.
    pub const DATE: &str = "date";
    /// Panel member slot (cards beyond the candidate).
    pub const MEMBER: &str = "member";
    /// News headline text block.
    pub const HEADLINE: &str = "headline";
}

/// Tailwind palette values used by the built-in templates.
pub(crate) mod palette {
    use crate::foundation::core::Rgba8;

    pub const GREEN_700: Rgba8 = Rgba8::rgb(0x15, 0x80, 0x3d);
    pub const GREEN_800: Rgba8 = Rgba8::rgb(0x16, 0x65, 0x34);
    pub const GREEN_900: Rgba8 = Rgba8::rgb(0x14, 0x53, 0x2d);
    pub const GREEN_50: Rgba8 = Rgba8::rgb(0xf0, 0xfd, 0xf4);
    pub const RED_500: Rgba8 = Rgba8::rgb(0xef, 0x44, 0x44);
    pub const RED_600: Rgba8 = Rgba8::rgb(0xdc, 0x26, 0x26);
    pub const RED_700: Rgba8 = Rgba8::rgb(0xb9, 0x1c, 0x1c);
    pub const RED_800: Rgba8 = Rgba8::rgb(0x99, 0x1b, 0x1b);
    pub const SLATE_50: Rgba8 = Rgba8::rgb(0xf8, 0xfa, 0xfc);
    pub const SLATE_100: Rgba8 = Rgba8::rgb(0xf1, 0xf5, 0xf9);
    pub const SLATE_200: Rgba8 = Rgba8::rgb(0xe2, 0xe8, 0xf0);
    pub const SLATE_500: Rgba8 = Rgba8::rgb(0x64, 0x74, 0x8b);
    pub const SLATE_600: Rgba8 = Rgba8::rgb(0x47, 0x55, 0x69);
    pub const SLATE_700: Rgba8 = Rgba8::rgb(0x33, 0x41, 0x55);
    pub const SLATE_800: Rgba8 = Rgba8::rgb(0x1e, 0x29, 0x3b);
}

/// Root of a fully resolved layout for one template at one composition state.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualTree {
    /// The template this tree was produced by.
    pub template: TemplateId,
    /// Canvas aspect the tree is designed for.
    pub aspect: AspectRatio,
    /// Root region, always spanning the full canvas.
    pub root: Region,
}

impl VisualTree {
    /// Visit every region in the tree, depth first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Region)) {
        fn go<'a>(region: &'a Region, visit: &mut impl FnMut(&'a Region)) {
            visit(region);
            if let RegionKind::Container { children } = &region.kind {
                for child in children {
                    go(child, visit);
                }
            }
        }
        go(&self.root, visit);
    }

    /// Collect every region carrying the given slot name.
    pub fn regions_named(&self, name: &str) -> Vec<&Region> {
        let mut out = Vec::new();
        self.walk(&mut |r| {
            if r.name == name {
                out.push(r);
            }
        });
        out
    }
}

/// One node of the visual tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    /// Slot name, empty for anonymous structural regions.
    pub name: &'static str,
    /// Bounds relative to the parent region.
    pub bounds: RelRect,
    /// Content of the region.
    pub kind: RegionKind,
}

/// Content variants for a region.
#[derive(Clone, Debug, PartialEq)]
pub enum RegionKind {
    /// Structural grouping; children are resolved against this region.
    Container {
        /// Child regions in paint order.
        children: Vec<Region>,
    },
    /// A raster image slot.
    Image(ImageRegion),
    /// A styled text block.
    Text(TextRegion),
    /// A decorative fill or vector path.
    Decoration(Decoration),
}

/// An image slot and how to render it.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageRegion {
    /// What fills the slot.
    pub content: ImageContent,
    /// Scaling rule applied when the image and slot aspects differ.
    pub fit: ImageFit,
    /// Clip shape applied to the slot.
    pub shape: RegionShape,
    /// Render in grayscale.
    pub grayscale: bool,
    /// Rotation about the slot center, in degrees.
    pub rotation_deg: f64,
    /// Horizontal alignment for [`ImageFit::Contain`].
    pub align_x: HAlign,
    /// Vertical alignment for [`ImageFit::Contain`].
    pub align_y: VAlign,
}

impl ImageRegion {
    /// A plain cover-fit rectangular slot for the given content.
    pub fn cover(content: ImageContent) -> Self {
        Self {
            content,
            fit: ImageFit::Cover,
            shape: RegionShape::Rect,
            grayscale: false,
            rotation_deg: 0.0,
            align_x: HAlign::Center,
            align_y: VAlign::Center,
        }
    }
}

/// What an image slot shows.
#[derive(Clone, Debug, PartialEq)]
pub enum ImageContent {
    /// An uploaded image.
    Bitmap(ImageRef),
    /// Nothing uploaded yet; render a neutral placeholder with a label.
    Placeholder {
        /// Label drawn centered in the placeholder.
        label: String,
    },
}

/// Scaling rule for images inside their slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFit {
    /// Scale to fully cover the slot, cropping the overflow.
    Cover,
    /// Scale to fit entirely inside the slot, leaving margins.
    Contain,
}

/// Clip shape of an image slot.
#[derive(Clone, Debug, PartialEq)]
pub enum RegionShape {
    /// No clipping beyond the slot bounds.
    Rect,
    /// Rounded rectangle; radius as a fraction of the shorter slot edge.
    RoundedRect {
        /// Corner radius fraction in `0.0..=0.5`.
        radius_frac: f64,
    },
    /// Inscribed circle.
    Circle,
    /// Convex polygon with vertices in unit slot coordinates.
    Polygon {
        /// `(x, y)` vertices, each in `0.0..=1.0`.
        points: &'static [(f64, f64)],
    },
}

/// A block of styled text made of one or more colored spans.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRegion {
    /// Runs of text in order; colors may differ per span.
    pub spans: Vec<TextSpan>,
    /// Shared style for the whole block.
    pub style: TextStyle,
}

impl TextRegion {
    /// Single-span text block.
    pub fn plain(text: impl Into<String>, color: Rgba8, style: TextStyle) -> Self {
        Self {
            spans: vec![TextSpan {
                text: text.into(),
                color,
            }],
            style,
        }
    }

    /// Concatenated text of all spans.
    pub fn full_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// One colored run of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextSpan {
    /// The run's characters.
    pub text: String,
    /// Fill color.
    pub color: Rgba8,
}

/// Typographic style of a text block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Which registered font family to shape with.
    pub font: FontRole,
    /// Font size in nominal canvas pixels.
    pub size: f64,
    /// Horizontal alignment inside the region.
    pub align: HAlign,
    /// Vertical alignment inside the region.
    pub valign: VAlign,
}

/// Font families the templates draw with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontRole {
    /// Serif face used for quotes and headings.
    Quote,
    /// Text face used for dates and small print.
    Date,
}

/// Horizontal alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    /// Leading edge.
    Start,
    /// Centered.
    Center,
    /// Trailing edge.
    End,
}

/// Vertical alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    /// Top edge.
    Top,
    /// Centered.
    Center,
    /// Bottom edge.
    Bottom,
}

/// Decorative, non-content drawing.
#[derive(Clone, Debug, PartialEq)]
pub enum Decoration {
    /// Fill the region with a paint.
    Fill {
        /// Fill paint.
        paint: Paint,
        /// Corner radius as a fraction of the shorter region edge.
        corner_radius_frac: f64,
    },
    /// Fill an SVG path, scaled from its view box to the region.
    Path {
        /// SVG path data.
        d: &'static str,
        /// `(width, height)` of the path's design space.
        view_box: (f64, f64),
        /// Fill paint.
        paint: Paint,
    },
}

/// Fill paint for decorations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    /// Flat color.
    Solid(Rgba8),
    /// Diagonal gradient from the top-left to the bottom-right corner.
    LinearGradient {
        /// Color at the top-left corner.
        start: Rgba8,
        /// Color at the bottom-right corner.
        end: Rgba8,
    },
}

#[cfg(test)]
#[path = "../../tests/unit/layout/tree.rs"]
mod tests;
