pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Output canvas dimensions in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Aspect ratio of a template.
///
/// The ratio is a static property of the template, never of the content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AspectRatio {
    /// 1:1 post.
    Square,
    /// 16:9 post.
    Widescreen,
}

impl AspectRatio {
    /// Nominal layout canvas at pixel ratio 1.
    pub fn nominal_canvas(self) -> Canvas {
        match self {
            AspectRatio::Square => Canvas {
                width: 1080,
                height: 1080,
            },
            AspectRatio::Widescreen => Canvas {
                width: 1920,
                height: 1080,
            },
        }
    }

    /// Width divided by height.
    pub fn ratio(self) -> f64 {
        let c = self.nominal_canvas();
        f64::from(c.width) / f64::from(c.height)
    }
}

/// Fractional placement of a region relative to its parent.
///
/// All four components are fractions of the parent rectangle; `(0,0,1,1)`
/// fills the parent exactly. Values may exceed `[0,1]` when a region bleeds
/// over its parent edge, mirroring overflow in the source designs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelRect {
    /// Left edge as a fraction of the parent width.
    pub x: f64,
    /// Top edge as a fraction of the parent height.
    pub y: f64,
    /// Width as a fraction of the parent width.
    pub w: f64,
    /// Height as a fraction of the parent height.
    pub h: f64,
}

impl RelRect {
    /// The whole parent rectangle.
    pub const FULL: RelRect = RelRect {
        x: 0.0,
        y: 0.0,
        w: 1.0,
        h: 1.0,
    };

    /// Build a fractional rectangle.
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Resolve against a parent rectangle in absolute pixels.
    pub fn resolve(self, parent: Rect) -> Rect {
        let pw = parent.width();
        let ph = parent.height();
        Rect::new(
            parent.x0 + self.x * pw,
            parent.y0 + self.y * ph,
            parent.x0 + (self.x + self.w) * pw,
            parent.y0 + (self.y + self.h) * ph,
        )
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (straight).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque white.
    pub const WHITE: Rgba8 = Rgba8::rgb(255, 255, 255);
}
