//! Layout functions for the built-in templates.
//!
//! Each function maps a [`CompositionState`] plus a display date to a
//! [`VisualTree`]. Geometry is expressed in parent-relative fractions, so the
//! same tree scales to any pixel ratio at raster time. Font sizes are in
//! nominal canvas pixels (1080-wide square, 1920-wide widescreen).

use crate::composition::state::CompositionState;
use crate::foundation::core::{AspectRatio, RelRect, Rgba8};
use crate::foundation::date::to_bengali_digits;
use crate::layout::tree::{
    Decoration, FontRole, HAlign, ImageContent, ImageFit, ImageRegion, Paint, Region,
    RegionKind, RegionShape, TextRegion, TextSpan, TextStyle, VAlign, VisualTree, palette,
    slots,
};
use crate::template::registry::TemplateId;

const CANDIDATE_PLACEHOLDER_LABEL: &str = "প্রার্থীর ছবি";
const NEWS_PLACEHOLDER_LABEL: &str = "মূল ছবি";

// Separator wave between the photo and the footer on the facebook card.
const WAVE_D: &str = "M0 50 C 360 100, 1080 0, 1440 50 L 1440 100 L 0 100 Z";
const WAVE_VIEW_BOX: (f64, f64) = (1440.0, 100.0);

// Double opening quotation mark drawn as a filled path.
const QUOTE_GLYPH_D: &str = "M30 65 Q15 65 15 48 Q15 30 32 25 L36 33 Q25 37 25 46 \
     Q25 48 28 48 L38 48 L38 65 Z M62 65 Q47 65 47 48 Q47 30 64 25 L68 33 Q57 37 57 46 \
     Q57 48 60 48 L70 48 L70 65 Z";
const QUOTE_GLYPH_VIEW_BOX: (f64, f64) = (100.0, 100.0);

// Soft organic blob behind the portrait on the quote card.
const BLOB_D: &str = "M 350 80 C 420 160 380 280 280 330 C 180 380 60 340 30 240 \
     C 0 140 90 40 190 30 C 260 24 310 30 350 80 Z";
const BLOB_VIEW_BOX: (f64, f64) = (400.0, 400.0);

// Scenery for the hadith card: rolling hills, a mosque silhouette, and a
// foreground wave.
const HILLS_D: &str = "M0 180 C 200 120 350 200 500 160 C 650 120 800 190 1000 140 \
     L 1000 300 L 0 300 Z";
const HILLS_VIEW_BOX: (f64, f64) = (1000.0, 300.0);
const MOSQUE_D: &str = "M20 120 L20 70 Q20 55 35 55 Q50 55 50 70 L50 120 Z \
     M150 120 L150 70 Q150 55 165 55 Q180 55 180 70 L180 120 Z \
     M60 120 L60 60 Q100 10 140 60 L140 120 Z M95 28 L100 14 L105 28 Z";
const MOSQUE_VIEW_BOX: (f64, f64) = (200.0, 120.0);
const FRONT_WAVE_D: &str = "M0 80 C 250 20 500 120 750 60 C 850 40 950 60 1000 50 \
     L 1000 150 L 0 150 Z";
const FRONT_WAVE_VIEW_BOX: (f64, f64) = (1000.0, 150.0);

fn tree(template: TemplateId, aspect: AspectRatio, children: Vec<Region>) -> VisualTree {
    VisualTree {
        template,
        aspect,
        root: Region {
            name: "",
            bounds: RelRect::FULL,
            kind: RegionKind::Container { children },
        },
    }
}

fn fill(name: &'static str, bounds: RelRect, paint: Paint) -> Region {
    Region {
        name,
        bounds,
        kind: RegionKind::Decoration(Decoration::Fill {
            paint,
            corner_radius_frac: 0.0,
        }),
    }
}

fn rounded_fill(
    name: &'static str,
    bounds: RelRect,
    paint: Paint,
    corner_radius_frac: f64,
) -> Region {
    Region {
        name,
        bounds,
        kind: RegionKind::Decoration(Decoration::Fill {
            paint,
            corner_radius_frac,
        }),
    }
}

fn path(
    name: &'static str,
    bounds: RelRect,
    d: &'static str,
    view_box: (f64, f64),
    paint: Paint,
) -> Region {
    Region {
        name,
        bounds,
        kind: RegionKind::Decoration(Decoration::Path { d, view_box, paint }),
    }
}

fn text(name: &'static str, bounds: RelRect, region: TextRegion) -> Region {
    Region {
        name,
        bounds,
        kind: RegionKind::Text(region),
    }
}

fn style(font: FontRole, size: f64, align: HAlign, valign: VAlign) -> TextStyle {
    TextStyle {
        font,
        size,
        align,
        valign,
    }
}

fn candidate_content(state: &CompositionState) -> ImageContent {
    match state.candidate_image() {
        Some(image) => ImageContent::Bitmap(image.clone()),
        None => ImageContent::Placeholder {
            label: CANDIDATE_PLACEHOLDER_LABEL.to_owned(),
        },
    }
}

fn candidate_slot(state: &CompositionState, bounds: RelRect) -> Region {
    Region {
        name: slots::CANDIDATE,
        bounds,
        kind: RegionKind::Image(ImageRegion::cover(candidate_content(state))),
    }
}

/// Logo slot, or nothing at all when no logo is uploaded. An absent logo
/// leaves zero footprint: no frame, no placeholder, no reserved box.
fn logo_slot(state: &CompositionState, bounds: RelRect) -> Option<Region> {
    let image = state.logo_image()?.clone();
    Some(Region {
        name: slots::LOGO,
        bounds,
        kind: RegionKind::Image(ImageRegion {
            content: ImageContent::Bitmap(image),
            fit: ImageFit::Contain,
            shape: RegionShape::Rect,
            grayscale: false,
            rotation_deg: 0.0,
            align_x: HAlign::Center,
            align_y: VAlign::Center,
        }),
    })
}

fn date_slot(display_date: &str, bounds: RelRect, color: Rgba8, size: f64, align: HAlign) -> Region {
    text(
        slots::DATE,
        bounds,
        TextRegion::plain(
            display_date,
            color,
            style(FontRole::Date, size, align, VAlign::Center),
        ),
    )
}

/// Photo-dominant card: portrait over the top two thirds, a white wave
/// separator, and a footer with quote, logo, and date.
pub fn facebook(state: &CompositionState, display_date: &str) -> VisualTree {
    let mut children = vec![
        candidate_slot(state, RelRect::new(0.0, 0.0, 1.0, 0.65)),
        path(
            "",
            RelRect::new(0.0, 0.60, 1.0, 0.07),
            WAVE_D,
            WAVE_VIEW_BOX,
            Paint::Solid(Rgba8::WHITE),
        ),
        fill("", RelRect::new(0.0, 0.65, 1.0, 0.35), Paint::Solid(Rgba8::WHITE)),
        text(
            slots::QUOTE,
            RelRect::new(0.06, 0.67, 0.88, 0.20),
            TextRegion::plain(
                format!("\u{201c}{}\u{201d}", state.display_text()),
                palette::GREEN_900,
                style(FontRole::Quote, 52.0, HAlign::Center, VAlign::Center),
            ),
        ),
        date_slot(
            display_date,
            RelRect::new(0.55, 0.90, 0.39, 0.06),
            palette::SLATE_600,
            30.0,
            HAlign::End,
        ),
    ];
    children.extend(logo_slot(state, RelRect::new(0.06, 0.88, 0.08, 0.08)));
    tree(TemplateId::Facebook, AspectRatio::Square, children)
}

/// Widescreen thumbnail: gradient text panel on the left, slanted portrait
/// on the right.
pub fn youtube(state: &CompositionState, display_date: &str) -> VisualTree {
    let mut children = vec![
        fill(
            "",
            RelRect::new(0.0, 0.0, 0.5, 1.0),
            Paint::LinearGradient {
                start: palette::GREEN_700,
                end: palette::GREEN_900,
            },
        ),
        Region {
            name: slots::CANDIDATE,
            bounds: RelRect::new(0.5, 0.0, 0.5, 1.0),
            kind: RegionKind::Image(ImageRegion {
                shape: RegionShape::Polygon {
                    points: &[(0.25, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
                },
                ..ImageRegion::cover(candidate_content(state))
            }),
        },
        fill(
            "",
            RelRect::new(0.04, 0.22, 0.06, 0.012),
            Paint::Solid(palette::RED_600),
        ),
        path(
            "",
            RelRect::new(0.04, 0.25, 0.05, 0.09),
            QUOTE_GLYPH_D,
            QUOTE_GLYPH_VIEW_BOX,
            Paint::Solid(palette::RED_500),
        ),
        text(
            slots::QUOTE,
            RelRect::new(0.04, 0.36, 0.42, 0.44),
            TextRegion::plain(
                state.display_text(),
                Rgba8::WHITE,
                style(FontRole::Quote, 64.0, HAlign::Start, VAlign::Top),
            ),
        ),
        date_slot(
            display_date,
            RelRect::new(0.04, 0.85, 0.42, 0.08),
            palette::GREEN_50,
            32.0,
            HAlign::Start,
        ),
    ];
    children.extend(logo_slot(state, RelRect::new(0.04, 0.06, 0.07, 0.12)));
    tree(TemplateId::Youtube, AspectRatio::Widescreen, children)
}

/// Square card with a circular portrait over a pale green ground.
pub fn instagram(state: &CompositionState, display_date: &str) -> VisualTree {
    let mut children = vec![
        fill("", RelRect::FULL, Paint::Solid(palette::GREEN_50)),
        date_slot(
            display_date,
            RelRect::new(0.55, 0.06, 0.40, 0.05),
            palette::SLATE_600,
            28.0,
            HAlign::End,
        ),
        Region {
            name: slots::CANDIDATE,
            bounds: RelRect::new(0.25, 0.16, 0.5, 0.5),
            kind: RegionKind::Image(ImageRegion {
                shape: RegionShape::Circle,
                ..ImageRegion::cover(candidate_content(state))
            }),
        },
        path(
            "",
            RelRect::new(0.10, 0.68, 0.07, 0.07),
            QUOTE_GLYPH_D,
            QUOTE_GLYPH_VIEW_BOX,
            Paint::Solid(palette::RED_500),
        ),
        text(
            slots::QUOTE,
            RelRect::new(0.10, 0.75, 0.80, 0.18),
            TextRegion::plain(
                state.display_text(),
                palette::GREEN_900,
                style(FontRole::Quote, 44.0, HAlign::Center, VAlign::Top),
            ),
        ),
    ];
    children.extend(logo_slot(state, RelRect::new(0.05, 0.05, 0.10, 0.10)));
    tree(TemplateId::Instagram, AspectRatio::Square, children)
}

/// Minimal quote card: grayscale portrait bottom-right over a soft blob,
/// big quote mark, date chip, text on the left.
pub fn quote(state: &CompositionState, display_date: &str) -> VisualTree {
    let mut children = vec![
        fill("", RelRect::FULL, Paint::Solid(Rgba8::WHITE)),
        path(
            "",
            RelRect::new(0.50, 0.05, 0.48, 0.48),
            BLOB_D,
            BLOB_VIEW_BOX,
            Paint::Solid(palette::GREEN_50),
        ),
        Region {
            name: slots::CANDIDATE,
            bounds: RelRect::new(0.40, 0.10, 0.60, 0.90),
            kind: RegionKind::Image(ImageRegion {
                fit: ImageFit::Contain,
                grayscale: true,
                align_x: HAlign::End,
                align_y: VAlign::Bottom,
                ..ImageRegion::cover(candidate_content(state))
            }),
        },
        path(
            "",
            RelRect::new(0.06, 0.10, 0.09, 0.09),
            QUOTE_GLYPH_D,
            QUOTE_GLYPH_VIEW_BOX,
            Paint::Solid(palette::RED_500),
        ),
        rounded_fill(
            "",
            RelRect::new(0.06, 0.22, 0.22, 0.05),
            Paint::Solid(palette::GREEN_700),
            0.5,
        ),
        date_slot(
            display_date,
            RelRect::new(0.06, 0.22, 0.22, 0.05),
            Rgba8::WHITE,
            26.0,
            HAlign::Center,
        ),
        text(
            slots::QUOTE,
            RelRect::new(0.06, 0.32, 0.55, 0.40),
            TextRegion::plain(
                state.display_text(),
                palette::SLATE_800,
                style(FontRole::Quote, 48.0, HAlign::Start, VAlign::Top),
            ),
        ),
    ];
    children.extend(logo_slot(state, RelRect::new(0.06, 0.88, 0.08, 0.08)));
    tree(TemplateId::Quote, AspectRatio::Square, children)
}

/// Speech excerpt: deep red ground, quote on the left three fifths, full
/// height portrait on the right.
pub fn speech(state: &CompositionState, _display_date: &str) -> VisualTree {
    let children = vec![
        fill("", RelRect::FULL, Paint::Solid(palette::RED_800)),
        candidate_slot(state, RelRect::new(0.60, 0.0, 0.40, 1.0)),
        path(
            "",
            RelRect::new(0.04, 0.04, 0.14, 0.14),
            QUOTE_GLYPH_D,
            QUOTE_GLYPH_VIEW_BOX,
            Paint::Solid(Rgba8::rgba(0xff, 0xff, 0xff, 0x3c)),
        ),
        text(
            slots::QUOTE,
            RelRect::new(0.06, 0.22, 0.50, 0.48),
            TextRegion::plain(
                state.display_text(),
                Rgba8::WHITE,
                style(FontRole::Quote, 54.0, HAlign::Start, VAlign::Top),
            ),
        ),
        text(
            "",
            RelRect::new(0.06, 0.76, 0.50, 0.06),
            TextRegion::plain(
                "-- প্রার্থীর নাম",
                Rgba8::rgba(0xff, 0xff, 0xff, 0xd9),
                style(FontRole::Date, 30.0, HAlign::Start, VAlign::Center),
            ),
        ),
    ];
    tree(TemplateId::Speech, AspectRatio::Square, children)
}

/// Committee panel: title and subtitle on a white sidebar, a two-by-two
/// grid of slightly rotated member cards on a green ground. The first card
/// is the candidate; the rest stay placeholders.
pub fn panel(state: &CompositionState, _display_date: &str) -> VisualTree {
    let (title, subtitle) = match state.display_text().split_once(':') {
        Some((t, s)) => (t.trim().to_owned(), Some(s.trim().to_owned())),
        None => (state.display_text().trim().to_owned(), None),
    };

    let mut children = vec![
        fill("", RelRect::new(0.0, 0.0, 0.40, 1.0), Paint::Solid(Rgba8::WHITE)),
        fill(
            "",
            RelRect::new(0.40, 0.0, 0.60, 1.0),
            Paint::Solid(palette::GREEN_800),
        ),
        text(
            slots::QUOTE,
            RelRect::new(0.04, 0.14, 0.32, 0.20),
            TextRegion::plain(
                title,
                palette::GREEN_900,
                style(FontRole::Quote, 56.0, HAlign::Start, VAlign::Top),
            ),
        ),
        fill(
            "",
            RelRect::new(0.04, 0.36, 0.10, 0.008),
            Paint::Solid(palette::GREEN_700),
        ),
        text(
            "",
            RelRect::new(0.04, 0.88, 0.32, 0.05),
            TextRegion::plain(
                "-- বক্তার নাম",
                palette::SLATE_500,
                style(FontRole::Date, 26.0, HAlign::Start, VAlign::Center),
            ),
        ),
    ];
    if let Some(subtitle) = subtitle {
        children.push(text(
            "",
            RelRect::new(0.04, 0.40, 0.32, 0.30),
            TextRegion::plain(
                subtitle,
                palette::SLATE_600,
                style(FontRole::Quote, 34.0, HAlign::Start, VAlign::Top),
            ),
        ));
    }

    let grid = [
        RelRect::new(0.44, 0.06, 0.24, 0.42),
        RelRect::new(0.72, 0.06, 0.24, 0.42),
        RelRect::new(0.44, 0.52, 0.24, 0.42),
        RelRect::new(0.72, 0.52, 0.24, 0.42),
    ];
    for (i, bounds) in grid.into_iter().enumerate() {
        let content = if i == 0 {
            candidate_content(state)
        } else {
            ImageContent::Placeholder {
                label: format!("সদস্য {}", to_bengali_digits(i as u32 + 1)),
            }
        };
        let rotation = if i % 2 == 0 { -3.0 } else { 3.0 };
        children.push(Region {
            name: if i == 0 { slots::CANDIDATE } else { slots::MEMBER },
            bounds,
            kind: RegionKind::Image(ImageRegion {
                shape: RegionShape::RoundedRect { radius_frac: 0.08 },
                rotation_deg: rotation,
                ..ImageRegion::cover(content)
            }),
        });
    }

    tree(TemplateId::Panel, AspectRatio::Square, children)
}

/// Hadith card with fixed text over hill and mosque scenery. The quote is
/// part of the design and does not track the composed display text.
pub fn hadith(state: &CompositionState, _display_date: &str) -> VisualTree {
    let mut children = vec![
        fill("", RelRect::FULL, Paint::Solid(palette::SLATE_50)),
        path(
            "",
            RelRect::new(0.0, 0.70, 1.0, 0.30),
            HILLS_D,
            HILLS_VIEW_BOX,
            Paint::Solid(palette::GREEN_700),
        ),
        path(
            "",
            RelRect::new(0.32, 0.56, 0.36, 0.22),
            MOSQUE_D,
            MOSQUE_VIEW_BOX,
            Paint::Solid(palette::GREEN_900),
        ),
        path(
            "",
            RelRect::new(0.0, 0.86, 1.0, 0.14),
            FRONT_WAVE_D,
            FRONT_WAVE_VIEW_BOX,
            Paint::Solid(palette::GREEN_800),
        ),
        text(
            "",
            RelRect::new(0.10, 0.12, 0.80, 0.06),
            TextRegion::plain(
                "রাসূলুল্লাহ (স:) বলেছেন,",
                palette::SLATE_600,
                style(FontRole::Date, 34.0, HAlign::Center, VAlign::Center),
            ),
        ),
        text(
            slots::QUOTE,
            RelRect::new(0.10, 0.22, 0.80, 0.26),
            TextRegion {
                spans: vec![
                    TextSpan {
                        text: "আল্লাহর রাস্তায় কাজ করতে গিয়ে কোনো ".to_owned(),
                        color: palette::SLATE_800,
                    },
                    TextSpan {
                        text: "নিন্দুকের তিরস্কারকে".to_owned(),
                        color: palette::RED_600,
                    },
                    TextSpan {
                        text: " ভয় করো না।".to_owned(),
                        color: palette::SLATE_800,
                    },
                ],
                style: style(FontRole::Quote, 52.0, HAlign::Center, VAlign::Top),
            },
        ),
        text(
            "",
            RelRect::new(0.10, 0.50, 0.80, 0.05),
            TextRegion::plain(
                "- শুআবুল ঈমান",
                palette::SLATE_500,
                style(FontRole::Date, 30.0, HAlign::Center, VAlign::Center),
            ),
        ),
    ];
    children.extend(logo_slot(state, RelRect::new(0.46, 0.88, 0.08, 0.08)));
    tree(TemplateId::Hadith, AspectRatio::Square, children)
}

/// News-style card: header row, red-framed photo, headline over a
/// translucent backdrop, and a call-to-action pill.
pub fn news(state: &CompositionState, display_date: &str) -> VisualTree {
    let photo_content = match state.candidate_image() {
        Some(image) => ImageContent::Bitmap(image.clone()),
        None => ImageContent::Placeholder {
            label: NEWS_PLACEHOLDER_LABEL.to_owned(),
        },
    };
    let mut children = vec![
        fill("", RelRect::FULL, Paint::Solid(palette::SLATE_100)),
        date_slot(
            display_date,
            RelRect::new(0.55, 0.045, 0.41, 0.05),
            palette::SLATE_700,
            28.0,
            HAlign::End,
        ),
        rounded_fill(
            "",
            RelRect::new(0.06, 0.14, 0.88, 0.52),
            Paint::Solid(palette::RED_700),
            0.04,
        ),
        Region {
            name: slots::CANDIDATE,
            bounds: RelRect::new(0.08, 0.16, 0.84, 0.48),
            kind: RegionKind::Image(ImageRegion {
                shape: RegionShape::RoundedRect { radius_frac: 0.03 },
                ..ImageRegion::cover(photo_content)
            }),
        },
        rounded_fill(
            "",
            RelRect::new(0.06, 0.70, 0.88, 0.16),
            Paint::Solid(Rgba8::rgba(0xff, 0xff, 0xff, 0xe6)),
            0.05,
        ),
        text(
            slots::HEADLINE,
            RelRect::new(0.08, 0.72, 0.84, 0.12),
            TextRegion::plain(
                state.display_text(),
                palette::RED_700,
                style(FontRole::Quote, 46.0, HAlign::Center, VAlign::Center),
            ),
        ),
        rounded_fill(
            "",
            RelRect::new(0.30, 0.90, 0.40, 0.06),
            Paint::Solid(palette::RED_600),
            0.5,
        ),
        text(
            "",
            RelRect::new(0.30, 0.90, 0.40, 0.06),
            TextRegion::plain(
                "বিস্তারিত কমেন্টে",
                Rgba8::WHITE,
                style(FontRole::Date, 28.0, HAlign::Center, VAlign::Center),
            ),
        ),
    ];
    children.extend(logo_slot(state, RelRect::new(0.04, 0.03, 0.08, 0.08)));
    tree(TemplateId::News, AspectRatio::Square, children)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/templates.rs"]
mod tests;
