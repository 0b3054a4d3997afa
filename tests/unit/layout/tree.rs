use super::*;
use crate::foundation::core::{AspectRatio, RelRect, Rgba8};
use crate::template::registry::TemplateId;

fn leaf(name: &'static str) -> Region {
    Region {
        name,
        bounds: RelRect::new(0.1, 0.1, 0.5, 0.5),
        kind: RegionKind::Decoration(Decoration::Fill {
            paint: Paint::Solid(Rgba8::WHITE),
            corner_radius_frac: 0.0,
        }),
    }
}

fn sample_tree() -> VisualTree {
    VisualTree {
        template: TemplateId::Facebook,
        aspect: AspectRatio::Square,
        root: Region {
            name: "",
            bounds: RelRect::FULL,
            kind: RegionKind::Container {
                children: vec![
                    leaf(slots::DATE),
                    Region {
                        name: "",
                        bounds: RelRect::FULL,
                        kind: RegionKind::Container {
                            children: vec![leaf(slots::DATE), leaf(slots::QUOTE)],
                        },
                    },
                ],
            },
        },
    }
}

#[test]
fn walk_visits_depth_first() {
    let tree = sample_tree();
    let mut count = 0;
    tree.walk(&mut |_| count += 1);
    // Root, two top-level children, two nested leaves.
    assert_eq!(count, 5);
}

#[test]
fn regions_named_finds_nested_slots() {
    let tree = sample_tree();
    assert_eq!(tree.regions_named(slots::DATE).len(), 2);
    assert_eq!(tree.regions_named(slots::QUOTE).len(), 1);
    assert!(tree.regions_named(slots::LOGO).is_empty());
}

#[test]
fn full_text_concatenates_spans() {
    let region = TextRegion {
        spans: vec![
            TextSpan {
                text: "ab".to_owned(),
                color: Rgba8::WHITE,
            },
            TextSpan {
                text: "cd".to_owned(),
                color: Rgba8::rgb(0, 0, 0),
            },
        ],
        style: TextStyle {
            font: FontRole::Quote,
            size: 10.0,
            align: HAlign::Start,
            valign: VAlign::Top,
        },
    };
    assert_eq!(region.full_text(), "abcd");
}
