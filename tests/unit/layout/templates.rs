use super::*;
use crate::assets::image::ImageRef;
use crate::composition::state::{CompositionState, PLACEHOLDER_DISPLAY_TEXT};
use crate::template::registry::{TemplateId, list_templates};

const DATE: &str = "৫ জানুয়ারি ২০২৪";

fn tiny_image() -> ImageRef {
    ImageRef::from_bytes("image/png", b"\x89PNG-fake")
}

fn state_with_text(text: &str) -> CompositionState {
    let mut state = CompositionState::new();
    state.set_raw_text("raw");
    let ticket = state.begin_summary().unwrap();
    assert!(state.apply_summary(ticket, Ok(text.to_owned())));
    state
}

fn all_trees(state: &CompositionState) -> Vec<VisualTree> {
    list_templates()
        .iter()
        .map(|t| t.layout(state, DATE))
        .collect()
}

#[test]
fn equal_state_and_date_yield_structurally_equal_trees() {
    let empty = CompositionState::new();
    let mut populated = state_with_text("ভোট দিন, দেশ গড়ুন।");
    populated.set_candidate_image(Some(tiny_image()));
    populated.set_logo_image(Some(tiny_image()));

    for state in [&empty, &populated] {
        for template in list_templates() {
            assert_eq!(
                template.layout(state, DATE),
                template.layout(state, DATE),
                "{} must lay out deterministically",
                template.id
            );
        }
    }
}

#[test]
fn every_template_roots_at_full_canvas() {
    let state = CompositionState::new();
    for template in list_templates() {
        let tree = template.layout(&state, DATE);
        assert_eq!(tree.template, template.id);
        assert_eq!(tree.aspect, template.aspect);
        assert_eq!(tree.root.bounds, RelRect::FULL);
    }
}

#[test]
fn candidate_slot_is_placeholder_until_upload() {
    let state = CompositionState::new();
    for tree in all_trees(&state) {
        let candidates = tree.regions_named(slots::CANDIDATE);
        assert_eq!(candidates.len(), 1, "{} needs a candidate slot", tree.template);
        let RegionKind::Image(image) = &candidates[0].kind else {
            panic!("candidate slot must be an image region");
        };
        assert!(matches!(image.content, ImageContent::Placeholder { .. }));
    }
}

#[test]
fn uploaded_candidate_replaces_placeholder_everywhere() {
    let mut state = CompositionState::new();
    state.set_candidate_image(Some(tiny_image()));
    for tree in all_trees(&state) {
        let candidates = tree.regions_named(slots::CANDIDATE);
        let RegionKind::Image(image) = &candidates[0].kind else {
            panic!("candidate slot must be an image region");
        };
        assert!(
            matches!(image.content, ImageContent::Bitmap(_)),
            "{} must show the upload",
            tree.template
        );
    }
}

#[test]
fn absent_logo_leaves_no_footprint() {
    let state = CompositionState::new();
    for tree in all_trees(&state) {
        assert!(
            tree.regions_named(slots::LOGO).is_empty(),
            "{} must not reserve space for a missing logo",
            tree.template
        );
    }
}

#[test]
fn present_logo_appears_where_the_design_has_one() {
    let mut state = CompositionState::new();
    state.set_logo_image(Some(tiny_image()));
    let with_logo = [
        TemplateId::Facebook,
        TemplateId::Youtube,
        TemplateId::Instagram,
        TemplateId::Quote,
        TemplateId::Hadith,
        TemplateId::News,
    ];
    for tree in all_trees(&state) {
        let logos = tree.regions_named(slots::LOGO);
        if with_logo.contains(&tree.template) {
            assert_eq!(logos.len(), 1, "{} should show the logo", tree.template);
        } else {
            assert!(logos.is_empty(), "{} has no logo slot", tree.template);
        }
    }
}

#[test]
fn dated_templates_show_the_passed_date() {
    let state = CompositionState::new();
    let dated = [
        TemplateId::Facebook,
        TemplateId::Youtube,
        TemplateId::Instagram,
        TemplateId::Quote,
        TemplateId::News,
    ];
    for tree in all_trees(&state) {
        let dates = tree.regions_named(slots::DATE);
        if dated.contains(&tree.template) {
            assert_eq!(dates.len(), 1, "{} should carry a date", tree.template);
            let RegionKind::Text(text) = &dates[0].kind else {
                panic!("date slot must be text");
            };
            assert_eq!(text.full_text(), DATE);
        } else {
            assert!(dates.is_empty(), "{} has no date slot", tree.template);
        }
    }
}

#[test]
fn placeholder_text_shows_before_generation() {
    let state = CompositionState::new();
    let tree = instagram(&state, DATE);
    let quote = tree.regions_named(slots::QUOTE);
    let RegionKind::Text(text) = &quote[0].kind else {
        panic!("quote slot must be text");
    };
    assert_eq!(text.full_text(), PLACEHOLDER_DISPLAY_TEXT);
}

#[test]
fn facebook_wraps_the_quote_in_quotation_marks() {
    let state = state_with_text("ভোট দিন");
    let tree = facebook(&state, DATE);
    let RegionKind::Text(text) = &tree.regions_named(slots::QUOTE)[0].kind else {
        panic!("quote slot must be text");
    };
    assert_eq!(text.full_text(), "“ভোট দিন”");
}

#[test]
fn generated_text_flows_into_quote_slots() {
    let state = state_with_text("নতুন উক্তি");
    for id in [
        TemplateId::Youtube,
        TemplateId::Instagram,
        TemplateId::Quote,
        TemplateId::Speech,
        TemplateId::News,
    ] {
        let mut s = state.clone();
        s.select_template(id);
        let tree = s.layout(DATE);
        let slot = if id == TemplateId::News {
            slots::HEADLINE
        } else {
            slots::QUOTE
        };
        let region = tree.regions_named(slot)[0];
        let RegionKind::Text(text) = &region.kind else {
            panic!("slot must be text");
        };
        assert_eq!(text.full_text(), "নতুন উক্তি");
    }
}

#[test]
fn panel_splits_title_and_subtitle_on_first_colon() {
    let state = state_with_text("শিরোনাম: বিস্তারিত অংশ");
    let tree = panel(&state, DATE);
    let title = tree.regions_named(slots::QUOTE);
    let RegionKind::Text(text) = &title[0].kind else {
        panic!("title must be text");
    };
    assert_eq!(text.full_text(), "শিরোনাম");

    // A text region carrying the remainder must exist.
    let mut found_subtitle = false;
    tree.walk(&mut |r| {
        if let RegionKind::Text(t) = &r.kind {
            if t.full_text() == "বিস্তারিত অংশ" {
                found_subtitle = true;
            }
        }
    });
    assert!(found_subtitle);
}

#[test]
fn panel_without_colon_has_title_only() {
    let state = state_with_text("শুধু শিরোনাম");
    let tree = panel(&state, DATE);
    let RegionKind::Text(text) = &tree.regions_named(slots::QUOTE)[0].kind else {
        panic!("title must be text");
    };
    assert_eq!(text.full_text(), "শুধু শিরোনাম");
}

#[test]
fn panel_keeps_three_member_placeholders() {
    let mut state = CompositionState::new();
    state.set_candidate_image(Some(tiny_image()));
    let tree = panel(&state, DATE);
    let members = tree.regions_named(slots::MEMBER);
    assert_eq!(members.len(), 3);
    for member in members {
        let RegionKind::Image(image) = &member.kind else {
            panic!("member cards are image regions");
        };
        assert!(matches!(image.content, ImageContent::Placeholder { .. }));
        assert!(image.rotation_deg.abs() > 0.0);
    }
}

#[test]
fn hadith_text_ignores_composed_quote() {
    let state = state_with_text("এই লেখা দেখা যাবে না");
    let tree = hadith(&state, DATE);
    let RegionKind::Text(text) = &tree.regions_named(slots::QUOTE)[0].kind else {
        panic!("hadith quote must be text");
    };
    assert_eq!(text.spans.len(), 3);
    assert!(text.full_text().contains("নিন্দুকের তিরস্কারকে"));
    assert!(!text.full_text().contains("দেখা যাবে না"));
}

#[test]
fn news_photo_placeholder_uses_its_own_label() {
    let state = CompositionState::new();
    let tree = news(&state, DATE);
    let RegionKind::Image(image) = &tree.regions_named(slots::CANDIDATE)[0].kind else {
        panic!("news photo must be an image region");
    };
    let ImageContent::Placeholder { label } = &image.content else {
        panic!("news photo starts as a placeholder");
    };
    assert_eq!(label, NEWS_PLACEHOLDER_LABEL);
}

#[test]
fn quote_template_uses_grayscale_contain_portrait() {
    let state = CompositionState::new();
    let tree = quote(&state, DATE);
    let RegionKind::Image(image) = &tree.regions_named(slots::CANDIDATE)[0].kind else {
        panic!("quote portrait must be an image region");
    };
    assert!(image.grayscale);
    assert_eq!(image.fit, ImageFit::Contain);
}
