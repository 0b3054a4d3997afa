//! The fixed catalog of built-in templates.

use crate::composition::state::CompositionState;
use crate::foundation::core::AspectRatio;
use crate::foundation::error::{DesignError, DesignResult};
use crate::layout::templates;
use crate::layout::tree::VisualTree;

/// Identifier of a built-in template.
///
/// The set is closed: every value names a template that exists, so lookups
/// by `TemplateId` are total. Parsing from a string is the only fallible
/// boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemplateId {
    /// Photo-dominant post with a wave-separated footer.
    Facebook,
    /// Widescreen thumbnail with a gradient text panel.
    Youtube,
    /// Square card with a circular portrait.
    Instagram,
    /// Minimal quote card with a grayscale portrait.
    Quote,
    /// Speech excerpt split between text and photo.
    Speech,
    /// Committee panel with rotated member cards.
    Panel,
    /// Fixed hadith card with scenery decorations.
    Hadith,
    /// News-style headline card.
    News,
}

impl TemplateId {
    /// Every template in canonical presentation order.
    pub const ALL: [TemplateId; 8] = [
        TemplateId::Facebook,
        TemplateId::Youtube,
        TemplateId::Instagram,
        TemplateId::Quote,
        TemplateId::Speech,
        TemplateId::Panel,
        TemplateId::Hadith,
        TemplateId::News,
    ];

    /// Stable lower-case identifier, used in export filenames.
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Facebook => "facebook",
            TemplateId::Youtube => "youtube",
            TemplateId::Instagram => "instagram",
            TemplateId::Quote => "quote",
            TemplateId::Speech => "speech",
            TemplateId::Panel => "panel",
            TemplateId::Hadith => "hadith",
            TemplateId::News => "news",
        }
    }

    /// Parse a stable identifier back into a `TemplateId`.
    pub fn parse(s: &str) -> DesignResult<TemplateId> {
        TemplateId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| DesignError::UnknownTemplate(s.to_owned()))
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered template: identity, canvas aspect, and layout function.
pub struct Template {
    /// The template's identifier.
    pub id: TemplateId,
    /// Canvas aspect the template is designed for.
    pub aspect: AspectRatio,
    layout: fn(&CompositionState, &str) -> VisualTree,
}

impl Template {
    /// Build the visual tree for the given state and display date.
    pub fn layout(&self, state: &CompositionState, display_date: &str) -> VisualTree {
        (self.layout)(state, display_date)
    }
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Template")
            .field("id", &self.id)
            .field("aspect", &self.aspect)
            .finish()
    }
}

static TEMPLATES: [Template; 8] = [
    Template {
        id: TemplateId::Facebook,
        aspect: AspectRatio::Square,
        layout: templates::facebook,
    },
    Template {
        id: TemplateId::Youtube,
        aspect: AspectRatio::Widescreen,
        layout: templates::youtube,
    },
    Template {
        id: TemplateId::Instagram,
        aspect: AspectRatio::Square,
        layout: templates::instagram,
    },
    Template {
        id: TemplateId::Quote,
        aspect: AspectRatio::Square,
        layout: templates::quote,
    },
    Template {
        id: TemplateId::Speech,
        aspect: AspectRatio::Square,
        layout: templates::speech,
    },
    Template {
        id: TemplateId::Panel,
        aspect: AspectRatio::Square,
        layout: templates::panel,
    },
    Template {
        id: TemplateId::Hadith,
        aspect: AspectRatio::Square,
        layout: templates::hadith,
    },
    Template {
        id: TemplateId::News,
        aspect: AspectRatio::Square,
        layout: templates::news,
    },
];

/// All registered templates in canonical order.
pub fn list_templates() -> &'static [Template] {
    &TEMPLATES
}

/// Look up a template by id. Total: every id has a registration.
pub fn template_for(id: TemplateId) -> &'static Template {
    // TEMPLATES is laid out in TemplateId::ALL order.
    &TEMPLATES[id as usize]
}

#[cfg(test)]
#[path = "../../tests/unit/template/registry.rs"]
mod tests;
