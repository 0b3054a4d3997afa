//! The studio ties state, persistence, summarization, and export together.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::assets::image::ImageRef;
use crate::composition::persist::{CANDIDATE_IMAGE_KEY, ImageVault, LOGO_IMAGE_KEY};
use crate::composition::state::{CompositionState, EXPORT_FAILED_MESSAGE};
use crate::export::pipeline::{ExportPipeline, ExportedFile};
use crate::foundation::date::display_date_today;
use crate::foundation::error::{DesignError, DesignResult, ExportError};
use crate::layout::tree::VisualTree;
use crate::summarize::Summarizer;
use crate::template::registry::TemplateId;

/// High-level controller over one composition session.
pub struct Studio {
    state: CompositionState,
    vault: Box<dyn ImageVault>,
    summarizer: Box<dyn Summarizer>,
    exporter: ExportPipeline,
}

impl Studio {
    /// Assemble a studio and restore any images persisted by an earlier
    /// session.
    pub fn new(
        vault: Box<dyn ImageVault>,
        summarizer: Box<dyn Summarizer>,
        exporter: ExportPipeline,
    ) -> Self {
        let mut studio = Self {
            state: CompositionState::new(),
            vault,
            summarizer,
            exporter,
        };
        studio.restore_saved_images();
        studio
    }

    /// Read access to the composition state.
    pub fn state(&self) -> &CompositionState {
        &self.state
    }

    fn restore_saved_images(&mut self) {
        for (key, slot) in [(CANDIDATE_IMAGE_KEY, true), (LOGO_IMAGE_KEY, false)] {
            let Some(uri) = self.vault.get(key) else {
                continue;
            };
            match ImageRef::from_data_uri(uri) {
                Ok(image) => {
                    if slot {
                        self.state.set_candidate_image(Some(image));
                    } else {
                        self.state.set_logo_image(Some(image));
                    }
                }
                Err(e) => {
                    // A corrupt stored value only costs the restore.
                    tracing::warn!(key, error = %e, "ignoring unusable persisted image");
                }
            }
        }
    }

    /// Set or clear the candidate portrait, persisting the change.
    pub fn set_candidate_image(&mut self, image: Option<ImageRef>) -> DesignResult<()> {
        let value = image.as_ref().map(|i| i.as_uri().to_owned()).unwrap_or_default();
        self.state.set_candidate_image(image);
        self.vault.set(CANDIDATE_IMAGE_KEY, &value)
    }

    /// Set or clear the logo, persisting the change.
    pub fn set_logo_image(&mut self, image: Option<ImageRef>) -> DesignResult<()> {
        let value = image.as_ref().map(|i| i.as_uri().to_owned()).unwrap_or_default();
        self.state.set_logo_image(image);
        self.vault.set(LOGO_IMAGE_KEY, &value)
    }

    /// Replace the raw input text.
    pub fn set_raw_text(&mut self, text: impl Into<String>) {
        self.state.set_raw_text(text);
    }

    /// Switch the active template.
    pub fn select_template(&mut self, template: TemplateId) {
        self.state.select_template(template);
    }

    /// Dismiss a recorded error.
    pub fn clear_error(&mut self) {
        self.state.clear_error();
    }

    /// Summarize the raw text into display text.
    #[tracing::instrument(skip(self))]
    pub fn generate(&mut self) -> DesignResult<()> {
        self.state.generate_display_text(self.summarizer.as_ref())
    }

    /// The visual tree for today's date, once a design has been generated.
    pub fn render_today(&self) -> Option<VisualTree> {
        if !self.state.design_generated() {
            return None;
        }
        Some(self.state.layout(&display_date_today()))
    }

    /// Export the current design as a JPEG named after the template and the
    /// current time.
    pub fn export(&mut self) -> DesignResult<ExportedFile> {
        let Some(tree) = self.render_today() else {
            self.state.record_error(EXPORT_FAILED_MESSAGE);
            return Err(DesignError::Export(ExportError::NoRenderedContent));
        };
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        match self.exporter.export(&tree, millis) {
            Ok(file) => Ok(file),
            Err(e) => {
                self.state.record_error(EXPORT_FAILED_MESSAGE);
                Err(DesignError::Export(e))
            }
        }
    }
}
