//! The single mutable composition model behind the studio.
//!
//! All mutation goes through the operations here; rendering reads the state
//! through [`CompositionState::layout`], which rebuilds the visual tree from
//! scratch every time. There is no retained scene to invalidate.

use crate::assets::image::ImageRef;
use crate::foundation::error::{DesignError, DesignResult};
use crate::layout::tree::VisualTree;
use crate::summarize::Summarizer;
use crate::template::registry::{self, TemplateId};

/// Quote shown on the canvas before any text has been generated.
pub const PLACEHOLDER_DISPLAY_TEXT: &str =
    "আপনার প্রার্থীর সুন্দর উক্তি এখানে প্রদর্শিত হবে।";

/// User-facing message when generation is requested with no input text.
pub const EMPTY_INPUT_MESSAGE: &str = "অনুগ্রহ করে টেক্সট বক্সে কিছু লিখুন।";

/// User-facing message when summarization fails.
pub const SUMMARY_FAILED_MESSAGE: &str =
    "উক্তি তৈরিতে সমস্যা হয়েছে। অনুগ্রহ করে আবার চেষ্টা করুন।";

/// User-facing message when export fails.
pub const EXPORT_FAILED_MESSAGE: &str = "ডিজাইন ডাউনলোড করা যায়নি।";

/// Lifecycle of the composition with respect to text generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// Nothing generated yet.
    Idle,
    /// A summary request is in flight.
    Summarizing,
    /// A summary has been applied; the design is exportable.
    Ready,
    /// The last operation failed with a user-facing message.
    Error(String),
}

/// Token identifying one summary request.
///
/// Applying a result requires the ticket it was issued under; a ticket from
/// a superseded request is silently discarded, so the newest request always
/// wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SummaryTicket(u64);

/// Everything the user has composed so far.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositionState {
    candidate_image: Option<ImageRef>,
    logo_image: Option<ImageRef>,
    raw_text: String,
    display_text: String,
    template: TemplateId,
    status: Status,
    design_generated: bool,
    summary_seq: u64,
}

impl Default for CompositionState {
    fn default() -> Self {
        Self {
            candidate_image: None,
            logo_image: None,
            raw_text: String::new(),
            display_text: PLACEHOLDER_DISPLAY_TEXT.to_owned(),
            template: TemplateId::Facebook,
            status: Status::Idle,
            design_generated: false,
            summary_seq: 0,
        }
    }
}

impl CompositionState {
    /// Fresh state: placeholder quote, facebook template, no images.
    pub fn new() -> Self {
        Self::default()
    }

    /// The uploaded candidate portrait, if any.
    pub fn candidate_image(&self) -> Option<&ImageRef> {
        self.candidate_image.as_ref()
    }

    /// The uploaded logo, if any.
    pub fn logo_image(&self) -> Option<&ImageRef> {
        self.logo_image.as_ref()
    }

    /// The raw text the user typed.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// The text currently shown on the canvas.
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// The selected template.
    pub fn template(&self) -> TemplateId {
        self.template
    }

    /// Current lifecycle status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Whether a summary has ever been applied successfully.
    pub fn design_generated(&self) -> bool {
        self.design_generated
    }

    /// Set or clear the candidate portrait.
    pub fn set_candidate_image(&mut self, image: Option<ImageRef>) {
        self.candidate_image = image;
    }

    /// Set or clear the logo.
    pub fn set_logo_image(&mut self, image: Option<ImageRef>) {
        self.logo_image = image;
    }

    /// Replace the raw input text.
    pub fn set_raw_text(&mut self, text: impl Into<String>) {
        self.raw_text = text.into();
    }

    /// Switch the active template. Display text and images carry over.
    pub fn select_template(&mut self, template: TemplateId) {
        self.template = template;
    }

    /// Record a user-facing error message.
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.status = Status::Error(message.into());
    }

    /// Dismiss an error, returning to `Ready` or `Idle`.
    pub fn clear_error(&mut self) {
        if matches!(self.status, Status::Error(_)) {
            self.status = if self.design_generated {
                Status::Ready
            } else {
                Status::Idle
            };
        }
    }

    /// Start a summary request for the current raw text.
    ///
    /// Fails on empty or whitespace-only input, recording a user-facing
    /// error status. Starting a new request while one is already in flight
    /// supersedes the older one.
    pub fn begin_summary(&mut self) -> DesignResult<SummaryTicket> {
        if self.raw_text.trim().is_empty() {
            self.status = Status::Error(EMPTY_INPUT_MESSAGE.to_owned());
            return Err(DesignError::EmptyInput);
        }
        self.summary_seq += 1;
        self.status = Status::Summarizing;
        Ok(SummaryTicket(self.summary_seq))
    }

    /// Apply the outcome of a summary request.
    ///
    /// Returns `false` (and changes nothing) when the ticket has been
    /// superseded by a newer request. On success the summarized text becomes
    /// the display text; on failure the previous display text is preserved
    /// and a user-facing error status is recorded.
    pub fn apply_summary(
        &mut self,
        ticket: SummaryTicket,
        result: DesignResult<String>,
    ) -> bool {
        if ticket.0 != self.summary_seq {
            return false;
        }
        match result {
            Ok(text) => {
                self.display_text = text.trim().to_owned();
                self.design_generated = true;
                self.status = Status::Ready;
            }
            Err(_) => {
                self.status = Status::Error(SUMMARY_FAILED_MESSAGE.to_owned());
            }
        }
        true
    }

    /// Run the full generate flow against a summarizer.
    pub fn generate_display_text(
        &mut self,
        summarizer: &dyn Summarizer,
    ) -> DesignResult<()> {
        let ticket = self.begin_summary()?;
        let raw = self.raw_text.clone();
        let result = summarizer.summarize(&raw);
        let failed = result.is_err();
        self.apply_summary(ticket, result);
        if failed {
            return Err(DesignError::summarization(SUMMARY_FAILED_MESSAGE));
        }
        Ok(())
    }

    /// Build the visual tree for the active template.
    pub fn layout(&self, display_date: &str) -> VisualTree {
        registry::template_for(self.template).layout(self, display_date)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/state.rs"]
mod tests;
