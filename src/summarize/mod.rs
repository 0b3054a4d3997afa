//! Text summarization behind a trait seam.
//!
//! The composition flow only sees [`Summarizer`]; the Gemini-backed
//! implementation lives in [`gemini`] and tests substitute their own.

pub mod gemini;

use crate::foundation::error::DesignResult;

/// Turns raw pasted text into a short, impactful Bengali quote.
pub trait Summarizer {
    /// Summarize `text` into display-ready quote text.
    fn summarize(&self, text: &str) -> DesignResult<String>;
}

/// Instruction sent ahead of the user's text.
pub(crate) fn build_prompt(text: &str) -> String {
    format!(
        "From the following Bengali text, extract the most powerful and concise key \
         message or quote suitable for a social media graphic.\n\
         The quote should be inspiring and easy to read. Keep it short, ideally between \
         10 to 20 words.\n\
         Do not add any extra text, formatting, or quotation marks. Just return the \
         extracted quote.\n\n\
         Text: \"{text}\"\n\n\
         Extracted Quote:"
    )
}
