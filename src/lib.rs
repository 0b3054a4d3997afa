//! Social-media quote graphic composer.
//!
//! A [`CompositionState`] holds everything the user composed: uploaded
//! images, raw text, summarized display text, and the selected template.
//! Template layout functions turn that state into a [`VisualTree`] of
//! relative regions, which the CPU [`Rasterizer`] paints into premultiplied
//! RGBA via `vello_cpu` and Parley-shaped Bengali text. The
//! [`ExportPipeline`] renders at twice the nominal resolution and writes a
//! maximum-quality JPEG.
//!
//! The [`Studio`] wires the pieces together: it restores persisted images
//! from an [`ImageVault`], runs text through a [`Summarizer`] (the bundled
//! implementation calls Gemini), and names exports after the template and
//! the wall-clock timestamp.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod composition;
mod export;
mod foundation;
mod layout;
mod render;
mod summarize;
mod template;

pub use assets::image::{DecodedImage, ImageRef, decode_image};
pub use composition::persist::{
    CANDIDATE_IMAGE_KEY, ImageVault, JsonFileVault, LOGO_IMAGE_KEY, MemoryVault,
};
pub use composition::state::{
    CompositionState, EMPTY_INPUT_MESSAGE, EXPORT_FAILED_MESSAGE, PLACEHOLDER_DISPLAY_TEXT,
    Status, SUMMARY_FAILED_MESSAGE, SummaryTicket,
};
pub use composition::studio::Studio;
pub use export::pipeline::{
    EXPORT_JPEG_QUALITY, EXPORT_PIXEL_RATIO, ExportPipeline, ExportedFile, export_filename,
};
pub use foundation::core::{AspectRatio, Canvas, RelRect, Rgba8};
pub use foundation::date::{display_date_today, format_bengali_date, to_bengali_digits};
pub use foundation::error::{DesignError, DesignResult, ExportError};
pub use layout::templates;
pub use layout::tree::{
    Decoration, FontRole, HAlign, ImageContent, ImageFit, ImageRegion, Paint, Region,
    RegionKind, RegionShape, TextRegion, TextSpan, TextStyle, VAlign, VisualTree, slots,
};
pub use render::raster::{
    DATE_FONT_FILE, FontLibrary, FrameRGBA, QUOTE_FONT_FILE, Rasterizer,
};
pub use summarize::Summarizer;
pub use summarize::gemini::{API_KEY_ENV, GeminiSummarizer};
pub use template::registry::{Template, TemplateId, list_templates, template_for};
