//! JPEG export of composed designs.

use std::path::{Path, PathBuf};

use crate::foundation::error::ExportError;
use crate::layout::tree::VisualTree;
use crate::render::raster::{FrameRGBA, Rasterizer};
use crate::template::registry::TemplateId;

/// Exports render at twice the nominal canvas resolution.
pub const EXPORT_PIXEL_RATIO: u32 = 2;

/// JPEG quality for exports. Maximum; file size is not a concern here.
pub const EXPORT_JPEG_QUALITY: u8 = 100;

/// Deterministic export file name for a template at a timestamp.
pub fn export_filename(template: TemplateId, epoch_millis: u64) -> String {
    format!("social-post-{}-{}.jpeg", template.as_str(), epoch_millis)
}

/// A written export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedFile {
    /// File name inside the output directory.
    pub filename: String,
    /// Full path of the written file.
    pub path: PathBuf,
}

/// Renders visual trees to high-resolution JPEG files.
pub struct ExportPipeline {
    out_dir: PathBuf,
    rasterizer: Rasterizer,
}

impl ExportPipeline {
    /// Build a pipeline writing into `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>, rasterizer: Rasterizer) -> Self {
        Self {
            out_dir: out_dir.into(),
            rasterizer,
        }
    }

    /// The directory exports are written into.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Rasterize at export resolution and write a JPEG named for the
    /// template and timestamp.
    #[tracing::instrument(skip(self, tree), fields(template = %tree.template))]
    pub fn export(
        &mut self,
        tree: &VisualTree,
        epoch_millis: u64,
    ) -> Result<ExportedFile, ExportError> {
        let frame = self
            .rasterizer
            .rasterize(tree, EXPORT_PIXEL_RATIO)
            .map_err(|e| ExportError::Rasterization(e.to_string()))?;
        let jpeg = encode_jpeg(&frame).map_err(|e| ExportError::Rasterization(e.to_string()))?;

        let filename = export_filename(tree.template, epoch_millis);
        let path = self.out_dir.join(&filename);
        std::fs::create_dir_all(&self.out_dir)
            .map_err(|e| ExportError::Save(format!("create {}: {e}", self.out_dir.display())))?;
        std::fs::write(&path, jpeg)
            .map_err(|e| ExportError::Save(format!("write {}: {e}", path.display())))?;
        Ok(ExportedFile { filename, path })
    }
}

/// Flatten a premultiplied frame over white and encode as maximum-quality
/// JPEG. JPEG carries no alpha, so uncovered pixels become white.
fn encode_jpeg(frame: &FrameRGBA) -> anyhow::Result<Vec<u8>> {
    let pixel_count = (frame.width as usize) * (frame.height as usize);
    anyhow::ensure!(
        frame.data.len() == pixel_count * 4,
        "frame byte length mismatch"
    );
    let mut rgb = Vec::with_capacity(pixel_count * 3);
    for px in frame.data.chunks_exact(4) {
        if frame.premultiplied {
            // Premultiplied over an opaque white ground: out = c + (255 - a).
            let inv_a = 255 - px[3];
            rgb.push(px[0].saturating_add(inv_a));
            rgb.push(px[1].saturating_add(inv_a));
            rgb.push(px[2].saturating_add(inv_a));
        } else {
            let a = px[3] as u16;
            for c in &px[..3] {
                let blended = (*c as u16 * a + 255 * (255 - a) + 127) / 255;
                rgb.push(blended.min(255) as u8);
            }
        }
    }

    let mut out = Vec::new();
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, EXPORT_JPEG_QUALITY);
    image::ImageEncoder::write_image(
        encoder,
        &rgb,
        frame.width,
        frame.height,
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/export/pipeline.rs"]
mod tests;
