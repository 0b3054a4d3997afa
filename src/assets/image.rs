use std::sync::Arc;

use anyhow::Context;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::foundation::error::{DesignError, DesignResult};

/// Opaque handle to uploaded image content.
///
/// An `ImageRef` is a self-contained `data:` URI, so it can be persisted
/// across sessions through the key-value vault and decoded without touching
/// the filesystem. Equality is by URI; two uploads of identical bytes with
/// the same media type compare equal.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ImageRef {
    uri: String,
}

impl std::fmt::Debug for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageRef")
            .field("media_type", &self.media_type())
            .field("uri_len", &self.uri.len())
            .finish()
    }
}

impl ImageRef {
    /// Wrap an existing base64 `data:` URI.
    ///
    /// Only the envelope is validated here; the payload is decoded lazily by
    /// [`ImageRef::decode`].
    pub fn from_data_uri(uri: impl Into<String>) -> DesignResult<Self> {
        let uri = uri.into();
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| DesignError::validation("image reference must be a data: URI"))?;
        if !rest.contains(";base64,") {
            return Err(DesignError::validation(
                "image data URI must carry a base64 payload",
            ));
        }
        Ok(Self { uri })
    }

    /// Build a self-contained reference from raw encoded image bytes.
    pub fn from_bytes(media_type: &str, bytes: &[u8]) -> Self {
        Self {
            uri: format!("data:{media_type};base64,{}", BASE64.encode(bytes)),
        }
    }

    /// The full `data:` URI.
    pub fn as_uri(&self) -> &str {
        &self.uri
    }

    /// The declared media type (e.g. `image/png`).
    pub fn media_type(&self) -> &str {
        self.uri
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .unwrap_or("")
    }

    /// Decode the payload into premultiplied RGBA8 pixels.
    pub fn decode(&self) -> DesignResult<DecodedImage> {
        let payload = self
            .uri
            .split_once(";base64,")
            .map(|(_, p)| p)
            .ok_or_else(|| DesignError::validation("image data URI has no base64 payload"))?;
        let bytes = BASE64
            .decode(payload)
            .context("decode base64 image payload")?;
        decode_image(&bytes)
    }
}

/// Decoded raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> DesignResult<DecodedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(DecodedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/image.rs"]
mod tests;
