//! Preview textures for selected scans.

use ctscan_core::{FileCandidate, PreviewHandle, PreviewStore};
use eframe::egui;
use std::collections::HashMap;

/// `PreviewStore` backed by egui textures. Revoking a handle drops its
/// texture, which frees it on the GPU side.
pub struct TexturePreviewStore {
    ctx: egui::Context,
    max_dimension: u32,
    next_id: u64,
    // None when the bytes could not be decoded
    textures: HashMap<PreviewHandle, Option<egui::TextureHandle>>,
}

impl TexturePreviewStore {
    pub fn new(ctx: egui::Context, max_dimension: u32) -> Self {
        Self {
            ctx,
            max_dimension: max_dimension.max(1),
            next_id: 0,
            textures: HashMap::new(),
        }
    }

    pub fn texture(&self, handle: &PreviewHandle) -> Option<&egui::TextureHandle> {
        self.textures.get(handle).and_then(Option::as_ref)
    }
}

impl PreviewStore for TexturePreviewStore {
    fn create(&mut self, file: &FileCandidate) -> PreviewHandle {
        self.next_id += 1;
        let handle = PreviewHandle::new(format!("texture:ctscan/{}", self.next_id));
        let texture = match decode_preview(&file.bytes, self.max_dimension) {
            Ok(image) => Some(self.ctx.load_texture(
                format!("preview:{}", file.name),
                image,
                egui::TextureOptions::LINEAR,
            )),
            Err(e) => {
                tracing::warn!("Failed to decode preview for {}: {}", file.name, e);
                None
            }
        };
        self.textures.insert(handle.clone(), texture);
        handle
    }

    fn revoke(&mut self, handle: PreviewHandle) {
        if self.textures.remove(&handle).is_none() {
            tracing::warn!("revoke of unknown preview handle {handle}");
        }
    }
}

/// Decodes image bytes and shrinks them to fit `max_dimension`.
fn decode_preview(bytes: &[u8], max_dimension: u32) -> Result<egui::ColorImage, image::ImageError> {
    let img = image::load_from_memory(bytes)?;
    let img = if img.width() > max_dimension || img.height() > max_dimension {
        img.thumbnail(max_dimension, max_dimension)
    } else {
        img
    };
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[rstest]
    #[case(4, 2, 2, [2, 1])]
    #[case(3, 3, 512, [3, 3])]
    #[case(1000, 500, 100, [100, 50])]
    fn preview_fits_within_max_dimension(
        #[case] width: u32,
        #[case] height: u32,
        #[case] max: u32,
        #[case] expected: [usize; 2],
    ) {
        let image = decode_preview(&png_bytes(width, height), max).unwrap();
        assert_eq!(image.size, expected);
    }

    #[test]
    fn garbage_bytes_do_not_decode() {
        assert!(decode_preview(b"definitely not an image", 64).is_err());
    }

    #[test]
    fn textures_live_until_revoked() {
        let mut store = TexturePreviewStore::new(egui::Context::default(), 64);
        let good = FileCandidate::new("scan.png", "image/png", png_bytes(8, 8));
        let bad = FileCandidate::new("broken.png", "image/png", b"nope".to_vec());

        let good_handle = store.create(&good);
        let bad_handle = store.create(&bad);
        assert!(store.texture(&good_handle).is_some());
        assert!(store.texture(&bad_handle).is_none());
        assert_eq!(store.textures.len(), 2);

        store.revoke(good_handle.clone());
        store.revoke(bad_handle);
        assert!(store.texture(&good_handle).is_none());
        assert!(store.textures.is_empty());
    }
}
