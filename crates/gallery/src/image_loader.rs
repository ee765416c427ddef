//! Image sniffing and decoding.

use common::geometry::Size;
use common::{GalleryError, GalleryResult};
use dom::File;
use image::{GenericImageView, ImageFormat};
use std::path::Path;

/// Media type of a file: the declared type, else one sniffed from the
/// leading bytes, else one guessed from the extension. Empty when unknown.
pub fn mime_type(file: &File) -> String {
    if !file.mime_type.is_empty() {
        return file.mime_type.clone();
    }
    image::guess_format(&file.bytes)
        .or_else(|_| ImageFormat::from_path(Path::new(&file.name)))
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_default()
}

/// Fill in a missing media type.
pub fn with_sniffed_type(mut file: File) -> File {
    if file.mime_type.is_empty() {
        file.mime_type = mime_type(&file);
    }
    file
}

/// Decode `bytes` and return the natural size of the image.
pub fn natural_size(bytes: &[u8]) -> GalleryResult<Size> {
    let image = image::load_from_memory(bytes).map_err(|e| GalleryError::image(e.to_string()))?;
    let (width, height) = image.dimensions();
    Ok(Size::new(width as f32, height as f32))
}
