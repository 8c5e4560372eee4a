//! Shared image upload validation.

use bytes::Bytes;

use itqan_core::error::AppError;
use itqan_core::result::AppResult;

/// Validates an uploaded image and returns the file extension to store
/// it under.
///
/// Checks size, declared MIME type, and the payload's magic bytes —
/// the declared type is client-controlled and not trusted on its own.
pub(crate) fn validate_image(
    content_type: &str,
    data: &Bytes,
    max_bytes: u64,
    what: &str,
) -> AppResult<&'static str> {
    if data.is_empty() {
        return Err(AppError::validation(format!("A {what} image is required")));
    }

    if data.len() as u64 > max_bytes {
        return Err(AppError::validation(format!(
            "{what} exceeds the maximum size of {max_bytes} bytes"
        )));
    }

    if !content_type.starts_with("image/") {
        return Err(AppError::validation(format!(
            "{what} must be an image (png, jpeg, webp, or gif)"
        )));
    }

    let format = image::guess_format(data)
        .map_err(|_| AppError::validation(format!("{what} is not a recognizable image")))?;

    match format {
        image::ImageFormat::Png => Ok("png"),
        image::ImageFormat::Jpeg => Ok("jpg"),
        image::ImageFormat::WebP => Ok("webp"),
        image::ImageFormat::Gif => Ok("gif"),
        _ => Err(AppError::validation(format!(
            "{what} must be a png, jpeg, webp, or gif image"
        ))),
    }
}
