//! Bundled fallback image.

/// Base64 PNG returned when generation fails for any reason other than the
/// model loading.
pub const PLACEHOLDER_PHOTO: &str = include_str!("../../assets/placeholder.png.b64");

/// Returns the placeholder payload without the trailing newline of the
/// asset file.
#[must_use]
pub fn placeholder_photo() -> &'static str {
    PLACEHOLDER_PHOTO.trim_end()
}
